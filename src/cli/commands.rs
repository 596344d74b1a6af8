use crate::batch;
use crate::error::ConvertResult;
use crate::mapping;
use crate::types::{CasePolicy, ConvertOptions, ScriptInput};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Execute the sheets command - list the sheet names of a workbook
pub fn sheets(file: PathBuf) -> ConvertResult<()> {
    println!("{}", "📄 pw2robot - Workbook sheets".bold().green());
    println!("   File: {}\n", file.display());

    let names = mapping::list_sheet_names_from_path(&file)?;
    for name in &names {
        println!("   {}", name.bright_blue());
    }
    println!("\n{} sheet(s) found", names.len());

    Ok(())
}

/// Execute the convert command
pub fn convert(
    mapping_file: PathBuf,
    sheet: String,
    scripts: Vec<PathBuf>,
    output: Option<PathBuf>,
    per_function: bool,
    browser: String,
    verbose: bool,
) -> ConvertResult<()> {
    println!("{}", "🤖 pw2robot - Converting scripts".bold().green());
    println!("   Mapping: {} (sheet '{}')", mapping_file.display(), sheet);
    println!("   Scripts: {}\n", scripts.len());

    let keyword_mapping = mapping::load_mapping_from_path(&mapping_file, &sheet)?;
    if keyword_mapping.is_empty() {
        println!(
            "{}",
            "⚠️  Mapping sheet has no usable rows - every method will pass through unresolved"
                .yellow()
        );
    } else if verbose {
        println!(
            "{}",
            format!("📖 Loaded {} mapping rows", keyword_mapping.len()).cyan()
        );
    }

    let options = ConvertOptions {
        case_policy: if per_function {
            CasePolicy::PerFunction
        } else {
            CasePolicy::SingleCase
        },
        browser,
        ..ConvertOptions::default()
    };

    let mut inputs = Vec::with_capacity(scripts.len());
    for path in &scripts {
        let text = fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        inputs.push(ScriptInput::new(name, text));
    }

    if inputs.len() == 1 {
        return convert_single(&inputs[0], &keyword_mapping, &options, output);
    }

    let entries = batch::convert_batch(&inputs, &keyword_mapping, &options);
    for entry in &entries {
        match &entry.result {
            Ok(report) => {
                println!("   {} {}", "✅".green(), entry.name);
                report_warnings(&entry.name, &report.warnings);
            }
            Err(e) => println!("   {} {}: {}", "❌".red(), entry.name, e),
        }
    }

    let archive = batch::write_archive(&entries)?;
    let target = output.unwrap_or_else(|| PathBuf::from("converted_suites.zip"));
    fs::write(&target, archive)?;
    println!(
        "\n{} {}",
        "📦 Archive written:".bold().green(),
        target.display()
    );

    Ok(())
}

/// Single-script path: a failure here fails the whole request.
fn convert_single(
    input: &ScriptInput,
    keyword_mapping: &crate::types::Mapping,
    options: &ConvertOptions,
    output: Option<PathBuf>,
) -> ConvertResult<()> {
    let entries = batch::convert_batch(std::slice::from_ref(input), keyword_mapping, options);
    let entry = entries.into_iter().next().expect("one input, one entry");
    let report = entry.result?;
    report_warnings(&entry.name, &report.warnings);

    match output {
        Some(path) => {
            fs::write(&path, &report.document)?;
            println!("{} {}", "✅ Suite written:".bold().green(), path.display());
        }
        None => print!("{}", report.document),
    }

    Ok(())
}

fn report_warnings(name: &str, warnings: &[String]) {
    for warning in warnings {
        println!("   {} {}: {}", "⚠️ ".yellow(), name, warning.yellow());
    }
}
