use clap::{Parser, Subcommand};
use pw2robot::cli;
use pw2robot::error::ConvertResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pw2robot")]
#[command(about = "Convert Playwright scripts to Robot Framework test suites.")]
#[command(long_about = "pw2robot - Playwright to Robot Framework converter

Rewrites Playwright-style browser-automation scripts into Robot Framework
test-suite text, driven by an Excel mapping sheet pairing Playwright method
signatures with Robot Framework keywords.

COMMANDS:
  sheets    - List the sheet names of a mapping workbook
  convert   - Convert one or more scripts using a mapping sheet

EXAMPLES:
  pw2robot sheets mapping.xlsx
  pw2robot convert mapping.xlsx --sheet Mapping test_login.py
  pw2robot convert mapping.xlsx --sheet Mapping tests/*.py -o suites.zip

Docs: https://github.com/mouvify/pw2robot")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sheet names of a mapping workbook
    Sheets {
        /// Path to the Excel workbook (.xlsx)
        file: PathBuf,
    },

    #[command(long_about = "Convert Playwright scripts to Robot Framework suites.

Loads the mapping sheet, then converts each script in a single pass:
navigation, assertions, dialog handlers and generic calls are rewritten to
Browser-library keywords; unrecognized statements are preserved as comment
lines for manual follow-up, never dropped.

OUTPUT:
  One input script  → one .robot document (stdout unless -o is given)
  Multiple scripts  → a .zip archive with one entry per script; a script
                      that fails to convert becomes an .error.txt entry and
                      does not abort its siblings.

TEST-CASE SEGMENTATION:
  By default the whole file is one test case. With --per-function each
  'def <name>(' opens a new test case named after the function; URL
  variables are still shared across the whole script.

EXAMPLES:
  pw2robot convert mapping.xlsx --sheet Mapping test_login.py
  pw2robot convert mapping.xlsx --sheet Mapping a.py b.py -o suites.zip
  pw2robot convert mapping.xlsx --sheet Mapping a.py --per-function")]
    /// Convert scripts using a mapping sheet
    Convert {
        /// Path to the Excel mapping workbook (.xlsx)
        mapping: PathBuf,

        /// Sheet holding the 'Playwright Method' / 'Robot Framework Keyword' columns
        #[arg(short, long)]
        sheet: String,

        /// Script files to convert
        #[arg(required = true)]
        scripts: Vec<PathBuf>,

        /// Output file (.robot for one script, .zip for several)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open a new test case per 'def <name>(' instead of one per file
        #[arg(long)]
        per_function: bool,

        /// Value of the ${BROWSER} variable in generated suites
        #[arg(short, long, default_value = "chromium")]
        browser: String,

        /// Show verbose conversion steps
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> ConvertResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sheets { file } => cli::sheets(file),

        Commands::Convert {
            mapping,
            sheet,
            scripts,
            output,
            per_function,
            browser,
            verbose,
        } => cli::convert(mapping, sheet, scripts, output, per_function, browser, verbose),
    }
}
