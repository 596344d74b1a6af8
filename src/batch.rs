//! Batch conversion and archive assembly
//!
//! Scripts are converted sequentially and independently; they share only the
//! read-only mapping. A failing script becomes an error entry alongside its
//! successful siblings instead of aborting the batch.

use crate::error::ConvertResult;
use crate::types::{BatchEntry, ConvertOptions, Mapping, ScriptInput};
use crate::{engine, formatter};
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Convert every script of a batch. Each successful entry carries the final
/// (formatted) document; failures carry the per-script error.
pub fn convert_batch(
    scripts: &[ScriptInput],
    mapping: &Mapping,
    options: &ConvertOptions,
) -> Vec<BatchEntry> {
    scripts
        .iter()
        .map(|script| {
            let mut per_script = options.clone();
            per_script.default_case_name = case_name_for(&script.name, options);
            let result = engine::convert(&script.text, mapping, &per_script).map(|mut report| {
                report.document = formatter::format(&report.document);
                report
            });
            BatchEntry {
                name: script.name.clone(),
                result,
            }
        })
        .collect()
}

/// Assemble a `.zip` archive: one `<base>.robot` per converted script and
/// one `<base>.error.txt` placeholder per failure, in input order.
pub fn write_archive(entries: &[BatchEntry]) -> ConvertResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let file_options = SimpleFileOptions::default();

    for entry in entries {
        let stem = base_name(&entry.name);
        match &entry.result {
            Ok(report) => {
                writer.start_file(format!("{stem}.robot"), file_options)?;
                writer.write_all(report.document.as_bytes())?;
            }
            Err(e) => {
                writer.start_file(format!("{stem}.error.txt"), file_options)?;
                writer.write_all(format!("Conversion failed: {e}\n").as_bytes())?;
            }
        }
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

/// Derive the implicit test-case name from the script's file name so single
/// case documents are distinguishable inside an archive.
fn case_name_for(script_name: &str, options: &ConvertOptions) -> String {
    let stem = base_name(script_name);
    if stem.is_empty() {
        options.default_case_name.clone()
    } else {
        stem.replace('_', " ")
    }
}

fn base_name(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn scripts() -> Vec<ScriptInput> {
        vec![
            ScriptInput::new("login.py", "page.goto(\"https://example.com\")"),
            ScriptInput::new("broken.py", "   \n\n"),
            ScriptInput::new("logout.py", "page.goto(\"https://example.com/logout\")"),
        ]
    }

    #[test]
    fn test_batch_failure_does_not_abort_siblings() {
        let entries = convert_batch(&scripts(), &Mapping::new(), &ConvertOptions::default());

        assert_eq!(entries.len(), 3);
        assert!(entries[0].result.is_ok());
        assert!(entries[1].result.is_err());
        assert!(entries[2].result.is_ok());
    }

    #[test]
    fn test_batch_documents_are_formatted() {
        let entries = convert_batch(&scripts(), &Mapping::new(), &ConvertOptions::default());
        let doc = &entries[0].result.as_ref().unwrap().document;

        assert!(doc.starts_with("*** Settings ***\n"));
        assert!(doc.ends_with("Close Browser\n"));
        assert!(doc.contains("\nlogin\n"));
    }

    #[test]
    fn test_archive_contains_all_entries() {
        let entries = convert_batch(&scripts(), &Mapping::new(), &ConvertOptions::default());
        let bytes = write_archive(&entries).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["login.robot", "broken.error.txt", "logout.robot"]);
    }

    #[test]
    fn test_archive_error_placeholder_carries_message() {
        let entries = convert_batch(&scripts(), &Mapping::new(), &ConvertOptions::default());
        let bytes = write_archive(&entries).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut placeholder = String::new();
        archive
            .by_name("broken.error.txt")
            .unwrap()
            .read_to_string(&mut placeholder)
            .unwrap();
        assert!(placeholder.contains("Conversion failed"));
        assert!(placeholder.contains("no statements"));
    }
}
