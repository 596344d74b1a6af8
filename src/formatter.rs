//! Robot Framework document formatting
//!
//! Deterministic re-indent of an assembled draft: section headers reset the
//! line mode, Settings/Variables lines are normalized to column 0, Test
//! Cases/Keywords bodies get a fixed step indent with case names kept at
//! column 0, blank runs collapse to a single blank line, and the output
//! always ends with exactly one newline. `format` is idempotent.

const STEP_INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineMode {
    /// Settings / Variables: simple rows, everything at column 0.
    Table,
    /// Test Cases / Keywords: names at column 0, steps indented.
    Cases,
}

/// Reformat a draft document.
pub fn format(draft: &str) -> String {
    let mut output: Vec<String> = Vec::new();
    let mut mode = LineMode::Table;
    let mut last_was_blank = false;

    for line in draft.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            // Collapse blank runs; never start the document with one.
            if !last_was_blank && !output.is_empty() {
                output.push(String::new());
                last_was_blank = true;
            }
            continue;
        }
        last_was_blank = false;

        if let Some(header_mode) = section_mode(trimmed) {
            mode = header_mode;
            output.push(trimmed.to_string());
            continue;
        }

        match mode {
            LineMode::Table => output.push(trimmed.to_string()),
            LineMode::Cases => {
                let is_name = !line.starts_with(' ') && !line.starts_with('\t');
                if is_name {
                    output.push(trimmed.to_string());
                } else {
                    output.push(format!("{STEP_INDENT}{trimmed}"));
                }
            }
        }
    }

    while output.last().map(|l| l.is_empty()) == Some(true) {
        output.pop();
    }

    let mut text = output.join("\n");
    text.push('\n');
    text
}

/// Recognize a `*** Section ***` header and return the line mode it opens.
fn section_mode(trimmed: &str) -> Option<LineMode> {
    if !(trimmed.starts_with("***") && trimmed.ends_with("***") && trimmed.len() > 6) {
        return None;
    }
    let name = trimmed.trim_matches('*').trim().to_lowercase();
    if name.contains("test case") || name.contains("keyword") {
        Some(LineMode::Cases)
    } else {
        // Settings, Variables, and anything unrecognized stay in table mode.
        Some(LineMode::Table)
    }
}
