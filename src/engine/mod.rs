//! Conversion engine
//!
//! Single forward pass over a Playwright-style script, emitting a draft
//! Robot Framework document (Settings / Variables / Test Cases). Statement
//! shapes are recognized by pattern priority, first match wins per line;
//! anything unrecognized degrades to a comment line so no statement is ever
//! silently dropped.

pub mod locator;
pub mod resolver;
pub mod tokenizer;

use crate::error::{ConvertError, ConvertResult};
use crate::types::{
    CasePolicy, ConversionReport, ConversionState, ConvertOptions, Mapping, TestCase,
};
use regex::Regex;
use std::sync::LazyLock;

const STEP_INDENT: &str = "    ";
const CELL_SEP: &str = "    ";
const CLOSE_STEP: &str = "Close Browser";
const ASSERT_TIMEOUT: &str = "timeout=10s";

static FUNCTION_DEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^def\s+(\w+)\s*\(").unwrap());

static GOTO_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"goto\(\s*["']([^"']*)["']"#).unwrap());

static HAVE_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"to_have_text\(\s*["']([^"']*)["']"#).unwrap());

static CALL_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\w+)\((.*)\)$").unwrap());

/// Convert one script into a draft document.
///
/// The draft still needs [`crate::formatter::format`] before it is final.
/// Non-fatal diagnostics are embedded as `# REVIEW:` lines and repeated in
/// the report's warning list.
pub fn convert(
    script: &str,
    mapping: &Mapping,
    options: &ConvertOptions,
) -> ConvertResult<ConversionReport> {
    if script.lines().all(|l| l.trim().is_empty()) {
        return Err(ConvertError::EmptyScript);
    }

    let mut state = ConversionState::new(&options.default_case_name);

    for raw_line in script.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        convert_line(line, mapping, options, &mut state);
    }
    finish_case(&mut state);

    Ok(ConversionReport {
        document: assemble(&state, options),
        warnings: state.warnings,
    })
}

/// Dispatch one statement by pattern priority.
fn convert_line(line: &str, mapping: &Mapping, options: &ConvertOptions, state: &mut ConversionState) {
    // Source comments pass through untouched.
    if line.starts_with('#') {
        state.push_step(line.to_string());
        return;
    }

    // Test-case boundary (PerFunction policy only).
    if options.case_policy == CasePolicy::PerFunction {
        if let Some(caps) = FUNCTION_DEF.captures(line) {
            finish_case(state);
            state.current_case_name = case_name_from_function(&caps[1]);
            return;
        }
    }

    // 1. One-shot dialog handler: rewritten to an accept placeholder. The
    //    original accept/dismiss intent is discarded on purpose (parity with
    //    the legacy converter); the reminder comment flags it for review.
    if is_dialog_handler(line) {
        state.push_step(format!(
            "Promise To{CELL_SEP}Wait For Alert{CELL_SEP}action=accept"
        ));
        state.push_step(
            "# REVIEW: place the statement that triggers the dialog right after this line"
                .to_string(),
        );
        return;
    }

    // 2. Explicit context close: remembered, emitted at teardown time.
    if line.contains("context.close()") {
        state.explicit_close_seen = true;
        return;
    }

    // 3. Assertion.
    if line.starts_with("expect(") {
        convert_assertion(line, state);
        return;
    }

    // 4. Navigation.
    if let Some(caps) = GOTO_URL.captures(line) {
        convert_navigation(&caps[1], state);
        return;
    }

    // 5. Browser/session close: one close step, then nothing more for this
    //    test case.
    if line.contains("browser.close()") {
        if !state.explicit_close_seen {
            state.push_step(CLOSE_STEP.to_string());
        }
        state.halted = true;
        return;
    }

    // 6. Generic dotted call.
    if convert_generic_call(line, mapping, state) {
        return;
    }

    // 7. Unparseable: preserved as a comment so the author can follow up.
    state.push_step(format!("# {line}"));
}

fn is_dialog_handler(line: &str) -> bool {
    (line.contains(".once(") || line.contains(".on("))
        && (line.contains("\"dialog\"") || line.contains("'dialog'"))
}

/// `expect(<locator>)...` → result variable + visibility wait, plus a text
/// equality check when `to_have_text` is present.
fn convert_assertion(line: &str, state: &mut ConversionState) {
    let inner = balanced_argument(line, "expect(");
    let normalized = locator::extract(&inner);
    let result_var = state.next_result_variable();

    state.push_step(format!(
        "{result_var} ={CELL_SEP}Set Variable{CELL_SEP}{}",
        normalized.selector
    ));
    state.push_step(format!(
        "Wait For Elements State{CELL_SEP}{}{CELL_SEP}visible{CELL_SEP}{ASSERT_TIMEOUT}",
        normalized.selector
    ));
    if let Some(caps) = HAVE_TEXT.captures(line) {
        state.push_step(format!(
            "Get Text{CELL_SEP}{}{CELL_SEP}=={CELL_SEP}{}",
            normalized.selector, &caps[1]
        ));
    }
    if normalized.fallback {
        flag_locator(&normalized.selector, state);
    }
}

/// `goto(<url>)` → bootstrap on the first navigation of a case, a plain
/// `Go To` afterwards. URL variables deduplicate across the whole script.
fn convert_navigation(url: &str, state: &mut ConversionState) {
    let url_var = state.url_variable(url);
    if state.first_navigation {
        state.push_step(format!("New Browser{CELL_SEP}${{BROWSER}}"));
        state.push_step("New Context".to_string());
        state.push_step(format!("New Page{CELL_SEP}{url_var}"));
        state.first_navigation = false;
    } else {
        state.push_step(format!("Go To{CELL_SEP}{url_var}"));
    }
}

/// Tokenize a dotted call chain, resolve its keyword and locator, and emit
/// one step. Returns false when the line does not look like a call at all.
fn convert_generic_call(line: &str, mapping: &Mapping, state: &mut ConversionState) -> bool {
    let segments = tokenizer::split(line, '.');
    let last = match segments.last() {
        Some(s) => s.trim(),
        None => return false,
    };
    let caps = match CALL_SHAPE.captures(last) {
        Some(c) => c,
        None => return false,
    };
    if segments.len() < 2 {
        return false;
    }

    let method = caps[1].to_string();
    let args = caps[2].to_string();
    let signature = format!("{method}()");

    let resolution = resolver::resolve(&signature, mapping);
    let keyword = resolution.keyword().to_string();

    // Everything between the receiver and the final call is the locator
    // chain; bare `page.method(locator, …)` calls carry the locator as the
    // first argument instead.
    let chain = segments[1..segments.len() - 1].join(".");
    let mut arg_cells: Vec<String> = if args.trim().is_empty() {
        Vec::new()
    } else {
        tokenizer::split(&args, ',')
            .into_iter()
            .map(|a| strip_quotes(a.trim()).to_string())
            .filter(|a| !a.is_empty())
            .collect()
    };

    let normalized = if !chain.is_empty() {
        Some(locator::extract(&chain))
    } else if !arg_cells.is_empty() {
        let first = arg_cells.remove(0);
        Some(locator::extract(&first))
    } else {
        None
    };

    let mut cells: Vec<String> = vec![keyword];
    if let Some(loc) = &normalized {
        cells.push(loc.selector.clone());
    }
    if method.contains("select_option") {
        // When the locator came from the first argument, the option values
        // are everything after it; otherwise the whole argument list.
        let rest = if chain.is_empty() {
            tokenizer::split(&args, ',')[1..].join(",")
        } else {
            args.clone()
        };
        cells.extend(select_option_cells(rest.trim()));
    } else {
        cells.extend(arg_cells);
    }
    state.push_step(cells.join(CELL_SEP));

    if resolution.is_unresolved() {
        state.push_step(format!(
            "# REVIEW: no mapping entry contains '{signature}'"
        ));
        state.warn(format!("unresolved method '{signature}'"));
    }
    if let Some(loc) = normalized {
        if loc.fallback {
            flag_locator(&loc.selector, state);
        }
    }
    true
}

/// Multi-select argument shaping: a bracketed list becomes one `value` cell
/// per entry, a single literal becomes a `label` cell.
fn select_option_cells(rest: &str) -> Vec<String> {
    if let Some(list) = rest.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        let mut cells = vec!["value".to_string()];
        cells.extend(
            list.split(',')
                .map(|v| strip_quotes(v.trim()).to_string())
                .filter(|v| !v.is_empty()),
        );
        cells
    } else {
        vec!["label".to_string(), strip_quotes(rest).to_string()]
    }
}

fn flag_locator(selector: &str, state: &mut ConversionState) {
    state.push_step(format!("# REVIEW: unverified locator '{selector}'"));
    state.warn(format!("unresolved locator, defaulted to '{selector}'"));
}

/// Close out the current test case, applying the teardown policy, and reset
/// the per-case flags.
fn finish_case(state: &mut ConversionState) {
    if state.explicit_close_seen {
        // Exactly one teardown close, never a duplicate. Appended directly:
        // the halt flag must not suppress teardown.
        if state.case_buffer.last().map(String::as_str) != Some(CLOSE_STEP) {
            state.case_buffer.push(CLOSE_STEP.to_string());
        }
    } else if state.writing_started
        && state.case_buffer.last().map(String::as_str) != Some(CLOSE_STEP)
    {
        state.case_buffer.push(CLOSE_STEP.to_string());
    }

    if !state.case_buffer.is_empty() {
        state.cases.push(TestCase {
            name: state.current_case_name.clone(),
            steps: std::mem::take(&mut state.case_buffer),
        });
    }
    state.writing_started = false;
    state.first_navigation = true;
    state.explicit_close_seen = false;
    state.halted = false;
}

/// Assemble the three-section draft document.
fn assemble(state: &ConversionState, options: &ConvertOptions) -> String {
    let mut out = String::new();

    out.push_str("*** Settings ***\n");
    out.push_str(&format!("Library{CELL_SEP}Browser\n"));
    out.push('\n');

    out.push_str("*** Variables ***\n");
    out.push_str(&format!("${{BROWSER}}{CELL_SEP}{}\n", options.browser));
    for (url, var) in &state.url_to_variable {
        out.push_str(&format!("{var}{CELL_SEP}{url}\n"));
    }
    out.push('\n');

    out.push_str("*** Test Cases ***\n");
    for case in &state.cases {
        out.push_str(&case.name);
        out.push('\n');
        for step in &case.steps {
            out.push_str(STEP_INDENT);
            out.push_str(step);
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

/// Extract the balanced argument text following `opener`, e.g. the locator
/// expression inside `expect(...)`. Falls back to everything after the
/// opener when parentheses never balance.
fn balanced_argument(line: &str, opener: &str) -> String {
    let start = match line.find(opener) {
        Some(pos) => pos + opener.len(),
        None => return line.to_string(),
    };
    let mut depth = 1usize;
    for (offset, c) in line[start..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return line[start..start + offset].to_string();
                }
            }
            _ => {}
        }
    }
    line[start..].to_string()
}

fn strip_quotes(value: &str) -> &str {
    value
        .trim_matches('"')
        .trim_matches('\'')
}

/// `test_login_flow` → `Login Flow`.
fn case_name_from_function(function: &str) -> String {
    let trimmed = function.strip_prefix("test_").unwrap_or(function);
    trimmed
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(rows: &[(&str, &str)]) -> Mapping {
        rows.iter()
            .map(|(s, k)| (s.to_string(), k.to_string()))
            .collect()
    }

    fn convert_ok(script: &str, mapping: &Mapping) -> ConversionReport {
        convert(script, mapping, &ConvertOptions::default()).unwrap()
    }

    #[test]
    fn test_empty_script_is_an_error() {
        let result = convert("\n  \n", &Mapping::new(), &ConvertOptions::default());
        assert!(matches!(result, Err(ConvertError::EmptyScript)));
    }

    #[test]
    fn test_navigation_emits_bootstrap_once() {
        let script = "page.goto(\"https://example.com\")\npage.goto(\"https://example.com/about\")";
        let report = convert_ok(script, &Mapping::new());

        assert_eq!(report.document.matches("New Browser").count(), 1);
        assert_eq!(report.document.matches("New Context").count(), 1);
        assert!(report.document.contains("New Page    ${URL_1}"));
        assert!(report.document.contains("Go To    ${URL_2}"));
    }

    #[test]
    fn test_url_variables_deduplicate() {
        let script = "page.goto(\"https://example.com\")\npage.goto(\"https://example.com\")";
        let report = convert_ok(script, &Mapping::new());

        assert_eq!(report.document.matches("${URL_1}    https://example.com").count(), 1);
        assert!(!report.document.contains("${URL_2}"));
        assert!(report.document.contains("Go To    ${URL_1}"));
    }

    #[test]
    fn test_explicit_close_yields_single_teardown() {
        let m = mapping(&[("page.locator(\"#x\").click()", "Click")]);
        let script = "page.goto(\"https://example.com\")\npage.locator(\"#submit\").click()\ncontext.close()";
        let report = convert_ok(script, &m);

        assert_eq!(report.document.matches("New Browser").count(), 1);
        assert_eq!(report.document.matches("Click    id=submit").count(), 1);
        assert_eq!(report.document.matches("Close Browser").count(), 1);
    }

    #[test]
    fn test_browser_close_not_duplicated_by_teardown() {
        let script = "page.goto(\"https://example.com\")\nbrowser.close()";
        let report = convert_ok(script, &Mapping::new());

        assert_eq!(report.document.matches("Close Browser").count(), 1);
    }

    #[test]
    fn test_browser_close_halts_remaining_steps() {
        let m = mapping(&[("page.locator(\"#x\").click()", "Click")]);
        let script =
            "page.goto(\"https://example.com\")\nbrowser.close()\npage.locator(\"#late\").click()";
        let report = convert_ok(script, &m);

        assert!(!report.document.contains("id=late"));
    }

    #[test]
    fn test_default_teardown_appended_when_steps_emitted() {
        let script = "page.goto(\"https://example.com\")";
        let report = convert_ok(script, &Mapping::new());

        assert_eq!(report.document.matches("Close Browser").count(), 1);
    }

    #[test]
    fn test_dialog_handler_rewritten_to_accept() {
        // Dismiss intent is discarded, matching the legacy converter.
        let script = "page.once(\"dialog\", lambda dialog: dialog.dismiss())";
        let report = convert_ok(script, &Mapping::new());

        assert!(report
            .document
            .contains("Promise To    Wait For Alert    action=accept"));
        assert!(!report.document.contains("dismiss"));
        assert!(report.document.contains("# REVIEW: place the statement"));
    }

    #[test]
    fn test_assertion_emits_wait_and_text_check() {
        let script = "expect(page.locator(\"#msg\")).to_have_text(\"Done\")";
        let report = convert_ok(script, &Mapping::new());

        assert!(report.document.contains("${RESULT_1} =    Set Variable    id=msg"));
        assert!(report
            .document
            .contains("Wait For Elements State    id=msg    visible    timeout=10s"));
        assert!(report.document.contains("Get Text    id=msg    ==    Done"));
    }

    #[test]
    fn test_assertion_without_text_check() {
        let script = "expect(page.get_by_text(\"Welcome\")).to_be_visible()";
        let report = convert_ok(script, &Mapping::new());

        assert!(report
            .document
            .contains("Wait For Elements State    text=Welcome    visible"));
        assert!(!report.document.contains("Get Text"));
    }

    #[test]
    fn test_generic_call_with_arguments() {
        let m = mapping(&[("locator(\"#x\").fill()", "Fill Text")]);
        let script = "page.locator(\"#email\").fill(\"user@example.com\")";
        let report = convert_ok(script, &m);

        assert!(report
            .document
            .contains("Fill Text    id=email    user@example.com"));
    }

    #[test]
    fn test_generic_call_locator_from_first_argument() {
        let m = mapping(&[("page.fill()", "Fill Text")]);
        let script = "page.fill(\"#email\", \"user@example.com\")";
        let report = convert_ok(script, &m);

        assert!(report
            .document
            .contains("Fill Text    id=email    user@example.com"));
    }

    #[test]
    fn test_unresolved_method_gets_marker() {
        let script = "page.locator(\"#btn\").hover()";
        let report = convert_ok(script, &Mapping::new());

        assert!(report.document.contains("hover    id=btn"));
        assert!(report
            .document
            .contains("# REVIEW: no mapping entry contains 'hover()'"));
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_select_option_list_arguments() {
        let m = mapping(&[("select_option()", "Select Options By")]);
        let script = "page.locator(\"#fruits\").select_option([\"apple\", \"pear\"])";
        let report = convert_ok(script, &m);

        assert!(report
            .document
            .contains("Select Options By    id=fruits    value    apple    pear"));
    }

    #[test]
    fn test_select_option_single_argument() {
        let m = mapping(&[("select_option()", "Select Options By")]);
        let script = "page.locator(\"#fruits\").select_option(\"Apple\")";
        let report = convert_ok(script, &m);

        assert!(report
            .document
            .contains("Select Options By    id=fruits    label    Apple"));
    }

    #[test]
    fn test_unparseable_line_preserved_as_comment() {
        let script = "page.goto(\"https://example.com\")\nif response.status == 200:";
        let report = convert_ok(script, &Mapping::new());

        assert!(report.document.contains("# if response.status == 200:"));
    }

    #[test]
    fn test_per_function_policy_splits_cases() {
        let options = ConvertOptions {
            case_policy: CasePolicy::PerFunction,
            ..ConvertOptions::default()
        };
        let script = "def test_login(page):\npage.goto(\"https://example.com\")\ndef test_logout(page):\npage.goto(\"https://example.com\")";
        let report = convert(script, &Mapping::new(), &options).unwrap();

        assert!(report.document.contains("Login\n"));
        assert!(report.document.contains("Logout\n"));
        // Same URL, one shared variable across both cases.
        assert!(!report.document.contains("${URL_2}"));
        assert_eq!(report.document.matches("New Browser").count(), 2);
    }

    #[test]
    fn test_single_case_policy_ignores_function_defs() {
        let script = "def test_login(page):\npage.goto(\"https://example.com\")";
        let report = convert_ok(script, &Mapping::new());

        assert!(report.document.contains("Converted Test Case"));
        assert!(report.document.contains("# def test_login(page):"));
    }

    #[test]
    fn test_section_order_is_fixed() {
        let script = "page.goto(\"https://example.com\")";
        let report = convert_ok(script, &Mapping::new());

        let settings = report.document.find("*** Settings ***").unwrap();
        let variables = report.document.find("*** Variables ***").unwrap();
        let cases = report.document.find("*** Test Cases ***").unwrap();
        assert!(settings < variables && variables < cases);
    }

    #[test]
    fn test_case_name_from_function() {
        assert_eq!(case_name_from_function("test_login_flow"), "Login Flow");
        assert_eq!(case_name_from_function("checkout"), "Checkout");
    }

    #[test]
    fn test_balanced_argument_extraction() {
        assert_eq!(
            balanced_argument("expect(page.locator(\"#a\")).to_be_visible()", "expect("),
            "page.locator(\"#a\")"
        );
    }
}
