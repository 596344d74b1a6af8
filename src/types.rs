//! Core data types shared across the converter

/// Ordered method-signature → keyword mapping built from the mapping sheet.
///
/// Iteration order is spreadsheet row order; resolution depends on it
/// (first key containing the looked-up signature wins), so entries live in
/// a plain ordered vector rather than a hash map. A duplicate key keeps its
/// original position but takes the keyword of the later row.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(String, String)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a (signature, keyword) pair. Later inserts with the same
    /// signature overwrite the stored keyword in place.
    pub fn insert(&mut self, signature: String, keyword: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(s, _)| *s == signature) {
            entry.1 = keyword;
        } else {
            self.entries.push((signature, keyword));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate pairs in insertion (spreadsheet row) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, k)| (s.as_str(), k.as_str()))
    }
}

impl FromIterator<(String, String)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut mapping = Mapping::new();
        for (signature, keyword) in iter {
            mapping.insert(signature, keyword);
        }
        mapping
    }
}

/// How a script is segmented into test cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CasePolicy {
    /// The whole file is one implicit test case.
    #[default]
    SingleCase,
    /// Each recognized `def <name>(` opens a new test case named after the
    /// function; URL variables still deduplicate across the whole script.
    PerFunction,
}

/// Per-conversion configuration.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub case_policy: CasePolicy,
    /// Value of the default browser choice variable (`${BROWSER}`).
    pub browser: String,
    /// Name used for the implicit test case under `CasePolicy::SingleCase`.
    pub default_case_name: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            case_policy: CasePolicy::SingleCase,
            browser: "chromium".to_string(),
            default_case_name: "Converted Test Case".to_string(),
        }
    }
}

/// One finished test case of the output document.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub steps: Vec<String>,
}

/// Mutable single-pass conversion state, one per script.
///
/// Counters only ever grow and `url_to_variable` entries are never removed,
/// so a URL navigated twice reuses its variable across the entire script
/// regardless of test-case boundaries.
#[derive(Debug, Default)]
pub struct ConversionState {
    pub variable_counter: usize,
    pub url_counter: usize,
    /// Literal URL → generated variable name, insertion-ordered.
    pub url_to_variable: Vec<(String, String)>,
    /// Finished test cases, in source order.
    pub cases: Vec<TestCase>,
    /// Steps of the test case currently being written.
    pub case_buffer: Vec<String>,
    pub current_case_name: String,
    pub writing_started: bool,
    pub first_navigation: bool,
    pub explicit_close_seen: bool,
    /// Set once a close step has been emitted; suppresses the rest of the
    /// current case's steps.
    pub halted: bool,
    pub warnings: Vec<String>,
}

impl ConversionState {
    pub fn new(case_name: &str) -> Self {
        Self {
            current_case_name: case_name.to_string(),
            first_navigation: true,
            ..Self::default()
        }
    }

    /// Allocate the next assertion result variable, e.g. `${RESULT_1}`.
    pub fn next_result_variable(&mut self) -> String {
        self.variable_counter += 1;
        format!("${{RESULT_{}}}", self.variable_counter)
    }

    /// Resolve or allocate the variable holding a literal URL.
    pub fn url_variable(&mut self, url: &str) -> String {
        if let Some((_, var)) = self.url_to_variable.iter().find(|(u, _)| u == url) {
            return var.clone();
        }
        self.url_counter += 1;
        let var = format!("${{URL_{}}}", self.url_counter);
        self.url_to_variable.push((url.to_string(), var.clone()));
        var
    }

    /// Append a step to the current test case unless emission is halted.
    pub fn push_step(&mut self, step: String) {
        if self.halted {
            return;
        }
        self.case_buffer.push(step);
        self.writing_started = true;
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Result of converting one script: the draft document plus the non-fatal
/// diagnostics that were also embedded as inline review markers.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub document: String,
    pub warnings: Vec<String>,
}

/// One named input script of a batch.
#[derive(Debug, Clone)]
pub struct ScriptInput {
    pub name: String,
    pub text: String,
}

impl ScriptInput {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Outcome of one batch member; failures do not abort siblings.
#[derive(Debug)]
pub struct BatchEntry {
    pub name: String,
    pub result: crate::error::ConvertResult<ConversionReport>,
}
