//! Quote-aware statement splitter
//!
//! Splits one script statement into dotted segments, e.g.
//! `page.locator("#menu").click()` into the receiver, the locator chain and
//! the final method call, without splitting on a delimiter inside a quoted
//! literal.
//!
//! The in-quotes flag toggles on **every** double-quote character rather
//! than matching open/close pairs: an unbalanced quote count flips splitting
//! behavior for the remainder of the line. This is intentional and must not
//! be upgraded to pair matching without flagging a semantic change.

/// Split `line` on `delimiter`, honoring the quote-toggle rule.
///
/// Segments are returned verbatim (quotes kept, no trimming). An empty line
/// yields one empty segment, matching `str::split` behavior.
pub fn split(line: &str, delimiter: char) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
            current.push(c);
        } else if c == delimiter && !in_quotes {
            segments.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    segments.push(current);

    segments
}
