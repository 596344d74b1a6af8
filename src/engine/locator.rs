//! Locator normalization
//!
//! Turns a raw locator expression (the argument text of a call, or a
//! reconstructed locator chain) into a Robot Framework Browser selector
//! string such as `id=submit` or `text=Welcome`.
//!
//! Rules are evaluated in strict priority order, first match wins. The final
//! fallback (`css=<raw>`) is frequently wrong on purpose: it marks the step
//! for manual review instead of dropping it.

use regex::Regex;
use std::sync::LazyLock;

static GET_BY_ROLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"get_by_role\(\s*["']?([\w-]+)["']?\s*,\s*name\s*=\s*["']([^"']*)["']"#).unwrap()
});

static NAME_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name\s*=\s*["']([^"']*)["']"#).unwrap());

static GET_BY_KIND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"get_by_(\w+)\(\s*["']([^"']*)["']"#).unwrap());

static SINGLE_QUOTED_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*'([^']*)'\s*\)").unwrap());

const EXPLICIT_PREFIXES: [&str; 4] = ["css=", "xpath=", "id=", "text="];

/// A normalized selector, flagged when the last-resort fallback produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLocator {
    pub selector: String,
    pub fallback: bool,
}

impl NormalizedLocator {
    fn resolved(selector: String) -> Self {
        Self {
            selector,
            fallback: false,
        }
    }
}

/// Normalize a raw locator expression into a typed selector string.
pub fn extract(raw: &str) -> NormalizedLocator {
    let text = raw.trim();

    // 1. Fragment-style id: everything after '#' up to the next quote.
    if let Some(pos) = text.find('#') {
        let rest = &text[pos + 1..];
        let end = rest.find(['"', '\'']).unwrap_or(rest.len());
        return NormalizedLocator::resolved(format!("id={}", &rest[..end]));
    }

    // 2. Role accessor with an accessible name.
    if let Some(caps) = GET_BY_ROLE.captures(text) {
        return NormalizedLocator::resolved(format!(
            "role={}[name=\"{}\"]",
            &caps[1], &caps[2]
        ));
    }

    // 3. Bare name= attribute.
    if let Some(caps) = NAME_ATTRIBUTE.captures(text) {
        return NormalizedLocator::resolved(format!("css=[name=\"{}\"]", &caps[1]));
    }

    // 4. Remaining get_by_* accessors.
    if let Some(caps) = GET_BY_KIND.captures(text) {
        let kind = &caps[1];
        let value = &caps[2];
        let prefix = match kind {
            "text" => "text=",
            "label" => "label=",
            "placeholder" => "placeholder=",
            "title" => "title=",
            "testid" => "data-testid=",
            other => return NormalizedLocator::resolved(format!("{}={}", other, value)),
        };
        return NormalizedLocator::resolved(format!("{}{}", prefix, value));
    }

    // 5./6. Parenthesized single-quoted literal; an already-prefixed bare
    // value also passes through so normalization stays idempotent.
    if let Some(caps) = SINGLE_QUOTED_ARG.captures(text) {
        let literal = caps[1].to_string();
        if has_explicit_prefix(&literal) {
            return NormalizedLocator::resolved(literal);
        }
        return NormalizedLocator::resolved(infer_strategy(&literal));
    }
    if has_explicit_prefix(text) {
        return NormalizedLocator::resolved(text.to_string());
    }

    // 7. Nothing matched; flag for manual review.
    NormalizedLocator {
        selector: format!("css={}", text),
        fallback: true,
    }
}

fn has_explicit_prefix(value: &str) -> bool {
    EXPLICIT_PREFIXES.iter().any(|p| value.starts_with(p))
}

/// Guess a strategy for an unprefixed literal.
fn infer_strategy(literal: &str) -> String {
    if literal.contains('/') || literal.contains('[') {
        format!("xpath={}", literal)
    } else if literal.contains('.') || literal.contains('#') || literal.contains('>') {
        format!("css={}", literal)
    } else {
        format!("text={}", literal)
    }
}
