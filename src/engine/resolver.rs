//! Method signature → target keyword resolution
//!
//! Resolution is an ordered substring scan over the mapping: the first
//! mapping key (in spreadsheet row order) that *contains* the call signature
//! wins. Overlapping method names (`click()` inside `double_click()`) are
//! therefore resolved by row order; the order is deterministic because
//! [`Mapping`] preserves insertion order.

use crate::types::Mapping;

/// Outcome of a keyword lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A mapping row matched; the target keyword.
    Keyword(String),
    /// No row contained the signature; the signature minus its trailing
    /// `()`, to be treated as an unresolved-method marker.
    Unresolved(String),
}

impl Resolution {
    pub fn keyword(&self) -> &str {
        match self {
            Resolution::Keyword(k) | Resolution::Unresolved(k) => k,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Resolution::Unresolved(_))
    }
}

/// Look up the target keyword for a call signature like `click()`.
pub fn resolve(signature: &str, mapping: &Mapping) -> Resolution {
    for (source, target) in mapping.iter() {
        if source.contains(signature) {
            return Resolution::Keyword(target.to_string());
        }
    }
    let stripped = signature.trim_end_matches("()").to_string();
    Resolution::Unresolved(stripped)
}
