//! pw2robot - Playwright script to Robot Framework converter
//!
//! This library rewrites Playwright-style browser-automation scripts into
//! Robot Framework test-suite text, driven by a user-supplied Excel mapping
//! sheet from Playwright method signatures to Robot Framework keywords.
//!
//! # Pipeline
//!
//! - Excel bytes + sheet name → [`mapping::load_mapping`] → [`types::Mapping`]
//! - script text + mapping → [`engine::convert`] → draft document
//! - draft document → [`formatter::format`] → final document
//! - multiple scripts → [`batch::convert_batch`] + [`batch::write_archive`]
//!
//! # Example
//!
//! ```no_run
//! use pw2robot::{engine, formatter, mapping};
//! use pw2robot::types::ConvertOptions;
//!
//! let bytes = std::fs::read("mapping.xlsx")?;
//! let mapping = mapping::load_mapping(&bytes, "Mapping")?;
//!
//! let script = std::fs::read_to_string("test_login.py")?;
//! let report = engine::convert(&script, &mapping, &ConvertOptions::default())?;
//! let suite = formatter::format(&report.document);
//!
//! println!("{suite}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod batch;
pub mod cli;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod mapping;
pub mod types;

// Re-export commonly used types
pub use error::{ConvertError, ConvertResult};
pub use types::{CasePolicy, ConversionReport, ConvertOptions, Mapping, ScriptInput};
