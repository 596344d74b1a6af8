//! Mapping sheet loading
//!
//! Reads the user-supplied Excel workbook that pairs Playwright method
//! signatures with Robot Framework keywords. The two required columns are
//! matched by exact header text; rows where either cell trims to empty are
//! skipped. An empty resulting mapping is not an error here — the engine
//! degrades to pass-through resolution — but callers should warn about it.

use crate::error::{ConvertError, ConvertResult};
use crate::types::Mapping;
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;

/// Exact header of the source-signature column.
pub const METHOD_COLUMN: &str = "Playwright Method";
/// Exact header of the target-keyword column.
pub const KEYWORD_COLUMN: &str = "Robot Framework Keyword";

/// List the sheet names of a workbook given its raw bytes.
pub fn list_sheet_names(bytes: &[u8]) -> ConvertResult<Vec<String>> {
    let workbook = open_bytes(bytes)?;
    Ok(workbook.sheet_names().to_vec())
}

/// Build a [`Mapping`] from workbook bytes and a sheet name.
pub fn load_mapping(bytes: &[u8], sheet: &str) -> ConvertResult<Mapping> {
    let mut workbook = open_bytes(bytes)?;

    let available = workbook.sheet_names().to_vec();
    if !available.iter().any(|s| s == sheet) {
        return Err(ConvertError::SheetNotFound {
            sheet: sheet.to_string(),
            available,
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| ConvertError::SheetUnreadable(e.to_string()))?;

    mapping_from_range(&range)
}

/// Path convenience for the CLI.
pub fn load_mapping_from_path<P: AsRef<Path>>(path: P, sheet: &str) -> ConvertResult<Mapping> {
    let bytes = std::fs::read(path)?;
    load_mapping(&bytes, sheet)
}

/// Path convenience for the CLI.
pub fn list_sheet_names_from_path<P: AsRef<Path>>(path: P) -> ConvertResult<Vec<String>> {
    let bytes = std::fs::read(path)?;
    list_sheet_names(&bytes)
}

fn open_bytes(bytes: &[u8]) -> ConvertResult<Xlsx<Cursor<Vec<u8>>>> {
    Xlsx::new(Cursor::new(bytes.to_vec()))
        .map_err(|e| ConvertError::SheetUnreadable(e.to_string()))
}

fn mapping_from_range(range: &calamine::Range<Data>) -> ConvertResult<Mapping> {
    let (height, width) = range.get_size();
    if height == 0 {
        return Err(ConvertError::SheetUnreadable(format!(
            "sheet has no header row (expected columns '{METHOD_COLUMN}' and '{KEYWORD_COLUMN}')"
        )));
    }

    let mut method_col = None;
    let mut keyword_col = None;
    for col in 0..width {
        if let Some(cell) = range.get((0, col)) {
            let header = cell.to_string();
            if header == METHOD_COLUMN {
                method_col = Some(col);
            } else if header == KEYWORD_COLUMN {
                keyword_col = Some(col);
            }
        }
    }
    let (method_col, keyword_col) = match (method_col, keyword_col) {
        (Some(m), Some(k)) => (m, k),
        _ => {
            return Err(ConvertError::SheetUnreadable(format!(
                "required columns '{METHOD_COLUMN}' and '{KEYWORD_COLUMN}' not found in header row"
            )))
        }
    };

    let mut mapping = Mapping::new();
    for row in 1..height {
        let method = cell_text(range, row, method_col);
        let keyword = cell_text(range, row, keyword_col);
        if method.is_empty() || keyword.is_empty() {
            continue;
        }
        mapping.insert(method, keyword);
    }

    Ok(mapping)
}

fn cell_text(range: &calamine::Range<Data>, row: usize, col: usize) -> String {
    range
        .get((row, col))
        .map(|cell| cell.to_string().trim().to_string())
        .unwrap_or_default()
}
