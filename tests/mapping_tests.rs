//! Mapping sheet loading tests against real workbook files

use pw2robot::error::ConvertError;
use pw2robot::mapping::{
    list_sheet_names_from_path, load_mapping_from_path, KEYWORD_COLUMN, METHOD_COLUMN,
};
use rust_xlsxwriter::Workbook;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write a workbook with a "Mapping" sheet plus an unrelated "Notes" sheet.
fn write_workbook(dir: &TempDir, rows: &[(&str, &str)]) -> PathBuf {
    let path = dir.path().join("mapping.xlsx");
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet().set_name("Mapping").unwrap();
    sheet.write(0, 0, METHOD_COLUMN).unwrap();
    sheet.write(0, 1, KEYWORD_COLUMN).unwrap();
    for (i, (method, keyword)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write(row, 0, *method).unwrap();
        sheet.write(row, 1, *keyword).unwrap();
    }

    let notes = workbook.add_worksheet().set_name("Notes").unwrap();
    notes.write(0, 0, "scratch").unwrap();

    workbook.save(&path).unwrap();
    path
}

#[test]
fn test_list_sheet_names_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir, &[]);

    let names = list_sheet_names_from_path(&path).unwrap();
    assert_eq!(names, vec!["Mapping".to_string(), "Notes".to_string()]);
}

#[test]
fn test_load_mapping_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(
        &dir,
        &[
            ("locator().click()", "Click"),
            ("locator().fill()", "Fill Text"),
        ],
    );

    let mapping = load_mapping_from_path(&path, "Mapping").unwrap();
    assert_eq!(mapping.len(), 2);
    let pairs: Vec<(&str, &str)> = mapping.iter().collect();
    assert_eq!(pairs[0], ("locator().click()", "Click"));
    assert_eq!(pairs[1], ("locator().fill()", "Fill Text"));
}

#[test]
fn test_load_mapping_missing_sheet_names_alternatives() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir, &[]);

    let err = load_mapping_from_path(&path, "DoesNotExist").unwrap_err();
    match &err {
        ConvertError::SheetNotFound { sheet, available } => {
            assert_eq!(sheet, "DoesNotExist");
            assert_eq!(available, &vec!["Mapping".to_string(), "Notes".to_string()]);
        }
        other => panic!("expected SheetNotFound, got {other:?}"),
    }
    // Error text lists the alternatives for the user.
    assert!(err.to_string().contains("Mapping"));
    assert!(err.to_string().contains("Notes"));
}

#[test]
fn test_load_mapping_duplicate_rows_last_keyword_wins() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(
        &dir,
        &[
            ("locator().click()", "Click"),
            ("locator().click()", "Click With Force"),
        ],
    );

    let mapping = load_mapping_from_path(&path, "Mapping").unwrap();
    assert_eq!(mapping.len(), 1);
    let pairs: Vec<(&str, &str)> = mapping.iter().collect();
    assert_eq!(pairs[0], ("locator().click()", "Click With Force"));
}

#[test]
fn test_load_mapping_missing_file_is_io_error() {
    let err = load_mapping_from_path("does-not-exist.xlsx", "Mapping").unwrap_err();
    assert!(matches!(err, ConvertError::Io(_)));
}
