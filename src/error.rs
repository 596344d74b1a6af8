use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sheet '{sheet}' not found in workbook (available sheets: {})", .available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("Sheet could not be read: {0}")]
    SheetUnreadable(String),

    #[error("Script contains no statements")]
    EmptyScript,

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
