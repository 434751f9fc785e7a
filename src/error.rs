use thiserror::Error;

#[derive(Error, Debug)]
pub enum PennyError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Nothing to import: {0}")]
    EmptyInput(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PennyError>;
