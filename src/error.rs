use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid amount at row {row}: {value:?}")]
    InvalidAmount { row: usize, value: String },

    #[error("Duplicate address at row {row}: {address}")]
    DuplicateAddress { row: usize, address: String },

    #[error("Empty {field} at row {row}")]
    EmptyField { row: usize, field: &'static str },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
