use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dimension not found: {0}")]
    DimensionNotFound(String),

    #[error("Duplicate dimension: {0}")]
    DuplicateDimension(String),

    #[error("Invalid dimension '{id}': {reason}")]
    InvalidDimension { id: String, reason: String },

    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("Duplicate employee: {0}")]
    DuplicateEmployee(String),

    #[error("Duplicate benchmark: {0}")]
    DuplicateBenchmark(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
