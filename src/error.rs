use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommissionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for CommissionError {
    fn from(err: rocksdb::Error) -> Self {
        CommissionError::StorageError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CommissionError>;
