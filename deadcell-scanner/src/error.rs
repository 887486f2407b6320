use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("grid contains no occupied cells")]
    EmptyGrid,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Other error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
