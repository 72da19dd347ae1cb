#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

pub type LookupResult<T> = std::result::Result<T, LookupError>;
