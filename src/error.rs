use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Request error: {0}")]
    Request(String),

    #[error("Request timed out")]
    Timeout,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChatError>;
