use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuestError {
    #[error("Remote service unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Progress sync failed: {0}")]
    SyncFailed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Quest not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuestError>;
