use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("match already started")]
    MatchAlreadyStarted,

    #[error("invalid phase schedule: {0}")]
    InvalidSchedule(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid replay script: {0}")]
    InvalidScript(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
