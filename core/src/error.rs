use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument { reason: reason.into() }
    }
}

pub type SimResult<T> = Result<T, SimError>;
