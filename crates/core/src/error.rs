use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, TaggerError>;

#[derive(Debug, thiserror::Error)]
pub enum TaggerError {
    /// Rejected user input. Nothing was changed.
    #[error("{0}")]
    Validation(String),

    #[error("destination already exists: {}", path.display())]
    DestinationExists { path: PathBuf },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TaggerError {
    pub fn validation(message: impl Into<String>) -> Self {
        TaggerError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TaggerError::Validation(_))
    }
}
