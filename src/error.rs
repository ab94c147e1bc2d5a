use thiserror::Error;

/// Errors surfaced by the tally library.
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stdin was closed while a prompt was waiting for an answer.
    #[error("input closed before an answer was given")]
    InputClosed,

    #[error("prompt failed: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, TallyError>;
