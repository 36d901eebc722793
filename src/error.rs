//! Error handling for the resume matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Text decoding error: {0}")]
    TextDecoding(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Scoring error: {0}")]
    Scoring(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, MatcherError>;

impl MatcherError {
    /// Validation failures the caller can correct. Everything else is an
    /// internal failure and maps to a server-side error at the boundary.
    pub fn is_client_error(&self) -> bool {
        matches!(self, MatcherError::InvalidInput(_))
    }
}

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for MatcherError {
    fn from(err: anyhow::Error) -> Self {
        MatcherError::Scoring(err.to_string())
    }
}
