//! Error handling for the contract analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("API key is required before documents can be processed")]
    MissingApiKey,

    #[error("A question is required for the selected analysis mode")]
    QuestionRequired,

    #[error("No extracted document text is available for analysis")]
    NoDocument,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit or quota exceeded: {0}")]
    RateLimited(String),

    #[error("Completion API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid completion response: {0}")]
    InvalidResponse(String),

    #[error("Analysis did not complete: {0}")]
    Incomplete(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ContractAnalyzerError {
    /// Missing preconditions are surfaced as warnings, everything else as errors.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ContractAnalyzerError::MissingApiKey
                | ContractAnalyzerError::QuestionRequired
                | ContractAnalyzerError::NoDocument
        )
    }

    /// Failures raised while talking to the completion endpoint.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ContractAnalyzerError::Network(_)
                | ContractAnalyzerError::Authentication(_)
                | ContractAnalyzerError::RateLimited(_)
                | ContractAnalyzerError::Api { .. }
                | ContractAnalyzerError::InvalidResponse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ContractAnalyzerError>;

impl From<reqwest::Error> for ContractAnalyzerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ContractAnalyzerError::InvalidResponse(err.to_string())
        } else {
            ContractAnalyzerError::Network(err.to_string())
        }
    }
}
