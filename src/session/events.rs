//! User actions and the notices they produce

use crate::error::ContractAnalyzerError;
use crate::input::UploadedDocument;
use crate::llm::{AnalysisMode, AnalysisResult};

/// One user action; each maps to exactly one handler invocation.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    SetApiKey(String),
    Upload(UploadedDocument),
    SelectMode(AnalysisMode),
    SetQuestion(String),
    StartAnalysis,
    Reset,
}

/// What the presentation layer should show after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
    ExtractedText(String),
    AnalysisResult(AnalysisResult),
}

impl Notice {
    /// Preconditions become warnings; everything else is an error.
    pub fn from_error(context: &str, err: &ContractAnalyzerError) -> Self {
        if err.is_precondition() {
            Notice::Warning(err.to_string())
        } else {
            Notice::Error(format!("{}: {}", context, err))
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Notice::Warning(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}
