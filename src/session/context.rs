//! Per-session state handed to every event handler

use crate::input::{ExtractedText, UploadedDocument};
use crate::llm::{AnalysisMode, AnalysisResult};

#[derive(Debug, Clone)]
pub struct SessionContext {
    pub api_key: Option<String>,
    pub document: Option<UploadedDocument>,
    /// `None` until extraction succeeds for the current document
    pub extracted: Option<ExtractedText>,
    pub mode: AnalysisMode,
    pub question: String,
    pub last_result: Option<AnalysisResult>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            api_key: None,
            document: None,
            extracted: None,
            mode: AnalysisMode::GeneralSummary,
            question: String::new(),
            last_result: None,
        }
    }
}

impl SessionContext {
    pub fn with_api_key(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            ..Self::default()
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().map_or(false, |key| !key.trim().is_empty())
    }

    pub fn has_question(&self) -> bool {
        !self.question.trim().is_empty()
    }

    /// A document was handed in but has not been extracted yet.
    pub fn extraction_pending(&self) -> bool {
        self.document.is_some() && self.extracted.is_none()
    }

    pub fn question_for_mode(&self) -> Option<&str> {
        if self.mode.requires_question() {
            Some(self.question.as_str())
        } else {
            None
        }
    }

    /// Drop everything tied to the current document, keeping the credential.
    pub fn clear_document(&mut self) {
        self.document = None;
        self.extracted = None;
        self.last_result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_is_absent() {
        assert!(!SessionContext::with_api_key(Some("  ".to_string())).has_api_key());
        assert!(SessionContext::with_api_key(Some("sk-test".to_string())).has_api_key());
        assert!(!SessionContext::default().has_api_key());
    }

    #[test]
    fn test_question_only_passed_in_question_mode() {
        let mut context = SessionContext::default();
        context.question = "Siapa penjualnya?".to_string();
        assert_eq!(context.question_for_mode(), None);

        context.mode = AnalysisMode::SpecificQuestion;
        assert_eq!(context.question_for_mode(), Some("Siapa penjualnya?"));
    }
}
