//! Event dispatch: one handler per user action, state held in `SessionContext`

use crate::error::{ContractAnalyzerError, Result};
use crate::input::{ExtractedText, PdfExtractor, TextExtractor, UploadedDocument};
use crate::llm::{AnalysisMode, CompletionClient, ContractAnalyzer};
use crate::session::context::SessionContext;
use crate::session::events::{Notice, SessionEvent};
use log::{debug, info, warn};

const API_KEY_WARNING: &str = "Enter your OpenAI API key to continue";

pub struct Session<C: CompletionClient> {
    analyzer: ContractAnalyzer<C>,
    extractor: PdfExtractor,
    context: SessionContext,
}

impl<C: CompletionClient> Session<C> {
    pub fn new(analyzer: ContractAnalyzer<C>) -> Self {
        Self::with_context(analyzer, SessionContext::default())
    }

    pub fn with_context(analyzer: ContractAnalyzer<C>, context: SessionContext) -> Self {
        Self {
            analyzer,
            extractor: PdfExtractor,
            context,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn analyzer(&self) -> &ContractAnalyzer<C> {
        &self.analyzer
    }

    pub async fn dispatch(&mut self, event: SessionEvent) -> Vec<Notice> {
        match event {
            SessionEvent::SetApiKey(key) => self.on_api_key(key),
            SessionEvent::Upload(document) => self.on_upload(document),
            SessionEvent::SelectMode(mode) => self.on_select_mode(mode),
            SessionEvent::SetQuestion(question) => self.on_question(question),
            SessionEvent::StartAnalysis => self.on_start_analysis().await,
            SessionEvent::Reset => {
                let api_key = self.context.api_key.take();
                self.context = SessionContext::with_api_key(api_key);
                vec![Notice::Info("Session cleared".to_string())]
            }
        }
    }

    /// Upload and extract without running an analysis. The credential gate
    /// still applies, so nothing is parsed while the key is missing.
    pub fn extract_document(&mut self, document: UploadedDocument) -> Result<ExtractedText> {
        if !self.context.has_api_key() {
            return Err(ContractAnalyzerError::MissingApiKey);
        }

        let notices = self.on_upload(document);
        if let Some(extracted) = self.context.extracted.clone() {
            return Ok(extracted);
        }

        let message = notices
            .into_iter()
            .find_map(|notice| match notice {
                Notice::Error(message) | Notice::Warning(message) => Some(message),
                _ => None,
            })
            .unwrap_or_else(|| "no text was extracted".to_string());
        Err(ContractAnalyzerError::PdfExtraction(message))
    }

    fn on_api_key(&mut self, key: String) -> Vec<Notice> {
        let key = key.trim().to_string();
        if key.is_empty() {
            self.context.api_key = None;
            return vec![Notice::Warning(API_KEY_WARNING.to_string())];
        }

        self.context.api_key = Some(key);
        let mut notices = vec![Notice::Success("API key set".to_string())];

        // A document handed in before the key was entered is processed now
        if self.context.extraction_pending() {
            notices.extend(self.run_extraction());
        }
        notices
    }

    fn on_upload(&mut self, document: UploadedDocument) -> Vec<Notice> {
        info!("Received document {} ({} bytes)", document.name, document.size());
        self.context.clear_document();
        self.context.document = Some(document);

        if !self.context.has_api_key() {
            return vec![Notice::Warning(API_KEY_WARNING.to_string())];
        }
        self.run_extraction()
    }

    fn run_extraction(&mut self) -> Vec<Notice> {
        let Some(document) = self.context.document.as_ref() else {
            return Vec::new();
        };

        match self.extractor.extract(&document.bytes) {
            Ok(extracted) => {
                let mut notices = vec![Notice::Success(format!(
                    "Text extraction succeeded: {} pages, {} characters",
                    extracted.page_count,
                    extracted.char_count()
                ))];
                if extracted.is_blank() {
                    notices.push(Notice::Warning(
                        "The document contains no extractable text".to_string(),
                    ));
                }
                notices.push(Notice::ExtractedText(extracted.text.clone()));
                self.context.extracted = Some(extracted);
                notices
            }
            Err(e) => {
                warn!("Extraction failed for {}: {}", document.name, e);
                // The failed upload is dropped; a new one is needed to continue
                self.context.clear_document();
                vec![Notice::from_error("Failed to read PDF file", &e)]
            }
        }
    }

    fn on_select_mode(&mut self, mode: AnalysisMode) -> Vec<Notice> {
        debug!("Mode selected: {}", mode.cli_name());
        self.context.mode = mode;

        let mut notices = vec![Notice::Info(format!("Analysis mode: {}", mode.label()))];
        if mode.requires_question() && !self.context.has_question() {
            notices.push(Notice::Info("Enter your question about the contract".to_string()));
        }
        notices
    }

    fn on_question(&mut self, question: String) -> Vec<Notice> {
        // Kept as typed; only the emptiness check looks past whitespace
        self.context.question = question;
        if self.context.has_question() {
            vec![Notice::Info("Question recorded".to_string())]
        } else {
            vec![Notice::Warning("Question cleared".to_string())]
        }
    }

    async fn on_start_analysis(&mut self) -> Vec<Notice> {
        let Some(api_key) = self.context.api_key.clone().filter(|k| !k.trim().is_empty()) else {
            return vec![Notice::Warning(API_KEY_WARNING.to_string())];
        };
        let Some(extracted) = self.context.extracted.as_ref() else {
            return vec![Notice::from_error("analysis", &ContractAnalyzerError::NoDocument)];
        };

        let mode = self.context.mode;
        let result = self
            .analyzer
            .analyze(&api_key, mode, &extracted.text, self.context.question_for_mode())
            .await;

        match result {
            Ok(result) => {
                info!("Analysis finished in {}ms", result.processing_time_ms);
                self.context.last_result = Some(result.clone());
                vec![
                    Notice::Success(format!("{} complete", mode.label())),
                    Notice::AnalysisResult(result),
                ]
            }
            Err(e) => {
                if e.is_remote() {
                    warn!("Completion request failed: {}", e);
                }
                self.context.last_result = None;
                vec![Notice::from_error("Error communicating with the completion API", &e)]
            }
        }
    }
}
