//! Report structure wrapping an analysis result with its document context

use crate::input::ExtractedText;
use crate::llm::{AnalysisMode, AnalysisResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub document: DocumentSummary,
    pub analysis: AnalysisSection,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub name: String,
    pub page_count: usize,
    pub character_count: usize,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSection {
    pub mode: AnalysisMode,
    pub mode_label: String,
    /// Only present for question mode
    pub question: Option<String>,
    /// Model output, verbatim
    pub result: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub temperature: f32,
    pub processing_time_ms: u64,
    pub analyzer_version: String,
}

impl AnalysisReport {
    pub fn new(
        document_name: &str,
        extracted: &ExtractedText,
        result: &AnalysisResult,
        question: Option<&str>,
    ) -> Self {
        Self {
            document: DocumentSummary {
                name: document_name.to_string(),
                page_count: extracted.page_count,
                character_count: extracted.char_count(),
                word_count: extracted.word_count(),
            },
            analysis: AnalysisSection {
                mode: result.mode,
                mode_label: result.mode.label().to_string(),
                question: question
                    .filter(|_| result.mode.requires_question())
                    .map(str::to_string),
                result: result.text.clone(),
            },
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                model: result.model.clone(),
                temperature: result.temperature,
                processing_time_ms: result.processing_time_ms,
                analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn generated_at_display(&self) -> String {
        self.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}
