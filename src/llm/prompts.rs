//! Prompt templates for contract analysis

use crate::error::{ContractAnalyzerError, Result};
use crate::llm::mode::AnalysisMode;
use log::debug;

/// System message sent ahead of every prompt.
pub const SYSTEM_PROMPT: &str = "Anda adalah asisten ahli dalam menganalisis dokumen hukum dan kontrak.";

const GENERAL_SUMMARY_TEMPLATE: &str = "Berikan ringkasan umum dari kontrak berikut ini:\n\n";

const KEY_CLAUSES_TEMPLATE: &str = "Identifikasi dan jelaskan klausul-klausul penting (seperti durasi kontrak, syarat pembayaran, kewajiban utama, dan kondisi pengakhiran) dalam kontrak berikut:\n\n";

const RISK_IDENTIFICATION_TEMPLATE: &str = "Analisis kontrak berikut dan identifikasi potensi risiko atau area yang mungkin merugikan bagi salah satu pihak:\n\n";

const PARTY_IDENTIFICATION_TEMPLATE: &str = "Sebutkan semua pihak yang terlibat dalam kontrak berikut beserta peran mereka:\n\n";

const QUESTION_CONTEXT_TEMPLATE: &str = "Berdasarkan konteks dari kontrak berikut:\n\n{contract}\n\nJawab pertanyaan ini: {question}";

/// Instruction templates, one per analysis mode
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub general_summary: String,
    pub key_clauses: String,
    pub risk_identification: String,
    pub party_identification: String,
    pub specific_question: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            general_summary: GENERAL_SUMMARY_TEMPLATE.to_string(),
            key_clauses: KEY_CLAUSES_TEMPLATE.to_string(),
            risk_identification: RISK_IDENTIFICATION_TEMPLATE.to_string(),
            party_identification: PARTY_IDENTIFICATION_TEMPLATE.to_string(),
            specific_question: QUESTION_CONTEXT_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Fixed instruction prefix for the modes that simply prepend one.
    pub fn instruction(&self, mode: AnalysisMode) -> Option<&str> {
        match mode {
            AnalysisMode::GeneralSummary => Some(self.general_summary.as_str()),
            AnalysisMode::KeyClauses => Some(self.key_clauses.as_str()),
            AnalysisMode::RiskIdentification => Some(self.risk_identification.as_str()),
            AnalysisMode::PartyIdentification => Some(self.party_identification.as_str()),
            AnalysisMode::SpecificQuestion => None,
        }
    }

    /// Build the user prompt. The question is only read in question mode.
    pub fn render(&self, mode: AnalysisMode, contract_text: &str, question: Option<&str>) -> Result<String> {
        let prompt = match self.instruction(mode) {
            Some(instruction) => {
                let mut prompt = String::with_capacity(instruction.len() + contract_text.len());
                prompt.push_str(instruction);
                prompt.push_str(contract_text);
                prompt
            }
            None => {
                let question = question
                    .filter(|q| !q.trim().is_empty())
                    .ok_or(ContractAnalyzerError::QuestionRequired)?;
                // Placeholders inside the contract text itself must stay literal
                let (head, tail) = self
                    .specific_question
                    .split_once("{contract}")
                    .unwrap_or((self.specific_question.as_str(), ""));
                let mut prompt = String::from(head);
                prompt.push_str(contract_text);
                match tail.split_once("{question}") {
                    Some((between, after)) => {
                        prompt.push_str(between);
                        prompt.push_str(question);
                        prompt.push_str(after);
                    }
                    None => {
                        prompt.push_str(tail);
                        prompt.push_str(question);
                    }
                }
                prompt
            }
        };

        debug!("Built {} prompt ({} chars)", mode.cli_name(), prompt.len());
        Ok(prompt)
    }
}

/// Prompt for `mode` using the built-in templates.
pub fn build_prompt(mode: AnalysisMode, contract_text: &str, question: Option<&str>) -> Result<String> {
    PromptTemplates::default().render(mode, contract_text, question)
}
