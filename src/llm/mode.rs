//! Analysis modes offered to the user

use crate::error::{ContractAnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    GeneralSummary,
    KeyClauses,
    RiskIdentification,
    PartyIdentification,
    SpecificQuestion,
}

impl AnalysisMode {
    /// Display order of the selection control.
    pub const ALL: [AnalysisMode; 5] = [
        AnalysisMode::GeneralSummary,
        AnalysisMode::KeyClauses,
        AnalysisMode::RiskIdentification,
        AnalysisMode::PartyIdentification,
        AnalysisMode::SpecificQuestion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::GeneralSummary => "Ringkasan Umum",
            AnalysisMode::KeyClauses => "Identifikasi Klausul Penting",
            AnalysisMode::RiskIdentification => "Temukan Potensi Risiko",
            AnalysisMode::PartyIdentification => "Identifikasi Pihak yang Terlibat",
            AnalysisMode::SpecificQuestion => "Tanyakan Pertanyaan Spesifik",
        }
    }

    pub fn cli_name(&self) -> &'static str {
        match self {
            AnalysisMode::GeneralSummary => "summary",
            AnalysisMode::KeyClauses => "clauses",
            AnalysisMode::RiskIdentification => "risks",
            AnalysisMode::PartyIdentification => "parties",
            AnalysisMode::SpecificQuestion => "question",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AnalysisMode::GeneralSummary => "General summary of the contract",
            AnalysisMode::KeyClauses => "Duration, payment terms, key obligations and termination conditions",
            AnalysisMode::RiskIdentification => "Potential risks or terms disadvantageous to either party",
            AnalysisMode::PartyIdentification => "Parties involved and their roles",
            AnalysisMode::SpecificQuestion => "Answer a free-form question about the contract",
        }
    }

    pub fn requires_question(&self) -> bool {
        matches!(self, AnalysisMode::SpecificQuestion)
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Accepts the CLI name, the 1-based menu position, or the full label.
impl FromStr for AnalysisMode {
    type Err = ContractAnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();

        if let Ok(index) = needle.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| ContractAnalyzerError::InvalidInput(format!(
                    "Mode number must be between 1 and {}", Self::ALL.len()
                )));
        }

        let lowered = needle.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.cli_name() == lowered || mode.label().to_lowercase() == lowered)
            .ok_or_else(|| ContractAnalyzerError::InvalidInput(format!(
                "Unknown analysis mode: {}. Supported: summary, clauses, risks, parties, question",
                needle
            )))
    }
}
