//! LLM integration module

pub mod analyzer;
pub mod client;
pub mod mode;
pub mod prompts;

pub use analyzer::{AnalysisResult, ContractAnalyzer};
pub use client::{CompletionClient, CompletionRequest, OpenAiClient};
pub use mode::AnalysisMode;
