//! Contract analysis: prompt building plus one completion call

use crate::config::{CompletionConfig, Config};
use crate::error::{ContractAnalyzerError, Result};
use crate::llm::client::{CompletionClient, CompletionRequest, OpenAiClient};
use crate::llm::mode::AnalysisMode;
use crate::llm::prompts::PromptTemplates;
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Text returned by the model, kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub mode: AnalysisMode,
    pub model: String,
    pub temperature: f32,
    pub text: String,
    pub processing_time_ms: u64,
}

pub struct ContractAnalyzer<C: CompletionClient> {
    client: C,
    prompt_templates: PromptTemplates,
    model: String,
    temperature: f32,
}

impl ContractAnalyzer<OpenAiClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = OpenAiClient::new(&config.completion)?;
        Ok(Self::new(client, &config.completion))
    }
}

impl<C: CompletionClient> ContractAnalyzer<C> {
    pub fn new(client: C, config: &CompletionConfig) -> Self {
        Self {
            client,
            prompt_templates: PromptTemplates::default(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fails with `QuestionRequired` before any request exists.
    pub fn build_request(
        &self,
        mode: AnalysisMode,
        contract_text: &str,
        question: Option<&str>,
    ) -> Result<CompletionRequest> {
        let prompt = self.prompt_templates.render(mode, contract_text, question)?;
        Ok(CompletionRequest::for_prompt(&self.model, self.temperature, prompt))
    }

    pub async fn analyze(
        &self,
        api_key: &str,
        mode: AnalysisMode,
        contract_text: &str,
        question: Option<&str>,
    ) -> Result<AnalysisResult> {
        if api_key.trim().is_empty() {
            return Err(ContractAnalyzerError::MissingApiKey);
        }

        let start_time = Instant::now();
        let request = self.build_request(mode, contract_text, question)?;

        info!("Running '{}' analysis with {}", mode.label(), self.model);
        let text = self.client.complete(api_key, &request).await?;

        Ok(AnalysisResult {
            mode,
            model: self.model.clone(),
            temperature: self.temperature,
            text,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}
