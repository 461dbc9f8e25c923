//! Configuration management for the contract analyzer

use crate::error::{ContractAnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub completion: CompletionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Environment variable consulted for the API key when none is given explicitly
    pub api_key_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub show_extracted_text: bool,
    pub preview_chars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            completion: CompletionConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                model: DEFAULT_MODEL.to_string(),
                temperature: DEFAULT_TEMPERATURE,
                timeout_secs: 120,
                api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                show_extracted_text: true,
                preview_chars: 1500,
            },
        }
    }
}

impl Config {
    /// Load `config_path`, writing defaults there on first use.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ContractAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ContractAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("contract-analyzer")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.completion.model.trim().is_empty() {
            return Err(ContractAnalyzerError::Configuration("completion.model must not be empty".to_string()));
        }
        if self.completion.base_url.trim().is_empty() {
            return Err(ContractAnalyzerError::Configuration("completion.base_url must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.completion.temperature) {
            return Err(ContractAnalyzerError::Configuration(format!(
                "completion.temperature must be between 0 and 2, got {}",
                self.completion.temperature
            )));
        }
        Ok(())
    }

    /// API key from the configured environment variable, if set and non-empty.
    pub fn api_key_from_env(&self) -> Option<String> {
        std::env::var(&self.completion.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
