//! CLI interface for the contract analyzer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "contract-analyzer")]
#[command(about = "AI-assisted contract document analysis")]
#[command(long_about = "Extract the text of a PDF contract and ask a hosted language model for a summary, key clauses, risks, parties, or an answer to a specific question")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive analysis session (default)
    Session {
        /// OpenAI API key (falls back to the configured environment variable)
        #[arg(long)]
        api_key: Option<String>,

        /// PDF document to open at start
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Extract and print the text of a PDF document
    Extract {
        /// Path to the PDF file
        file: PathBuf,

        /// OpenAI API key (falls back to the configured environment variable)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Run a single analysis on a PDF document
    Analyze {
        /// Path to the PDF file
        file: PathBuf,

        /// Analysis mode: summary, clauses, risks, parties, question (or 1-5)
        #[arg(short, long, default_value = "summary")]
        mode: String,

        /// Question to answer (required for the question mode)
        #[arg(short, long)]
        question: Option<String>,

        /// OpenAI API key (falls back to the configured environment variable)
        #[arg(long)]
        api_key: Option<String>,

        /// Override the configured model
        #[arg(long)]
        model: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// List the available analysis modes
    Modes,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" | "text" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_arguments() {
        let cli = Cli::parse_from([
            "contract-analyzer", "analyze", "kontrak.pdf", "--mode", "question", "--question", "Siapa pihaknya?",
        ]);
        match cli.command {
            Some(Commands::Analyze { file, mode, question, .. }) => {
                assert_eq!(file, PathBuf::from("kontrak.pdf"));
                assert_eq!(mode, "question");
                assert_eq!(question.as_deref(), Some("Siapa pihaknya?"));
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_extract_accepts_api_key() {
        let cli = Cli::parse_from(["contract-analyzer", "extract", "kontrak.pdf", "--api-key", "sk-test"]);
        match cli.command {
            Some(Commands::Extract { file, api_key }) => {
                assert_eq!(file, PathBuf::from("kontrak.pdf"));
                assert_eq!(api_key.as_deref(), Some("sk-test"));
            }
            _ => panic!("expected extract command"),
        }
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::parse_from(["contract-analyzer", "--verbose"]);
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(parse_output_format("MD").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("pdf").is_err());
        assert!(validate_file_extension(Path::new("a.PDF"), &["pdf"]).is_ok());
        assert!(validate_file_extension(Path::new("a.docx"), &["pdf"]).is_err());
    }
}
