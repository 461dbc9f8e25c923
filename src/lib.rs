//! Contract analyzer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod interactive;
pub mod llm;
pub mod output;
pub mod session;

pub use error::{ContractAnalyzerError, Result};
pub use config::Config;
