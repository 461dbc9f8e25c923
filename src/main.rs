//! Contract analyzer: AI-assisted contract document analysis

use clap::Parser;
use contract_analyzer::cli::{self, Cli, Commands, ConfigAction};
use contract_analyzer::config::Config;
use contract_analyzer::error::{ContractAnalyzerError, Result};
use contract_analyzer::input::InputManager;
use contract_analyzer::interactive::{print_modes, render_notice, TerminalSession};
use contract_analyzer::llm::{AnalysisMode, ContractAnalyzer};
use contract_analyzer::output::formatter::{format_from_path, resolve_output_path, save_report_to_file};
use contract_analyzer::output::{AnalysisReport, ReportGenerator};
use contract_analyzer::session::{Notice, Session, SessionContext, SessionEvent};
use log::{error, info, warn};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; info lines would interleave with the session prompt
    let log_level = if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // Load configuration
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let command = cli.command.unwrap_or(Commands::Session {
        api_key: None,
        file: None,
    });

    // Execute command
    if let Err(e) = run_command(command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Session { api_key, file } => {
            let api_key = api_key.or_else(|| config.api_key_from_env());
            let analyzer = ContractAnalyzer::from_config(&config)?;
            let session = Session::with_context(analyzer, SessionContext::with_api_key(api_key));

            let mut terminal = TerminalSession::new(session, config);
            if let Some(file) = file {
                terminal.open(file).await;
            }
            terminal.run().await?;
        }

        Commands::Extract { file, api_key } => {
            if let Err(e) = cli::validate_file_extension(&file, &["pdf"]) {
                warn!("{}: {}", file.display(), e);
            }

            let api_key = api_key.or_else(|| config.api_key_from_env());
            let analyzer = ContractAnalyzer::from_config(&config)?;
            let mut session = Session::with_context(analyzer, SessionContext::with_api_key(api_key));

            let document = InputManager::new().load(&file).await?;
            let extracted = session.extract_document(document)?;
            info!("Extracted {} pages, {} characters", extracted.page_count, extracted.char_count());
            println!("{}", extracted.text);
        }

        Commands::Analyze {
            file,
            mode,
            question,
            api_key,
            model,
            output,
            save,
        } => {
            if let Err(e) = cli::validate_file_extension(&file, &["pdf"]) {
                warn!("{}: {}", file.display(), e);
            }

            let mode: AnalysisMode = mode.parse()?;
            let output_format = match (&output, &save) {
                (Some(format), _) => cli::parse_output_format(format)
                    .map_err(ContractAnalyzerError::InvalidInput)?,
                (None, Some(path)) => format_from_path(path).unwrap_or(config.output.format),
                (None, None) => config.output.format,
            };

            let api_key = api_key.or_else(|| config.api_key_from_env());
            let mut analyzer = ContractAnalyzer::from_config(&config)?;
            if let Some(model) = model {
                analyzer = analyzer.with_model(model);
            }
            let mut session = Session::with_context(analyzer, SessionContext::with_api_key(api_key));

            let document = InputManager::new().load(&file).await?;

            // Same event sequence as the interactive session, so the same gates apply
            let mut events = vec![SessionEvent::Upload(document), SessionEvent::SelectMode(mode)];
            if let Some(question) = question {
                events.push(SessionEvent::SetQuestion(question));
            }
            events.push(SessionEvent::StartAnalysis);

            let mut failure = None;
            for event in events {
                for notice in session.dispatch(event).await {
                    match &notice {
                        Notice::Warning(message) | Notice::Error(message) => {
                            eprintln!("{}", render_notice(&notice, &config.output));
                            failure.get_or_insert_with(|| message.clone());
                        }
                        Notice::Info(message) | Notice::Success(message) => info!("{}", message),
                        Notice::ExtractedText(_) | Notice::AnalysisResult(_) => {}
                    }
                }
                if failure.is_some() {
                    break;
                }
            }

            let context = session.context();
            let (Some(result), Some(extracted)) = (&context.last_result, &context.extracted) else {
                return Err(ContractAnalyzerError::Incomplete(
                    failure.unwrap_or_else(|| "no result was produced".to_string()),
                ));
            };

            let name = context
                .document
                .as_ref()
                .map(|d| d.name.clone())
                .unwrap_or_else(|| file.display().to_string());
            let report = AnalysisReport::new(&name, extracted, result, context.question_for_mode());

            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, true, true, true);
            let content = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = resolve_output_path(&path, &output_format, &report.document.name);
                    save_report_to_file(&content, &path)?;
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Modes => {
            println!("📚 Analysis modes\n");
            print_modes();
        }

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", config_path.display());
                    let content = toml::to_string_pretty(&config)
                        .map_err(|e| ContractAnalyzerError::Configuration(e.to_string()))?;
                    println!("{}", content);
                    let key_status = if config.api_key_from_env().is_some() { "set" } else { "not set" };
                    println!("API key (${}): {}", config.completion.api_key_env, key_status);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&config_path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", config_path.display());
                }
            }
        }
    }

    Ok(())
}
