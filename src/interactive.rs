//! Line-oriented terminal session driving `Session` events

use crate::config::{Config, OutputConfig};
use crate::error::{ContractAnalyzerError, Result};
use crate::input::InputManager;
use crate::llm::{AnalysisMode, CompletionClient};
use crate::output::formatter::{format_from_path, resolve_output_path, save_report_to_file};
use crate::output::{AnalysisReport, ReportGenerator};
use crate::session::{Notice, Session, SessionEvent};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use unicode_segmentation::UnicodeSegmentation;

const HELP: &str = "\
Commands:
  key <api-key>      set the OpenAI API key
  open <path>        load a PDF document and extract its text
  mode <name|1-5>    choose the analysis mode (see `modes`)
  ask <question>     set the question for the question mode
  run                start the analysis
  text               show the full extracted text
  save <path>        save the last result (.txt, .json, .md, .html)
  status             show the current session state
  modes              list analysis modes
  reset              forget the document, question, and result
  help               show this help
  quit               leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Key(String),
    Open(PathBuf),
    Mode(String),
    Ask(String),
    Run,
    Text,
    Save(PathBuf),
    Status,
    Modes,
    Reset,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "key" => Command::Key(rest.to_string()),
        "open" | "upload" if !rest.is_empty() => Command::Open(PathBuf::from(rest)),
        "mode" if !rest.is_empty() => Command::Mode(rest.to_string()),
        "ask" | "question" => Command::Ask(rest.to_string()),
        "run" | "analyze" => Command::Run,
        "text" => Command::Text,
        "save" if !rest.is_empty() => Command::Save(PathBuf::from(rest)),
        "status" => Command::Status,
        "modes" => Command::Modes,
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}

/// First `max` grapheme clusters of `text`, and whether anything was cut.
pub fn preview(text: &str, max: usize) -> (String, bool) {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(max).collect();
    let truncated = graphemes.next().is_some();
    (head, truncated)
}

/// Terminal rendering of a notice; analysis results are rendered separately.
pub fn render_notice(notice: &Notice, output: &OutputConfig) -> String {
    let paint = |symbol: &str, text: &str, color: colored::Color| {
        if output.color_output {
            format!("{} {}", symbol.color(color).bold(), text.color(color))
        } else {
            format!("{} {}", symbol, text)
        }
    };

    match notice {
        Notice::Info(text) => paint("ℹ", text, colored::Color::Cyan),
        Notice::Success(text) => paint("✔", text, colored::Color::Green),
        Notice::Warning(text) => paint("⚠", text, colored::Color::Yellow),
        Notice::Error(text) => paint("✖", text, colored::Color::Red),
        Notice::ExtractedText(text) => {
            if !output.show_extracted_text {
                return String::new();
            }
            let (head, truncated) = preview(text, output.preview_chars);
            let mut rendered = format!("--- Teks Kontrak ---\n{}", head);
            if truncated {
                rendered.push_str("\n... (use `text` to show everything)");
            }
            rendered.push_str("\n--------------------");
            rendered
        }
        Notice::AnalysisResult(result) => result.text.clone(),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub struct TerminalSession<C: CompletionClient> {
    session: Session<C>,
    input: InputManager,
    config: Config,
    reports: ReportGenerator,
}

impl<C: CompletionClient> TerminalSession<C> {
    pub fn new(session: Session<C>, config: Config) -> Self {
        let reports = ReportGenerator::with_options(config.output.color_output, true, true, true);
        Self {
            session,
            input: InputManager::new(),
            config,
            reports,
        }
    }

    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("{}", "Analisis Dokumen Kontrak".bold());
        println!("Type `help` for the list of commands.");
        if !self.session.context().has_api_key() {
            println!("{}", render_notice(&Notice::Warning("Enter your OpenAI API key with `key <api-key>`".to_string()), &self.config.output));
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::Write::flush(&mut std::io::stdout())?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let Some(command) = parse_command(&line) else {
                continue;
            };
            if command == Command::Quit {
                break;
            }
            self.handle(command).await;
        }
        Ok(())
    }

    pub async fn open(&mut self, path: PathBuf) {
        self.handle(Command::Open(path)).await;
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Key(key) => {
                let progress = if self.session.context().extraction_pending() {
                    "Extracting text from document..."
                } else {
                    ""
                };
                self.dispatch(SessionEvent::SetApiKey(key), progress).await
            }
            Command::Open(path) => {
                debug!("Opening {}", path.display());
                match self.input.load(&path).await {
                    Ok(document) => {
                        let progress = if self.session.context().has_api_key() {
                            "Extracting text from document..."
                        } else {
                            ""
                        };
                        self.dispatch(SessionEvent::Upload(document), progress).await
                    }
                    Err(e) => self.print(&Notice::from_error("Failed to open file", &e)),
                }
            }
            Command::Mode(name) => match name.parse::<AnalysisMode>() {
                Ok(mode) => self.dispatch(SessionEvent::SelectMode(mode), "").await,
                Err(e) => self.print(&Notice::Warning(e.to_string())),
            },
            Command::Ask(question) => self.dispatch(SessionEvent::SetQuestion(question), "").await,
            Command::Run => {
                self.dispatch(SessionEvent::StartAnalysis, "Analyzing document... this may take a moment").await
            }
            Command::Text => match &self.session.context().extracted {
                Some(extracted) => println!("{}", extracted.text),
                None => self.print(&Notice::Warning("No extracted text yet".to_string())),
            },
            Command::Save(path) => {
                if let Err(e) = self.save(&path) {
                    self.print(&Notice::from_error("Failed to save report", &e));
                }
            }
            Command::Status => self.print_status(),
            Command::Modes => print_modes(),
            Command::Reset => self.dispatch(SessionEvent::Reset, "").await,
            Command::Help => println!("{}", HELP),
            Command::Quit => {}
            Command::Unknown(line) => {
                self.print(&Notice::Warning(format!("Unknown command: {} (type `help`)", line)))
            }
        }
    }

    async fn dispatch(&mut self, event: SessionEvent, progress: &str) {
        let pb = (!progress.is_empty()).then(|| spinner(progress));
        let notices = self.session.dispatch(event).await;
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        for notice in &notices {
            match notice {
                Notice::AnalysisResult(_) => match self.current_report() {
                    Some(report) => match self.reports.generate_report(&report, &crate::config::OutputFormat::Console) {
                        Ok(text) => println!("{}", text),
                        Err(e) => self.print(&Notice::from_error("Failed to render result", &e)),
                    },
                    None => println!("{}", render_notice(notice, &self.config.output)),
                },
                _ => self.print(notice),
            }
        }
    }

    fn print(&self, notice: &Notice) {
        let rendered = render_notice(notice, &self.config.output);
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
    }

    fn current_report(&self) -> Option<AnalysisReport> {
        let context = self.session.context();
        let result = context.last_result.as_ref()?;
        let extracted = context.extracted.as_ref()?;
        let name = context.document.as_ref().map(|d| d.name.as_str()).unwrap_or("document");
        Some(AnalysisReport::new(name, extracted, result, context.question_for_mode()))
    }

    fn save(&self, path: &std::path::Path) -> Result<()> {
        let report = self.current_report().ok_or_else(|| {
            ContractAnalyzerError::InvalidInput("There is no analysis result to save yet".to_string())
        })?;
        let format = format_from_path(path).unwrap_or(self.config.output.format);
        let path = resolve_output_path(path, &format, &report.document.name);
        // Saved files never carry terminal color codes
        let generator = ReportGenerator::with_options(false, true, true, true);
        let content = generator.generate_report(&report, &format)?;
        save_report_to_file(&content, &path)?;
        self.print(&Notice::Success(format!("Saved {}", path.display())));
        Ok(())
    }

    fn print_status(&self) {
        let context = self.session.context();
        println!("API key:   {}", if context.has_api_key() { "set" } else { "not set" });
        match (&context.document, &context.extracted) {
            (Some(doc), Some(text)) => println!("Document:  {} ({} pages, {} characters)", doc.name, text.page_count, text.char_count()),
            (Some(doc), None) => println!("Document:  {} (waiting for API key)", doc.name),
            _ => println!("Document:  none"),
        }
        println!("Mode:      {}", context.mode.label());
        if context.mode.requires_question() {
            let question = if context.has_question() { context.question.as_str() } else { "(none)" };
            println!("Question:  {}", question);
        }
        println!("Model:     {}", self.session.analyzer().model());
        println!("Result:    {}", if context.last_result.is_some() { "available" } else { "none" });
    }
}

pub fn print_modes() {
    for (i, mode) in AnalysisMode::ALL.iter().enumerate() {
        println!("  {}. {:<34} [{}] {}", i + 1, mode.label(), mode.cli_name(), mode.description());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("key sk-abc"), Some(Command::Key("sk-abc".to_string())));
        assert_eq!(parse_command("open /tmp/kontrak sewa.pdf"), Some(Command::Open(PathBuf::from("/tmp/kontrak sewa.pdf"))));
        assert_eq!(parse_command("mode 4"), Some(Command::Mode("4".to_string())));
        assert_eq!(parse_command("ask Kapan kontrak berakhir?"), Some(Command::Ask("Kapan kontrak berakhir?".to_string())));
        assert_eq!(parse_command("RUN"), Some(Command::Run));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn test_commands_missing_arguments_are_unknown() {
        assert_eq!(parse_command("open"), Some(Command::Unknown("open".to_string())));
        assert_eq!(parse_command("save"), Some(Command::Unknown("save".to_string())));
    }

    #[test]
    fn test_preview_respects_graphemes() {
        let (head, truncated) = preview("Pihak Pertama é́ dan Kedua", 15);
        assert_eq!(head.graphemes(true).count(), 15);
        assert!(truncated);

        let (head, truncated) = preview("short", 10);
        assert_eq!(head, "short");
        assert!(!truncated);
    }

    #[test]
    fn test_render_plain_notices() {
        let mut output = Config::default().output;
        output.color_output = false;
        assert_eq!(render_notice(&Notice::Warning("Enter key".to_string()), &output), "⚠ Enter key");

        output.preview_chars = 4;
        let rendered = render_notice(&Notice::ExtractedText("Kontrak sewa".to_string()), &output);
        assert!(rendered.contains("Kont\n..."));

        output.show_extracted_text = false;
        assert!(render_notice(&Notice::ExtractedText("x".to_string()), &output).is_empty());
    }
}
