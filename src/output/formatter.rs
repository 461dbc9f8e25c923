//! Output formatters for analysis reports

use crate::config::OutputFormat;
use crate::error::{ContractAnalyzerError, Result};
use crate::output::report::AnalysisReport;
use askama::Template;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Dispatches to the formatter matching the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="id">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Analisis Dokumen Kontrak - {{ document_name }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        h1 { color: #007acc; border-bottom: 3px solid #007acc; padding-bottom: 10px; }
        .question { background: #eef6fb; padding: 10px 15px; border-left: 4px solid #007acc; }
        .result { white-space: pre-wrap; font-family: inherit; }
        .metadata { color: #6c757d; font-size: 0.9em; border-top: 1px solid #e9ecef; margin-top: 30px; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <h1>{{ mode_label }}</h1>
        <p><strong>Dokumen:</strong> {{ document_name }} ({{ page_count }} halaman, {{ word_count }} kata)</p>
        {% if has_question %}
        <p class="question"><strong>Pertanyaan:</strong> {{ question }}</p>
        {% endif %}
        <h2>Hasil Analisis</h2>
        <pre class="result">{{ result }}</pre>
        <div class="metadata">
            <p>Generated {{ generated_at }} by Contract Analyzer v{{ version }}</p>
            <p>Model: {{ model }} | Temperature: {{ temperature }} | {{ processing_time }}ms</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    document_name: String,
    page_count: usize,
    word_count: usize,
    mode_label: String,
    has_question: bool,
    question: String,
    result: String,
    generated_at: String,
    version: String,
    model: String,
    temperature: String,
    processing_time: u64,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("📄 {}", report.analysis.mode_label), 1));
        output.push_str(&format!(
            "Document: {} | {} pages | {} words\n",
            self.colorize(&report.document.name, Color::Cyan),
            report.document.page_count,
            report.document.word_count
        ));

        if let Some(question) = &report.analysis.question {
            output.push_str(&format!("Question: {}\n", self.colorize(question, Color::Yellow)));
        }

        output.push_str(&self.format_header("Hasil Analisis", 2));
        output.push_str(&report.analysis.result);
        output.push('\n');

        output.push_str(&format!(
            "\n{}\n",
            self.colorize(
                &format!(
                    "{} | {} (temperature {}) | {}ms",
                    report.generated_at_display(),
                    report.metadata.model,
                    report.metadata.temperature,
                    report.metadata.processing_time_ms
                ),
                Color::BrightBlack
            )
        ));

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", report.analysis.mode_label));
        output.push_str(&format!(
            "**Dokumen:** `{}` | **Halaman:** {} | **Kata:** {}\n\n",
            report.document.name, report.document.page_count, report.document.word_count
        ));

        if let Some(question) = &report.analysis.question {
            output.push_str(&format!("> **Pertanyaan:** {}\n\n", question));
        }

        output.push_str("## Hasil Analisis\n\n");
        output.push_str(&report.analysis.result);
        output.push_str("\n\n");

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated {} by Contract Analyzer v{} using {} (temperature {}, {}ms)*\n",
                report.generated_at_display(),
                report.metadata.analyzer_version,
                report.metadata.model,
                report.metadata.temperature,
                report.metadata.processing_time_ms
            ));
        }

        Ok(output)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        HtmlTemplate {
            include_styles: self.include_styles,
            document_name: report.document.name.clone(),
            page_count: report.document.page_count,
            word_count: report.document.word_count,
            mode_label: report.analysis.mode_label.clone(),
            has_question: report.analysis.question.is_some(),
            question: report.analysis.question.clone().unwrap_or_default(),
            result: report.analysis.result.clone(),
            generated_at: report.generated_at_display(),
            version: report.metadata.analyzer_version.clone(),
            model: report.metadata.model.clone(),
            temperature: format!("{}", report.metadata.temperature),
            processing_time: report.metadata.processing_time_ms,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ContractAnalyzerError::OutputFormatting(e.to_string()))
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, document_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(document_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_analysis{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_analysis{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_analysis{}.md", base_name, timestamp_suffix),
        OutputFormat::Html => format!("{}_analysis{}.html", base_name, timestamp_suffix),
    }
}

/// Where a report lands: a directory gets a generated file name inside it.
pub fn resolve_output_path(path: &Path, format: &OutputFormat, document_name: &str) -> PathBuf {
    if path.is_dir() {
        path.join(suggest_filename(format, document_name, true))
    } else {
        path.to_path_buf()
    }
}

/// Format implied by a file extension, if any.
pub fn format_from_path(path: &Path) -> Option<OutputFormat> {
    match path.extension()?.to_str()?.to_lowercase().as_str() {
        "json" => Some(OutputFormat::Json),
        "md" | "markdown" => Some(OutputFormat::Markdown),
        "html" | "htm" => Some(OutputFormat::Html),
        "txt" => Some(OutputFormat::Console),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ExtractedText;
    use crate::llm::{AnalysisMode, AnalysisResult};

    fn sample_report(mode: AnalysisMode, text: &str, question: Option<&str>) -> AnalysisReport {
        let extracted = ExtractedText::from_pages(vec!["Party A agrees to pay Party B $100 monthly.".to_string()]);
        let result = AnalysisResult {
            mode,
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.5,
            text: text.to_string(),
            processing_time_ms: 42,
        };
        AnalysisReport::new("sewa.pdf", &extracted, &result, question)
    }

    #[test]
    fn test_console_output_contains_result_verbatim() {
        let report = sample_report(AnalysisMode::PartyIdentification, "1. Party A - payer\n2. Party B - payee", None);
        let output = ConsoleFormatter::new(false).format_report(&report).unwrap();
        assert!(output.contains("Identifikasi Pihak yang Terlibat"));
        assert!(output.contains("1. Party A - payer\n2. Party B - payee"));
        assert!(output.contains("sewa.pdf"));
    }

    #[test]
    fn test_json_roundtrips_result_text() {
        let report = sample_report(AnalysisMode::GeneralSummary, "Ringkasan: sewa bulanan.", None);
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["analysis"]["result"], "Ringkasan: sewa bulanan.");
        assert_eq!(value["analysis"]["mode"], "general_summary");
        assert_eq!(value["document"]["page_count"], 1);
    }

    #[test]
    fn test_question_only_reported_in_question_mode() {
        let report = sample_report(AnalysisMode::RiskIdentification, "Risiko", Some("ignored?"));
        assert!(report.analysis.question.is_none());

        let report = sample_report(AnalysisMode::SpecificQuestion, "Rp100", Some("Berapa?"));
        let markdown = MarkdownFormatter::new(false).format_report(&report).unwrap();
        assert!(markdown.contains("> **Pertanyaan:** Berapa?"));
        assert!(!markdown.contains("Contract Analyzer v"));
    }

    #[test]
    fn test_html_escapes_model_output() {
        let report = sample_report(AnalysisMode::GeneralSummary, "<script>alert(1)</script>", None);
        let html = HtmlFormatter::new(false).format_report(&report).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&#60;script&#62;alert(1)&#60;/script&#62;"));
        assert!(!html.contains("<style>"));
    }

    #[test]
    fn test_filename_and_format_detection() {
        assert_eq!(suggest_filename(&OutputFormat::Markdown, "kontrak sewa.pdf", false), "kontrak sewa_analysis.md");
        assert_eq!(format_from_path(Path::new("out/report.JSON")), Some(OutputFormat::Json));
        assert_eq!(format_from_path(Path::new("report.pdf")), None);
    }

    #[test]
    fn test_directory_target_gets_generated_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = resolve_output_path(dir.path(), &OutputFormat::Json, "kontrak.pdf");
        assert_eq!(path.parent(), Some(dir.path()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("kontrak_analysis_"));
        assert!(name.ends_with(".json"));

        let file = dir.path().join("hasil.md");
        assert_eq!(resolve_output_path(&file, &OutputFormat::Json, "kontrak.pdf"), file);
    }
}
