//! Formatters for match responses

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::processing::matcher::{MatchLevel, MatchResponse};
use colored::Colorize;
use std::fmt::Write;

pub trait OutputFormatter {
    fn format_response(&self, response: &MatchResponse) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn level_label(&self, level: MatchLevel) -> String {
        let label = match level {
            MatchLevel::High => "High",
            MatchLevel::Medium => "Medium",
            MatchLevel::Low => "Low",
        };
        if !self.use_colors {
            return label.to_string();
        }
        match level {
            MatchLevel::High => label.green().bold().to_string(),
            MatchLevel::Medium => label.yellow().to_string(),
            MatchLevel::Low => label.red().to_string(),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_response(&self, response: &MatchResponse) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "Ranked matches:").ok();
        for (rank, result) in response.matches.iter().enumerate() {
            writeln!(
                out,
                "  {}. {}: {:.2}% [{}]",
                rank + 1,
                result.filename,
                result.score,
                self.level_label(result.match_level)
            )
            .ok();
            writeln!(
                out,
                "     keyword overlap: {:.2}% linguistic, {:.2}% stop-word",
                result.linguistic_overlap, result.stopword_overlap
            )
            .ok();
        }

        writeln!(
            out,
            "\nProcessed {} resume(s); job description has {} token(s)",
            response.total_resumes_processed, response.job_description_length
        )
        .ok();

        if !response.failed_files.is_empty() {
            let heading = if self.use_colors {
                "Failed to extract:".red().to_string()
            } else {
                "Failed to extract:".to_string()
            };
            writeln!(out, "{}", heading).ok();
            for filename in &response.failed_files {
                writeln!(out, "  - {}", filename).ok();
            }
        }

        Ok(out)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_response(&self, response: &MatchResponse) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(response)?
        } else {
            serde_json::to_string(response)?
        };
        Ok(rendered)
    }
}

/// Formatter for the configured output format.
pub fn for_format(format: OutputFormat, output: &OutputConfig) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(output.color_output)),
        OutputFormat::Json => Box::new(JsonFormatter::new(output.pretty_json)),
    }
}
