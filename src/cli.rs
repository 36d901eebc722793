//! CLI interface for the resume matcher

use crate::config::{OutputFormat, SimilarityStrategy};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Score resumes against a job description by textual similarity")]
#[command(
    long_about = "Rank candidate resumes against a job description using TF-IDF or \
                  embedding similarity, with per-document keyword overlap diagnostics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score resume files against a job description
    Match {
        /// Path to the job description text file
        #[arg(short, long)]
        job: PathBuf,

        /// Resume files to score (PDF, DOCX, TXT)
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Similarity strategy: lexical or semantic
        #[arg(short, long)]
        strategy: Option<String>,

        /// Output format: console or json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Show or reset configuration
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
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}

/// Parse and validate similarity strategy
pub fn parse_strategy(name: &str) -> Result<SimilarityStrategy, String> {
    match name.to_lowercase().as_str() {
        "lexical" => Ok(SimilarityStrategy::Lexical),
        "semantic" => Ok(SimilarityStrategy::Semantic),
        _ => Err(format!(
            "Invalid strategy: {}. Supported: lexical, semantic",
            name
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_formats_parse_case_insensitively() {
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("console").unwrap(), OutputFormat::Console);
        assert!(parse_output_format("yaml").is_err());
    }

    #[test]
    fn strategies_parse_case_insensitively() {
        assert_eq!(parse_strategy("Lexical").unwrap(), SimilarityStrategy::Lexical);
        assert_eq!(parse_strategy("semantic").unwrap(), SimilarityStrategy::Semantic);
        assert!(parse_strategy("hybrid").is_err());
    }
}
