//! Resume matcher: score candidate resumes against a job description

mod cli;
mod config;
mod error;
mod input;
mod output;
mod processing;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::Config;
use error::{MatcherError, Result};
use input::manager::InputManager;
use log::{error, info};
use processing::matcher::{MatchEngine, MatchRequest};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(if e.is_client_error() { 2 } else { 1 });
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Match {
            job,
            resumes,
            strategy,
            output,
        } => {
            if let Some(name) = strategy {
                config.similarity.strategy =
                    cli::parse_strategy(&name).map_err(MatcherError::InvalidInput)?;
            }
            let output_format =
                cli::parse_output_format(&output).map_err(MatcherError::InvalidInput)?;

            info!(
                "Scoring {} resume(s) against {}",
                resumes.len(),
                job.display()
            );

            let manager = InputManager::new();
            let job_description = manager.load_query(&job).await?;
            let uploads = manager.load_documents(&resumes).await?;

            let engine = MatchEngine::from_config(&config)?;
            let response = engine.score_documents(&MatchRequest {
                job_description,
                resumes: uploads,
            })?;

            let formatter = output::formatter::for_format(output_format, &config.output);
            println!("{}", formatter.format_response(&response)?);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save()?;
                println!("Configuration reset to defaults");
            }
            Some(ConfigAction::Show) | None => {
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    MatcherError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", rendered);
            }
        },
    }

    Ok(())
}
