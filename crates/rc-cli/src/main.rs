use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rc_cli::commands::{config, memory, press};
use rc_cli::{Cli, Commands, Config, MemoryAction};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    config
        .calculator
        .validate()
        .context("invalid calculator settings")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Press { keys, trace, json } => {
            let mode = if json {
                press::OutputMode::Json
            } else if trace {
                press::OutputMode::Trace
            } else {
                press::OutputMode::Line
            };
            let rejected = press::run(&mut stdout, &config, &keys, mode)?;
            if rejected > 0 {
                tracing::debug!(rejected, "some keys were rejected");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Memory { action } => match action.unwrap_or(MemoryAction::Show) {
            MemoryAction::Show => memory::show(&mut stdout, &config)?,
            MemoryAction::Clear => memory::clear(&mut stdout, &config)?,
        },
        Commands::Config => config::run(&mut stdout, &config)?,
    }

    Ok(ExitCode::SUCCESS)
}
