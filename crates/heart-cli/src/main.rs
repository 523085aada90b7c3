//! Heart Hands - collect, train and detect the two-hand heart gesture

mod cli;
mod commands;
mod config;
mod controls;
mod display;
mod source;

use std::io;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    // Logs go to stderr; stdout carries the status view
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::load_or_default(cli.config.as_deref())
        .context("cannot load configuration")?;

    match cli.command {
        Commands::Collect {
            replay,
            dataset,
            headless,
            auto_label,
            fps,
        } => commands::run_collect(
            &config,
            replay,
            dataset,
            commands::CollectOptions {
                headless,
                auto_label: auto_label.map(Into::into),
                fps,
            },
        ),
        Commands::Train { dataset } => commands::run_train(&config, dataset),
        Commands::Detect {
            replay,
            headless,
            threshold,
        } => commands::run_detect(&config, replay, headless, threshold),
    }
}
