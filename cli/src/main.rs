mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{handle_bridge, handle_plan, handle_sim, utils::load_config, Cli, Commands};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let usage = cli.command.usage_hint();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[planner] error: {:#}", e);
            if let Some(usage) = usage {
                eprintln!("{}", usage);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Plan { items, poi, frame } => {
            let config = load_config(cli.config.as_deref())?;
            handle_plan(&config, &items, &poi, frame.as_deref())?;
        }
        Commands::Bridge { once, timeout_s } => {
            let config = load_config(cli.config.as_deref())?;
            handle_bridge(&config, once, timeout_s).await?;
        }
        Commands::Sim => {
            handle_sim()?;
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries only path JSON.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
