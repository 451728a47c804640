// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dots and Boxes CLI
//!
//! Runs a local conductor with a set of agents and a REPL acting on
//! their behalf.

use anyhow::{Context, Result};
use clap::Parser;
use dots_cli::{Command, Repl, Reply};
use dots_network::{config, Conductor, ConductorConfig};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use std::path::PathBuf;
use tokio::io::AsyncBufReadExt;
use tokio::signal;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::prelude::*;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(name = "dots-cli", about = "Dots and Boxes command-line interface", version)]
struct Args {
    /// Config file, defaults to the platform config directory
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Dots per side for new games
    #[clap(short, long)]
    size: Option<u8>,

    /// Agents to start, the first one is the acting agent
    #[clap(short, long = "agent")]
    agents: Vec<String>,

    /// Log to stderr at debug level instead of the log file
    #[clap(long)]
    debug: bool,
}

/// Rotating log files under `./logs`, fed by tracing's `log` records
fn init_file_logging(filter: &str) -> Result<LoggerHandle> {
    let log_dir = PathBuf::from("logs");
    std::fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let handle = Logger::try_with_env_or_str(filter)?
        .log_to_file(
            FileSpec::default()
                .directory(&log_dir)
                .basename("dots-cli")
                .suffix("log"),
        )
        .rotate(
            Criterion::Size(10 * 1024 * 1024),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(5),
        )
        .start()?;
    Ok(handle)
}

fn init_stderr_logging(filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_error::ErrorLayer::default())
        .init();
}

fn load_config(args: &Args) -> Result<ConductorConfig> {
    let mut config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    if let Some(size) = args.size {
        config.board_size = size;
    }
    if !args.agents.is_empty() {
        config.agents = args.agents.clone();
    }
    if args.debug {
        config.log_filter = "debug".to_string();
    }
    config.validate()?;
    Ok(config)
}

fn print_prompt(repl: &Repl) {
    if let Err(e) = repl.write_prompt(&mut std::io::stdout()) {
        tracing::warn!(error = %e, "Failed to write prompt");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    // Keep the handle alive so the file logger flushes on exit
    let _logger = if args.debug {
        init_stderr_logging(&config.log_filter);
        None
    } else {
        match init_file_logging(&config.log_filter) {
            Ok(handle) => Some(handle),
            Err(e) => {
                eprintln!("Warning: Failed to initialize logging: {}", e);
                None
            }
        }
    };

    let acting = config
        .agents
        .first()
        .cloned()
        .context("At least one agent is required")?;
    let conductor = Conductor::new(config)?;
    let mut events = conductor.subscribe();
    let mut repl = Repl::new(conductor, &acting);

    println!("Dots and Boxes, acting as {}. Type 'help' for commands.", acting);
    print_prompt(&repl);

    let mut stdin_lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                println!("\nReceived Ctrl+C, shutting down...");
                break;
            }

            result = stdin_lines.next_line() => {
                let line = match result {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        eprintln!("Error reading input: {}", e);
                        continue;
                    }
                };
                if line.trim().is_empty() {
                    print_prompt(&repl);
                    continue;
                }

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{}", e);
                        print_prompt(&repl);
                        continue;
                    }
                };

                match repl.execute(command) {
                    Ok(Reply::Exit) => break,
                    Ok(Reply::Text(text)) => println!("{}", text),
                    Err(e) => eprintln!("Error: {:#}", e),
                }
                print_prompt(&repl);
            }

            event = events.recv() => {
                match event {
                    Ok(event) => {
                        tracing::info!(event = ?event, "Conductor event");
                        if args.debug {
                            println!("{}", repl.describe(&event));
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Event receiver lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    Ok(())
}
