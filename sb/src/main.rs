//! Snowball - micro-step task initiation coach
//!
//! CLI entry point. With no subcommand the TUI launches; `plan` runs one
//! breakdown in batch mode and prints it.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use snowball::cli::{Cli, Command};
use snowball::config::Config;
use snowball::domain::Route;
use snowball::llm::create_client;
use snowball::planner::Planner;
use snowball::prompts::PromptLoader;
use snowball::tui;

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    // The TUI owns stdout, so logs go to a file
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snowball")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = match cli_log_level.map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            other => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("snowball.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate()?;

    let llm = create_client(&config.llm)?;
    let prompts = PromptLoader::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let planner = Arc::new(Planner::new(llm, prompts, config.planner.clone()));

    match cli.command {
        Some(Command::Plan { goal, current, json }) => cmd_plan(&planner, &goal, &current, json).await,
        None => tui::run(&config, planner).await,
    }
}

/// Batch mode: one breakdown, printed to stdout
async fn cmd_plan(planner: &Planner, goal: &str, current: &str, json: bool) -> Result<()> {
    let steps = planner.breakdown_or_fallback(current, goal).await;
    let route = Route::new(current, goal, steps);

    if json {
        println!("{}", serde_json::to_string_pretty(&route)?);
        return Ok(());
    }

    println!("{} {}", "路线:".bold(), route.name.bold());
    if !route.current_status.is_empty() {
        println!("{} {}", "现状:".dimmed(), route.current_status);
    }
    println!();
    for (idx, step) in route.steps.iter().enumerate() {
        println!(
            "  {} {} {}",
            format!("{:>2}.", idx + 1).dimmed(),
            step.kind.icon(),
            step.instruction
        );
    }

    Ok(())
}
