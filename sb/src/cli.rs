//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Snowball - micro-step task initiation coach
#[derive(Parser)]
#[command(
    name = "snowball",
    about = "Breaks a stated goal into tiny LLM-generated micro-steps and walks you through them",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a breakdown for a goal and print it (batch mode, no TUI)
    Plan {
        /// The target goal ("Want to do")
        goal: String,

        /// What you are doing right now ("Doing now")
        #[arg(long = "now", default_value = "")]
        current: String,

        /// Print the route as JSON instead of a numbered list
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["sb"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_plan() {
        let cli = Cli::parse_from(["sb", "plan", "写数学作业", "--now", "刷抖音"]);
        match cli.command {
            Some(Command::Plan { goal, current, json }) => {
                assert_eq!(goal, "写数学作业");
                assert_eq!(current, "刷抖音");
                assert!(!json);
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_cli_parse_plan_json() {
        let cli = Cli::parse_from(["sb", "plan", "去跑步", "--json"]);
        match cli.command {
            Some(Command::Plan { goal, current, json }) => {
                assert_eq!(goal, "去跑步");
                assert!(current.is_empty());
                assert!(json);
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["sb", "-c", "/path/to/config.yml", "plan", "x"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
    }
}
