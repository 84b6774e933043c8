// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tkl - commit header linter
///
/// Checks that commit headers look like `type: TICKETKEY-TICKETNUMBER description`.
#[derive(Parser, Debug)]
#[command(name = "tkl")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Commit header linter for ticket-referencing commits", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TKL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Branch to match branch-scoped rules against (detected from git if omitted)
    #[arg(long, global = true)]
    pub branch: Option<String>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate a commit header
    Check(CheckArgs),

    /// List the effective rule set
    Rules,

    /// Initialize tkl configuration
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the check command.
///
/// With no header, file or commit, the message is read from stdin.
#[derive(Parser, Debug, Default, Clone)]
pub struct CheckArgs {
    /// Header to validate
    #[arg(conflicts_with_all = ["file", "commit"])]
    pub header: Option<String>,

    /// Read the commit message from a file (as passed to the commit-msg hook)
    #[arg(short, long, conflicts_with = "commit")]
    pub file: Option<PathBuf>,

    /// Validate the message of an existing commit
    #[arg(long, value_name = "REV")]
    pub commit: Option<String>,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Where to write the configuration
    #[arg(long, default_value = "tkl.toml")]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_header() {
        let args = Cli::parse_from(["tkl", "check", "feat: ABC-1 add login page"]);
        if let Commands::Check(check_args) = args.command {
            assert_eq!(
                check_args.header.as_deref(),
                Some("feat: ABC-1 add login page")
            );
            assert!(!check_args.strict);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_parse_check_file() {
        let args = Cli::parse_from(["tkl", "check", "--file", ".git/COMMIT_EDITMSG", "--strict"]);
        if let Commands::Check(check_args) = args.command {
            assert_eq!(check_args.file, Some(PathBuf::from(".git/COMMIT_EDITMSG")));
            assert!(check_args.strict);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_header_conflicts_with_file() {
        let result = Cli::try_parse_from(["tkl", "check", "feat: ABC-1 x", "--file", "msg"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from(["tkl", "rules", "--format", "json", "--branch", "main"]);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.branch.as_deref(), Some("main"));
        assert!(matches!(args.command, Commands::Rules));
    }

    #[test]
    fn test_init_default_path() {
        let args = Cli::parse_from(["tkl", "init"]);
        if let Commands::Init(init_args) = args.command {
            assert_eq!(init_args.path, PathBuf::from("tkl.toml"));
            assert!(!init_args.force);
        } else {
            panic!("Expected Init command");
        }
    }
}
