// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::{IsTerminal, Read};

use console::style;

use crate::config::{RuleId, RulesConfig, Severity, TklConfig};
use crate::error::{ConfigError, Result, ResultExt, TklError, ValidationError};
use crate::git;
use crate::rules::RuleEngine;

use super::args::{CheckArgs, Cli, Commands, InitArgs, OutputFormat};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    // These work without (or in spite of a broken) configuration
    match cli.command.clone() {
        Commands::Init(args) => return run_init(args),
        Commands::Version => return run_version(),
        Commands::Check(_) | Commands::Rules => {}
    }

    let config = if let Some(config_path) = &cli.config {
        TklConfig::load_from(config_path)?
    } else {
        TklConfig::load()?
    };

    if !config.ui.color {
        console::set_colors_enabled(false);
    }

    match cli.command.clone() {
        Commands::Check(args) => run_check(&cli, &config, args),
        Commands::Rules => run_rules(&cli, &config),
        Commands::Init(_) | Commands::Version => Ok(()),
    }
}

/// Resolve the branch for branch-scoped rules.
fn current_branch(cli: &Cli) -> Option<String> {
    if let Some(ref branch) = cli.branch {
        return Some(branch.clone());
    }

    match git::get_branch_name() {
        Ok(branch) => Some(branch),
        Err(e) => {
            tracing::debug!("Branch unknown, branch-scoped rules will not run: {}", e);
            None
        }
    }
}

fn build_engine(cli: &Cli, config: &TklConfig) -> RuleEngine {
    RuleEngine::new(config.rules.clone()).with_branch(current_branch(cli))
}

/// Run the check command.
fn run_check(cli: &Cli, config: &TklConfig, args: CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let engine = build_engine(cli, config);

    let result = if let Some(ref reference) = args.commit {
        engine.check_commit(reference)?
    } else if let Some(ref header) = args.header {
        engine.validate(header)
    } else if let Some(ref path) = args.file {
        let message = std::fs::read_to_string(path)
            .context(format!("Failed to read {}", path.display()))?;
        engine.validate_message(&message)
    } else {
        let stdin = std::io::stdin();
        let is_terminal = stdin.is_terminal();
        let message = read_message(stdin.lock(), is_terminal)?;
        engine.validate_message(&message)
    };

    result.print(cli.format, &config.ui);

    if result.passes(args.strict) {
        tracing::debug!("{}", result.summary());
        Ok(())
    } else {
        let count = if args.strict {
            result.issue_count()
        } else {
            result.error_count()
        };
        Err(TklError::Validation(ValidationError::Rejected { count }))
    }
}

/// Read a commit message piped into `input`.
///
/// An interactive terminal is refused instead of waiting for input.
fn read_message(mut input: impl Read, is_terminal: bool) -> Result<String> {
    if is_terminal {
        return Err(TklError::WithContext {
            context: "check".to_string(),
            message: "No header given. Pass a header, --file <PATH>, --commit <REV>, \
                      or pipe the commit message on stdin"
                .to_string(),
        });
    }

    let mut message = String::new();
    input
        .read_to_string(&mut message)
        .context("Failed to read commit message from stdin")?;
    Ok(message)
}

/// Run the rules command.
fn run_rules(cli: &Cli, config: &TklConfig) -> Result<()> {
    let engine = build_engine(cli, config);
    let rules = &config.rules;

    let parameters = |id: RuleId| rule_parameters(id, rules);

    if cli.format == Some(OutputFormat::Json) {
        let json: Vec<serde_json::Value> = engine
            .rule_settings()
            .into_iter()
            .map(|(id, setting)| {
                serde_json::json!({
                    "rule": id.as_str(),
                    "severity": setting.severity.to_string(),
                    "when": setting.when.to_string(),
                    "active": engine.is_active(id),
                    "parameters": parameters(id),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_default()
        );
        return Ok(());
    }

    for (id, setting) in engine.rule_settings() {
        let severity = match setting.severity {
            Severity::Error => style(setting.severity.to_string()).red(),
            Severity::Warning => style(setting.severity.to_string()).yellow(),
            Severity::Off => style(setting.severity.to_string()).dim(),
        };
        let marker = if engine.is_active(id) {
            style("●").green()
        } else {
            style("○").dim()
        };

        println!(
            "{} {:<28} {:<8} {}",
            marker,
            id.as_str(),
            severity,
            setting.when
        );
        println!("    {}", style(id.description()).dim());

        let params = parameters(id);
        if !params.is_empty() {
            println!("    {}", style(params).dim());
        }
    }

    Ok(())
}

/// Describe the parameters a rule is configured with.
fn rule_parameters(id: RuleId, rules: &RulesConfig) -> String {
    match id {
        RuleId::TypeAllowed => rules.allowed_types.join(", "),
        RuleId::TicketKeyShape => format!("max length {}", rules.max_ticket_key_length),
        RuleId::DescriptionMinLength => format!("min length {}", rules.min_description_length),
        RuleId::DescriptionMaxLength => format!("max length {}", rules.max_description_length),
        RuleId::TypeRequired | RuleId::TicketNumberShape | RuleId::DescriptionNoDoubleSpace => {
            String::new()
        }
    }
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::default::example_config;

    tracing::debug!("Running init command with args: {:?}", args);

    if args.path.exists() && !args.force {
        return Err(TklError::Config(ConfigError::AlreadyExists { path: args.path }));
    }

    std::fs::write(&args.path, example_config()).context("Failed to write configuration")?;

    println!("✓ Created {}", args.path.display());

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("tkl {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}
