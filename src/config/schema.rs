// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from tkl.toml.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ConfigError, Result, TklError};

/// The main configuration structure for tkl.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TklConfig {
    /// Rule configuration.
    pub rules: RulesConfig,

    /// UI/UX configuration.
    pub ui: UiConfig,
}

impl TklConfig {
    /// Load configuration from the default locations.
    pub fn load() -> Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// Rule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Accepted values for the type token.
    pub allowed_types: Vec<String>,

    /// Upper bound on the ticket key length.
    pub max_ticket_key_length: usize,

    /// Lower bound on the description length.
    pub min_description_length: usize,

    /// Upper bound on the description length.
    pub max_description_length: usize,

    /// Per-rule severity and applicability, keyed by rule name.
    /// Rules without an entry run as errors on every branch.
    pub settings: BTreeMap<String, RuleSetting>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            allowed_types: DEFAULT_TYPES.iter().map(|t| t.to_string()).collect(),
            max_ticket_key_length: 10,
            min_description_length: 10,
            max_description_length: 50,
            settings: BTreeMap::new(),
        }
    }
}

/// The default accepted type tokens.
pub const DEFAULT_TYPES: &[&str] = &[
    "feat", "fix", "chore", "docs", "style", "refactor", "perf", "test", "build", "ci", "revert",
    "security", "breaking", "wip",
];

impl RulesConfig {
    /// Get the effective setting for a rule.
    pub fn setting(&self, rule: RuleId) -> RuleSetting {
        self.settings
            .get(rule.as_str())
            .cloned()
            .unwrap_or_default()
    }

    /// Reject configurations no header could ever satisfy, and unknown rule names.
    pub fn validate(&self) -> Result<()> {
        if self.allowed_types.is_empty() {
            return Err(invalid("rules.allowed_types", "must list at least one type"));
        }

        if self.min_description_length > self.max_description_length {
            return Err(invalid(
                "rules.min_description_length",
                &format!(
                    "{} is greater than max_description_length ({})",
                    self.min_description_length, self.max_description_length
                ),
            ));
        }

        for (name, setting) in &self.settings {
            if name.parse::<RuleId>().is_err() {
                return Err(invalid(
                    &format!("rules.settings.{}", name),
                    &format!("unknown rule, expected one of: {}", RuleId::names().join(", ")),
                ));
            }
            if let Applicability::Branches(patterns) = &setting.when {
                for pattern in patterns {
                    if let Err(e) = glob::Pattern::new(pattern) {
                        return Err(invalid(
                            &format!("rules.settings.{}.when", name),
                            &format!("bad branch pattern '{}': {}", pattern, e),
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> TklError {
    TklError::Config(ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    })
}

/// Severity and applicability of a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuleSetting {
    /// How a failure of this rule is reported.
    pub severity: Severity,

    /// When the rule runs.
    pub when: Applicability,
}

/// Rule severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rule is disabled.
    Off,
    /// Reported, but the header is still accepted.
    Warning,
    /// Reported and the header is rejected.
    #[default]
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Off => write!(f, "off"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// When a rule applies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    /// On every branch.
    #[default]
    Always,
    /// Only on branches matching one of these glob patterns.
    Branches(Vec<String>),
}

impl Applicability {
    /// Whether a rule with this applicability runs on `branch`.
    ///
    /// Branch-scoped rules never run when the branch is unknown.
    pub fn applies_to(&self, branch: Option<&str>) -> bool {
        match self {
            Applicability::Always => true,
            Applicability::Branches(patterns) => {
                let Some(branch) = branch else {
                    return false;
                };
                patterns.iter().any(|p| {
                    glob::Pattern::new(p)
                        .map(|glob| glob.matches(branch))
                        .unwrap_or(false)
                })
            }
        }
    }
}

impl std::fmt::Display for Applicability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Applicability::Always => write!(f, "always"),
            Applicability::Branches(patterns) => write!(f, "branches [{}]", patterns.join(", ")),
        }
    }
}

/// The built-in rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    TypeRequired,
    TypeAllowed,
    TicketKeyShape,
    TicketNumberShape,
    DescriptionMinLength,
    DescriptionMaxLength,
    DescriptionNoDoubleSpace,
}

impl RuleId {
    /// Get the rule name as used in configuration and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::TypeRequired => "type-required",
            RuleId::TypeAllowed => "type-allowed",
            RuleId::TicketKeyShape => "ticket-key-shape",
            RuleId::TicketNumberShape => "ticket-number-shape",
            RuleId::DescriptionMinLength => "description-min-length",
            RuleId::DescriptionMaxLength => "description-max-length",
            RuleId::DescriptionNoDoubleSpace => "description-no-double-space",
        }
    }

    /// Get a description of the rule.
    pub fn description(&self) -> &'static str {
        match self {
            RuleId::TypeRequired => "Type token must be present",
            RuleId::TypeAllowed => "Type token must be one of the allowed types",
            RuleId::TicketKeyShape => "Ticket key must be short and uppercase A-Z only",
            RuleId::TicketNumberShape => "Ticket number must be digits only",
            RuleId::DescriptionMinLength => "Description must meet the minimum length",
            RuleId::DescriptionMaxLength => "Description must not exceed the maximum length",
            RuleId::DescriptionNoDoubleSpace => {
                "Description must not contain consecutive whitespace"
            }
        }
    }

    /// Get all rules in evaluation order.
    pub fn all() -> &'static [RuleId] {
        &[
            RuleId::TypeRequired,
            RuleId::TypeAllowed,
            RuleId::TicketKeyShape,
            RuleId::TicketNumberShape,
            RuleId::DescriptionMinLength,
            RuleId::DescriptionMaxLength,
            RuleId::DescriptionNoDoubleSpace,
        ]
    }

    /// Get all rule names in evaluation order.
    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(RuleId::as_str).collect()
    }
}

impl std::str::FromStr for RuleId {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        RuleId::all()
            .iter()
            .copied()
            .find(|rule| rule.as_str() == s)
            .ok_or(())
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// UI/UX configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Whether to use colors.
    pub color: bool,

    /// Whether to prefix messages with a glyph.
    pub glyphs: bool,

    /// Whether to show fix hints under each message.
    pub hints: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            glyphs: true,
            hints: true,
        }
    }
}
