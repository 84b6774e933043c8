// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for header validation.

use crate::config::{RuleId, RuleSetting, RulesConfig, Severity};
use crate::error::Result;
use crate::git;
use crate::header::{extract_header, ParsedHeader};

use super::builtin::{builtin_rules, Rule};
use super::validator::ValidationResult;

/// Rule engine for validating commit headers.
#[derive(Debug)]
pub struct RuleEngine {
    config: RulesConfig,
    rules: Vec<Box<dyn Rule>>,
    branch: Option<String>,
}

impl RuleEngine {
    /// Create a new rule engine with the given rule configuration.
    pub fn new(config: RulesConfig) -> Self {
        Self {
            config,
            rules: builtin_rules(),
            branch: None,
        }
    }

    /// Set the branch used to decide whether branch-scoped rules run.
    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    /// The branch branch-scoped rules are matched against.
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// Effective setting of every rule, in evaluation order.
    pub fn rule_settings(&self) -> Vec<(RuleId, RuleSetting)> {
        self.rules
            .iter()
            .map(|rule| (rule.id(), self.config.setting(rule.id())))
            .collect()
    }

    /// Whether a rule runs for the current branch.
    pub fn is_active(&self, rule: RuleId) -> bool {
        let setting = self.config.setting(rule);
        setting.severity != Severity::Off && setting.when.applies_to(self.branch())
    }

    /// Validate a header line.
    ///
    /// A header that does not match the grammar yields only the format error.
    /// Otherwise every active rule runs and all violations are collected.
    pub fn validate(&self, header: &str) -> ValidationResult {
        let parsed = match ParsedHeader::parse(header) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("Header does not match the grammar: {:?}", header);
                return ValidationResult::malformed(e);
            }
        };

        let mut result = ValidationResult::new(header);

        for rule in &self.rules {
            let setting = self.config.setting(rule.id());

            if setting.severity == Severity::Off {
                tracing::trace!("Skipping disabled rule {}", rule.id());
                continue;
            }
            if !setting.when.applies_to(self.branch()) {
                tracing::debug!(
                    "Skipping {}: not applicable on branch {:?}",
                    rule.id(),
                    self.branch
                );
                continue;
            }

            let violations = rule.check(&parsed, &self.config);
            tracing::debug!("Rule {} found {} problem(s)", rule.id(), violations.len());

            for mut violation in violations {
                violation.severity = setting.severity;
                if violation.is_error() {
                    result.errors.push(violation);
                } else {
                    result.warnings.push(violation);
                }
            }
        }

        result
    }

    /// Validate the header of a full commit message.
    pub fn validate_message(&self, message: &str) -> ValidationResult {
        self.validate(extract_header(message))
    }

    /// Check a specific commit by reference.
    pub fn check_commit(&self, reference: &str) -> Result<ValidationResult> {
        let (sha, message) = git::get_commit_message(reference)?;
        let mut result = self.validate_message(&message);
        result.commit_sha = Some(sha);
        Ok(result)
    }
}
