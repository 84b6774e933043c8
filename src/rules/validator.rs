// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation result types.

use crate::cli::args::OutputFormat;
use crate::config::{RuleId, Severity, UiConfig};
use crate::header::FormatError;
use console::{style, Style};

/// Code reported for headers that do not match the grammar.
pub const HEADER_FORMAT_CODE: &str = "header-format";

/// The header field a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Type,
    TicketKey,
    TicketNumber,
    Description,
}

impl HeaderField {
    /// Name of the field as shown to the user.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderField::Type => "type",
            HeaderField::TicketKey => "ticketKey",
            HeaderField::TicketNumber => "ticketNumber",
            HeaderField::Description => "description",
        }
    }
}

impl std::fmt::Display for HeaderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The constraint a field failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Required,
    OneOf(Vec<String>),
    MaxLength(usize),
    MinLength(usize),
    UppercaseLetters,
    Digits,
    NoConsecutiveWhitespace,
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Required => write!(f, "required"),
            Constraint::OneOf(values) => write!(f, "one of [{}]", values.join(", ")),
            Constraint::MaxLength(max) => write!(f, "max length {}", max),
            Constraint::MinLength(min) => write!(f, "min length {}", min),
            Constraint::UppercaseLetters => write!(f, "uppercase A-Z"),
            Constraint::Digits => write!(f, "digits 0-9"),
            Constraint::NoConsecutiveWhitespace => write!(f, "no consecutive whitespace"),
        }
    }
}

/// A single failed check against a parsed header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Rule that produced the violation.
    pub rule: RuleId,
    /// Offending field.
    pub field: HeaderField,
    /// Constraint the field failed.
    pub constraint: Constraint,
    /// Value of the field as written.
    pub actual: String,
    /// Severity the rule is configured with.
    pub severity: Severity,
}

impl Violation {
    /// Create an error-severity violation.
    pub fn new(
        rule: RuleId,
        field: HeaderField,
        constraint: Constraint,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            field,
            constraint,
            actual: actual.into(),
            severity: Severity::Error,
        }
    }

    /// Length of the offending value in characters.
    pub fn actual_len(&self) -> usize {
        self.actual.chars().count()
    }

    /// Whether this violation rejects the header.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        match &self.constraint {
            Constraint::Required => format!("{} is required", self.field),
            Constraint::OneOf(values) => format!(
                "{} must be one of {}. Found '{}'",
                self.field,
                values.join(", "),
                self.actual
            ),
            Constraint::MaxLength(max) => format!(
                "{} length must be at most {} characters. The current length is {} characters",
                self.field,
                max,
                self.actual_len()
            ),
            Constraint::MinLength(min) => format!(
                "{} must be at least {} characters. The current length is {} characters",
                self.field,
                min,
                self.actual_len()
            ),
            Constraint::UppercaseLetters => format!(
                "{} must be uppercase letters only. Found '{}'",
                self.field, self.actual
            ),
            Constraint::Digits => format!(
                "{} must be numeric only. Found '{}'",
                self.field, self.actual
            ),
            Constraint::NoConsecutiveWhitespace => format!(
                "{} must not contain multiple consecutive spaces. Found '{}'",
                self.field, self.actual
            ),
        }
    }

    /// Hint for fixing the header.
    pub fn suggestion(&self) -> Option<String> {
        match &self.constraint {
            Constraint::Required => Some("Start the header with a type, e.g. 'feat: '".to_string()),
            Constraint::OneOf(_) => None,
            Constraint::MaxLength(max) => Some(format!(
                "Remove {} character(s)",
                self.actual_len().saturating_sub(*max)
            )),
            Constraint::MinLength(min) => Some(format!(
                "Add {} more character(s)",
                min.saturating_sub(self.actual_len())
            )),
            Constraint::UppercaseLetters => {
                if self.actual.chars().all(|c| c.is_ascii_alphabetic()) {
                    Some(format!("Use '{}'", self.actual.to_ascii_uppercase()))
                } else {
                    Some("Use letters A-Z only".to_string())
                }
            }
            Constraint::Digits => None,
            Constraint::NoConsecutiveWhitespace => Some(format!(
                "Use '{}'",
                self.actual.split_whitespace().collect::<Vec<_>>().join(" ")
            )),
        }
    }

    /// Format the violation for terminal output.
    pub fn format(&self, ui: &UiConfig) -> String {
        let (glyph, code_style) = if self.is_error() {
            (style("✗").red().bold(), Style::new().red())
        } else {
            (style("⚠").yellow().bold(), Style::new().yellow())
        };

        let mut output = String::new();
        if ui.glyphs {
            output.push_str(&format!("{} ", glyph));
        }
        output.push_str(&format!(
            "{} {}",
            code_style.apply_to(self.rule.as_str()),
            self.message()
        ));

        if ui.hints {
            if let Some(suggestion) = self.suggestion() {
                output.push_str(&format!(
                    "\n  {} {}",
                    style("→").dim(),
                    style(suggestion).dim()
                ));
            }
        }

        output
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "rule": self.rule.as_str(),
            "field": self.field.as_str(),
            "constraint": self.constraint.to_string(),
            "actual": self.actual,
            "message": self.message(),
            "suggestion": self.suggestion(),
        })
    }
}

/// Result of validating a commit header.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// The header that was validated.
    pub header: String,
    /// Commit SHA if validating an existing commit.
    pub commit_sha: Option<String>,
    /// Set when the header does not match the grammar. No rules run in that case.
    pub format_error: Option<FormatError>,
    /// Error-severity violations, in rule order.
    pub errors: Vec<Violation>,
    /// Warning-severity violations, in rule order.
    pub warnings: Vec<Violation>,
}

impl ValidationResult {
    /// Create an empty (passing) result.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            commit_sha: None,
            format_error: None,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a result for a header that failed to parse.
    pub fn malformed(error: FormatError) -> Self {
        let mut result = Self::new(error.header.clone());
        result.format_error = Some(error);
        result
    }

    /// Check if the header was accepted.
    pub fn is_valid(&self) -> bool {
        self.format_error.is_none() && self.errors.is_empty()
    }

    /// Check if the header was accepted, optionally treating warnings as errors.
    pub fn passes(&self, strict: bool) -> bool {
        self.is_valid() && !(strict && !self.warnings.is_empty())
    }

    /// Get the number of rejecting problems.
    pub fn error_count(&self) -> usize {
        self.errors.len() + usize::from(self.format_error.is_some())
    }

    /// Get the total number of issues.
    pub fn issue_count(&self) -> usize {
        self.error_count() + self.warnings.len()
    }

    /// All messages, format error first, then errors and warnings in rule order.
    pub fn messages(&self) -> Vec<String> {
        self.format_error
            .iter()
            .map(|e| e.to_string())
            .chain(self.errors.iter().map(Violation::message))
            .chain(self.warnings.iter().map(Violation::message))
            .collect()
    }

    /// Print the result to stdout.
    pub fn print(&self, format: Option<OutputFormat>, ui: &UiConfig) {
        match format {
            Some(OutputFormat::Json) => self.print_json(),
            _ => self.print_text(ui),
        }
    }

    /// Print in text format.
    fn print_text(&self, ui: &UiConfig) {
        if let Some(ref sha) = self.commit_sha {
            let short_sha = &sha[..7.min(sha.len())];
            let status = if self.is_valid() {
                style("✓").green().bold()
            } else {
                style("✗").red().bold()
            };
            println!("{} {} {}", status, style(short_sha).cyan(), self.header);
        }

        if let Some(ref error) = self.format_error {
            let glyph = if ui.glyphs { "✗ " } else { "" };
            println!(
                "  {}{} {}",
                style(glyph).red().bold(),
                style(HEADER_FORMAT_CODE).red(),
                error
            );
        }

        for error in &self.errors {
            println!("  {}", error.format(ui));
        }

        for warning in &self.warnings {
            println!("  {}", warning.format(ui));
        }
    }

    /// Build the JSON representation.
    pub fn to_json(&self) -> serde_json::Value {
        let mut errors: Vec<serde_json::Value> = self
            .format_error
            .iter()
            .map(|e| {
                serde_json::json!({
                    "rule": HEADER_FORMAT_CODE,
                    "field": serde_json::Value::Null,
                    "constraint": "grammar",
                    "actual": e.header,
                    "message": e.to_string(),
                    "suggestion": serde_json::Value::Null,
                })
            })
            .collect();
        errors.extend(self.errors.iter().map(Violation::to_json));

        serde_json::json!({
            "valid": self.is_valid(),
            "commit": self.commit_sha,
            "header": self.header,
            "errors": errors,
            "warnings": self.warnings.iter().map(Violation::to_json).collect::<Vec<_>>(),
        })
    }

    /// Print in JSON format.
    fn print_json(&self) {
        println!(
            "{}",
            serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
        );
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            if self.warnings.is_empty() {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", self.warnings.len())
            }
        } else {
            format!(
                "Invalid ({} errors, {} warnings)",
                self.error_count(),
                self.warnings.len()
            )
        }
    }
}
