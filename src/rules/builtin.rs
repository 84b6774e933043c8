// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.

use crate::config::{RuleId, RulesConfig};
use crate::header::ParsedHeader;
use lazy_static::lazy_static;
use regex::Regex;

use super::validator::{Constraint, HeaderField, Violation};

lazy_static! {
    static ref CONSECUTIVE_WHITESPACE: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// A check over a parsed header.
///
/// Rules are independent: each sees the whole header and reports every
/// problem it finds, regardless of what other rules report.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Check the header and return any violations (empty when it passes).
    fn check(&self, header: &ParsedHeader, config: &RulesConfig) -> Vec<Violation>;

    /// Get the rule id.
    fn id(&self) -> RuleId;
}

/// Get the built-in rules in evaluation order.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    RuleId::all().iter().map(|id| rule_for(*id)).collect()
}

/// Get the implementation of a rule.
pub fn rule_for(id: RuleId) -> Box<dyn Rule> {
    match id {
        RuleId::TypeRequired => Box::new(TypeRequired),
        RuleId::TypeAllowed => Box::new(TypeAllowed),
        RuleId::TicketKeyShape => Box::new(TicketKeyShape),
        RuleId::TicketNumberShape => Box::new(TicketNumberShape),
        RuleId::DescriptionMinLength => Box::new(DescriptionMinLength),
        RuleId::DescriptionMaxLength => Box::new(DescriptionMaxLength),
        RuleId::DescriptionNoDoubleSpace => Box::new(DescriptionNoDoubleSpace),
    }
}

/// The header must carry a type token.
#[derive(Debug)]
pub struct TypeRequired;

impl Rule for TypeRequired {
    fn check(&self, header: &ParsedHeader, _config: &RulesConfig) -> Vec<Violation> {
        if header.type_str().is_empty() {
            vec![Violation::new(
                self.id(),
                HeaderField::Type,
                Constraint::Required,
                "",
            )]
        } else {
            Vec::new()
        }
    }

    fn id(&self) -> RuleId {
        RuleId::TypeRequired
    }
}

/// The type token must be one of the allowed types.
///
/// A missing type fails here too, so an empty type is reported by both
/// this rule and [`TypeRequired`].
#[derive(Debug)]
pub struct TypeAllowed;

impl Rule for TypeAllowed {
    fn check(&self, header: &ParsedHeader, config: &RulesConfig) -> Vec<Violation> {
        let type_str = header.type_str();

        if type_str.is_empty() || !config.allowed_types.iter().any(|t| t == type_str) {
            vec![Violation::new(
                self.id(),
                HeaderField::Type,
                Constraint::OneOf(config.allowed_types.clone()),
                type_str,
            )]
        } else {
            Vec::new()
        }
    }

    fn id(&self) -> RuleId {
        RuleId::TypeAllowed
    }
}

/// The ticket key must be short and made of `A`-`Z` only.
///
/// Length and character class are checked separately and can both fail.
#[derive(Debug)]
pub struct TicketKeyShape;

impl Rule for TicketKeyShape {
    fn check(&self, header: &ParsedHeader, config: &RulesConfig) -> Vec<Violation> {
        let key = &header.ticket_key;
        let max = config.max_ticket_key_length;
        let mut violations = Vec::new();

        if key.chars().count() > max {
            violations.push(Violation::new(
                self.id(),
                HeaderField::TicketKey,
                Constraint::MaxLength(max),
                key.as_str(),
            ));
        }

        if key.is_empty() || !key.chars().all(|c| c.is_ascii_uppercase()) {
            violations.push(Violation::new(
                self.id(),
                HeaderField::TicketKey,
                Constraint::UppercaseLetters,
                key.as_str(),
            ));
        }

        violations
    }

    fn id(&self) -> RuleId {
        RuleId::TicketKeyShape
    }
}

/// The ticket number must be ASCII digits only.
#[derive(Debug)]
pub struct TicketNumberShape;

impl Rule for TicketNumberShape {
    fn check(&self, header: &ParsedHeader, _config: &RulesConfig) -> Vec<Violation> {
        let number = &header.ticket_number;

        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            vec![Violation::new(
                self.id(),
                HeaderField::TicketNumber,
                Constraint::Digits,
                number.as_str(),
            )]
        } else {
            Vec::new()
        }
    }

    fn id(&self) -> RuleId {
        RuleId::TicketNumberShape
    }
}

/// The description must be at least the configured length.
#[derive(Debug)]
pub struct DescriptionMinLength;

impl Rule for DescriptionMinLength {
    fn check(&self, header: &ParsedHeader, config: &RulesConfig) -> Vec<Violation> {
        let min = config.min_description_length;

        if header.description.chars().count() < min {
            vec![Violation::new(
                self.id(),
                HeaderField::Description,
                Constraint::MinLength(min),
                header.description.as_str(),
            )]
        } else {
            Vec::new()
        }
    }

    fn id(&self) -> RuleId {
        RuleId::DescriptionMinLength
    }
}

/// The description must not exceed the configured length.
#[derive(Debug)]
pub struct DescriptionMaxLength;

impl Rule for DescriptionMaxLength {
    fn check(&self, header: &ParsedHeader, config: &RulesConfig) -> Vec<Violation> {
        let max = config.max_description_length;

        if header.description.chars().count() > max {
            vec![Violation::new(
                self.id(),
                HeaderField::Description,
                Constraint::MaxLength(max),
                header.description.as_str(),
            )]
        } else {
            Vec::new()
        }
    }

    fn id(&self) -> RuleId {
        RuleId::DescriptionMaxLength
    }
}

/// No run of two or more whitespace characters in the description.
#[derive(Debug)]
pub struct DescriptionNoDoubleSpace;

impl Rule for DescriptionNoDoubleSpace {
    fn check(&self, header: &ParsedHeader, _config: &RulesConfig) -> Vec<Violation> {
        if CONSECUTIVE_WHITESPACE.is_match(&header.description) {
            vec![Violation::new(
                self.id(),
                HeaderField::Description,
                Constraint::NoConsecutiveWhitespace,
                header.description.as_str(),
            )]
        } else {
            Vec::new()
        }
    }

    fn id(&self) -> RuleId {
        RuleId::DescriptionNoDoubleSpace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_header(commit_type: Option<&str>, key: &str, number: &str, description: &str) -> ParsedHeader {
        ParsedHeader {
            commit_type: commit_type.map(str::to_string),
            ticket_key: key.to_string(),
            ticket_number: number.to_string(),
            description: description.to_string(),
        }
    }

    fn describe(description: &str) -> ParsedHeader {
        make_header(Some("feat"), "ABC", "123", description)
    }

    #[test]
    fn test_builtin_rules_order() {
        let ids: Vec<RuleId> = builtin_rules().iter().map(|r| r.id()).collect();
        assert_eq!(ids, RuleId::all());
    }

    #[test]
    fn test_type_required() {
        let config = RulesConfig::default();
        assert_eq!(TypeRequired.check(&make_header(None, "ABC", "1", "x"), &config).len(), 1);
        assert!(TypeRequired.check(&describe("add new login flow"), &config).is_empty());
    }

    #[test]
    fn test_type_allowed() {
        let config = RulesConfig::default();
        for allowed in crate::config::DEFAULT_TYPES {
            let header = make_header(Some(*allowed), "ABC", "1", "add new login flow");
            assert!(TypeAllowed.check(&header, &config).is_empty(), "{}", allowed);
        }

        let header = make_header(Some("feature"), "ABC", "1", "add new login flow");
        let violations = TypeAllowed.check(&header, &config);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].actual, "feature");
    }

    #[test]
    fn test_type_allowed_is_case_sensitive() {
        let config = RulesConfig::default();
        let header = make_header(Some("Feat"), "ABC", "1", "add new login flow");
        assert_eq!(TypeAllowed.check(&header, &config).len(), 1);
    }

    #[test]
    fn test_empty_type_reported_by_both_rules() {
        let config = RulesConfig::default();
        let header = make_header(None, "ABC", "1", "add new login flow");
        assert_eq!(TypeRequired.check(&header, &config).len(), 1);
        assert_eq!(TypeAllowed.check(&header, &config).len(), 1);
    }

    #[test]
    fn test_ticket_key_too_long() {
        let config = RulesConfig::default();
        let header = make_header(Some("feat"), "ABCDEFGHIJK", "1", "add new login flow");
        let violations = TicketKeyShape.check(&header, &config);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].constraint, Constraint::MaxLength(10));

        let header = make_header(Some("feat"), "ABCDEFGHIJ", "1", "add new login flow");
        assert!(TicketKeyShape.check(&header, &config).is_empty());
    }

    #[test]
    fn test_ticket_key_character_class() {
        let config = RulesConfig::default();
        for key in ["AB1", "abc", "AB_C", "ÄBC"] {
            let header = make_header(Some("feat"), key, "1", "add new login flow");
            let violations = TicketKeyShape.check(&header, &config);
            assert_eq!(violations.len(), 1, "{}", key);
            assert_eq!(violations[0].constraint, Constraint::UppercaseLetters);
        }
    }

    #[test]
    fn test_ticket_key_both_checks_fail() {
        let config = RulesConfig::default();
        let header = make_header(Some("feat"), "abcdefghijkl", "1", "add new login flow");
        let violations = TicketKeyShape.check(&header, &config);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].constraint, Constraint::MaxLength(10));
        assert_eq!(violations[1].constraint, Constraint::UppercaseLetters);
    }

    #[test]
    fn test_ticket_number_shape() {
        let config = RulesConfig::default();
        assert!(TicketNumberShape
            .check(&make_header(Some("feat"), "ABC", "0042", "x"), &config)
            .is_empty());
        for number in ["12a", "", "١٢", "+1"] {
            let header = make_header(Some("feat"), "ABC", number, "x");
            assert_eq!(TicketNumberShape.check(&header, &config).len(), 1, "{}", number);
        }
    }

    #[test]
    fn test_description_length_bounds() {
        let config = RulesConfig::default();

        let short = describe(&"a".repeat(9));
        assert_eq!(DescriptionMinLength.check(&short, &config).len(), 1);
        assert!(DescriptionMaxLength.check(&short, &config).is_empty());

        let long = describe(&"a".repeat(51));
        assert!(DescriptionMinLength.check(&long, &config).is_empty());
        assert_eq!(DescriptionMaxLength.check(&long, &config).len(), 1);

        for len in [10, 30, 50] {
            let ok = describe(&"a".repeat(len));
            assert!(DescriptionMinLength.check(&ok, &config).is_empty());
            assert!(DescriptionMaxLength.check(&ok, &config).is_empty());
        }
    }

    #[test]
    fn test_description_length_counts_characters() {
        let config = RulesConfig::default();
        let header = describe("ändere die Übersicht");
        assert!(DescriptionMinLength.check(&header, &config).is_empty());
        assert_eq!(header.description.chars().count(), 20);
    }

    #[test]
    fn test_description_no_double_space() {
        let config = RulesConfig::default();
        assert_eq!(DescriptionNoDoubleSpace.check(&describe("foo  bar"), &config).len(), 1);
        assert_eq!(DescriptionNoDoubleSpace.check(&describe("foo \tbar"), &config).len(), 1);
        assert!(DescriptionNoDoubleSpace.check(&describe("foo bar"), &config).is_empty());
    }

    #[test]
    fn test_custom_bounds() {
        let config = RulesConfig {
            max_ticket_key_length: 3,
            min_description_length: 2,
            max_description_length: 5,
            ..RulesConfig::default()
        };
        let header = make_header(Some("feat"), "ABCD", "1", "abcdef");
        assert_eq!(TicketKeyShape.check(&header, &config).len(), 1);
        assert!(DescriptionMinLength.check(&header, &config).is_empty());
        assert_eq!(DescriptionMaxLength.check(&header, &config).len(), 1);
    }
}
