// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Header grammar and parsing.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// `type: KEY-NUMBER description`, with the type token optional.
    /// The description may not span line terminators (`\r`, `\n`, U+2028, U+2029).
    static ref HEADER_REGEX: Regex = Regex::new(
        r"^(?P<type>\S+)?: (?P<key>\S+)-(?P<number>\S+) (?P<description>\S(?:[^\r\n\x{2028}\x{2029}]*\S)?)$"
    )
    .unwrap();
}

/// The header does not have the basic `type: KEY-NUMBER description` shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Invalid commit message format! (check for any extra whitespace character.) \
     Expected format: \"type: ticketKey-ticketNumber description\""
)]
pub struct FormatError {
    /// The header that failed to parse.
    pub header: String,
}

/// Fields extracted from a well-formed header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    /// Token before `: `. `None` when the header starts with `: `.
    pub commit_type: Option<String>,
    /// Project code before the `-`.
    pub ticket_key: String,
    /// Identifier after the `-`.
    pub ticket_number: String,
    /// Everything after the ticket reference.
    pub description: String,
}

impl ParsedHeader {
    /// Parse a header line.
    pub fn parse(header: &str) -> Result<Self, FormatError> {
        let captures = HEADER_REGEX.captures(header).ok_or_else(|| FormatError {
            header: header.to_string(),
        })?;

        let field = |name: &str| {
            captures
                .name(name)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        Ok(Self {
            commit_type: captures.name("type").map(|m| m.as_str().to_string()),
            ticket_key: field("key"),
            ticket_number: field("number"),
            description: field("description"),
        })
    }

    /// The type token, or an empty string when absent.
    pub fn type_str(&self) -> &str {
        self.commit_type.as_deref().unwrap_or("")
    }

    /// The ticket reference as written, e.g. `ABC-123`.
    pub fn ticket(&self) -> String {
        format!("{}-{}", self.ticket_key, self.ticket_number)
    }
}

impl std::str::FromStr for ParsedHeader {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let parsed = ParsedHeader::parse("feat: ABC-123 add new login flow").unwrap();
        assert_eq!(parsed.commit_type.as_deref(), Some("feat"));
        assert_eq!(parsed.ticket_key, "ABC");
        assert_eq!(parsed.ticket_number, "123");
        assert_eq!(parsed.description, "add new login flow");
        assert_eq!(parsed.ticket(), "ABC-123");
    }

    #[test]
    fn test_parse_missing_type() {
        let parsed = ParsedHeader::parse(": ABC-123 add new login flow").unwrap();
        assert!(parsed.commit_type.is_none());
        assert_eq!(parsed.type_str(), "");
    }

    #[test]
    fn test_parse_keeps_interior_whitespace() {
        let parsed = ParsedHeader::parse("fix: OPS-7 foo  bar").unwrap();
        assert_eq!(parsed.description, "foo  bar");
    }

    #[test]
    fn test_parse_single_character_description() {
        let parsed = ParsedHeader::parse("fix: OPS-7 x").unwrap();
        assert_eq!(parsed.description, "x");
    }

    #[test]
    fn test_parse_last_dash_splits_ticket() {
        let parsed = ParsedHeader::parse("fix: ABC-DEF-12 tidy the parser").unwrap();
        assert_eq!(parsed.ticket_key, "ABC-DEF");
        assert_eq!(parsed.ticket_number, "12");
    }

    #[test]
    fn test_parse_does_not_validate_fields() {
        let parsed = ParsedHeader::parse("feature: abc-12x hi").unwrap();
        assert_eq!(parsed.commit_type.as_deref(), Some("feature"));
        assert_eq!(parsed.ticket_key, "abc");
        assert_eq!(parsed.ticket_number, "12x");
        assert_eq!(parsed.description, "hi");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for header in [
            "feat:ABC-123 add login",
            "feat ABC-123 add login",
            "feat: ABC123 add login",
            "feat: ABC-123  add login",
            "feat: ABC-123 add login ",
            "feat: ABC-123",
            " feat: ABC-123 add login",
            "feat: ABC-1 add login\rflow page",
            "feat: ABC-1 add login\u{2028}flow page",
            "",
        ] {
            let err = ParsedHeader::parse(header).unwrap_err();
            assert_eq!(err.header, header);
        }
    }

    #[test]
    fn test_format_error_message() {
        let err = ParsedHeader::parse("nope").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid commit message format"));
        assert!(message.contains("whitespace"));
    }
}
