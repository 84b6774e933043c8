// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! tkl - Commit Header Linter
//!
//! Validates that the first line of a commit message has the shape
//! `type: TICKETKEY-TICKETNUMBER description`, e.g.
//! `feat: ABC-123 add new login flow`.
//!
//! # Features
//!
//! - **Header Parser**: Splits a header into type, ticket key, ticket number and description
//! - **Rule Engine**: Ordered, independent rules that report every problem in one pass
//! - **Severity Model**: Per-rule `off`/`warning`/`error` and branch-scoped rules
//! - **Hook Friendly**: Reads commit-msg files, stdin or existing commits
//!
//! # Example
//!
//! ```
//! use tkl::config::RulesConfig;
//! use tkl::rules::RuleEngine;
//!
//! let engine = RuleEngine::new(RulesConfig::default());
//!
//! let result = engine.validate("feat: ABC-123 add new login flow");
//! assert!(result.is_valid());
//!
//! let result = engine.validate("feature: ABC-123 hi");
//! assert_eq!(result.errors.len(), 2);
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod header;
pub mod rules;

// Re-exports for convenience
pub use config::TklConfig;
pub use error::{Result, TklError};
pub use header::{FormatError, ParsedHeader};
pub use rules::{RuleEngine, ValidationResult, Violation};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of tkl.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
