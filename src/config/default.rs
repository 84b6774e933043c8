// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::TklConfig;

/// Get the default configuration.
pub fn default_config() -> TklConfig {
    TklConfig::default()
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# tkl configuration file
#
# Headers must look like: type: TICKETKEY-TICKETNUMBER description

[rules]
allowed_types = [
    "feat", "fix", "chore", "docs", "style", "refactor", "perf",
    "test", "build", "ci", "revert", "security", "breaking", "wip",
]
max_ticket_key_length = 10
min_description_length = 10
max_description_length = 50

# Per-rule severity ("off", "warning", "error") and applicability.
# Rules without an entry are errors on every branch.
[rules.settings.type-required]
severity = "error"
when = "always"

[rules.settings.description-no-double-space]
severity = "error"
when = "always"

# Example of a branch-scoped rule:
# [rules.settings.ticket-key-shape]
# severity = "error"
# when = { branches = ["main", "release/*"] }

[ui]
color = true
glyphs = true
hints = true
"#
}
