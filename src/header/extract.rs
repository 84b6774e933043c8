// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Header extraction from a full commit message.

/// Marker git writes above the diff in verbose commits.
const SCISSORS: &str = "------------------------ >8 ------------------------";

/// Get the header of a commit message as git would record it.
///
/// Comment lines are skipped and everything below the scissors line is
/// ignored. Returns an empty string when no header line is left.
pub fn extract_header(message: &str) -> &str {
    message
        .lines()
        .take_while(|line| !is_scissors(line))
        .find(|line| !line.starts_with('#'))
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .unwrap_or("")
}

fn is_scissors(line: &str) -> bool {
    line.strip_prefix('#')
        .map(|rest| rest.trim() == SCISSORS)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_is_header() {
        let message = "feat: ABC-1 add login page\n\nLonger body text.\n";
        assert_eq!(extract_header(message), "feat: ABC-1 add login page");
    }

    #[test]
    fn test_skips_comment_lines() {
        let message = "# Please enter the commit message\n#\nfix: ABC-2 fix the login page\n";
        assert_eq!(extract_header(message), "fix: ABC-2 fix the login page");
    }

    #[test]
    fn test_strips_carriage_return() {
        assert_eq!(extract_header("fix: ABC-2 fix it now\r\nbody"), "fix: ABC-2 fix it now");
    }

    #[test]
    fn test_nothing_below_scissors() {
        let message = "# ------------------------ >8 ------------------------\ndiff --git a/x b/x\n";
        assert_eq!(extract_header(message), "");
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(extract_header(""), "");
    }

    #[test]
    fn test_blank_first_line_is_kept() {
        assert_eq!(extract_header("\nfeat: ABC-1 add login page"), "");
    }
}
