// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Used to find the current branch for branch-scoped rules and to read the
//! message of existing commits.

mod repo;

pub use repo::{get_branch_name, get_commit_message, Repository};
