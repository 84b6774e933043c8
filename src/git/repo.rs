// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{GitError, Result, TklError};
use git2::Repository as Git2Repo;
use std::path::Path;

/// Wrapper around git2::Repository.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            TklError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open the repository containing `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                TklError::Git(GitError::NotARepository)
            } else {
                TklError::Git(GitError::from(e))
            }
        })?;

        Ok(Self { inner: repo })
    }

    /// Get the current branch name.
    ///
    /// On an unborn branch (no commit yet) the name is read from the
    /// symbolic HEAD reference.
    pub fn branch_name(&self) -> Result<String> {
        let head = match self.inner.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
                return self.unborn_branch_name();
            }
            Err(e) => {
                return Err(TklError::Git(GitError::BranchFailed {
                    message: e.message().to_string(),
                }))
            }
        };

        if !head.is_branch() {
            return Err(TklError::Git(GitError::DetachedHead));
        }

        head.shorthand().map(str::to_string).ok_or_else(|| {
            TklError::Git(GitError::BranchFailed {
                message: "Invalid branch name encoding".to_string(),
            })
        })
    }

    fn unborn_branch_name(&self) -> Result<String> {
        let head = self.inner.find_reference("HEAD").map_err(|e| {
            TklError::Git(GitError::BranchFailed {
                message: e.message().to_string(),
            })
        })?;

        head.symbolic_target()
            .and_then(|target| target.strip_prefix("refs/heads/"))
            .map(str::to_string)
            .ok_or_else(|| TklError::Git(GitError::DetachedHead))
    }

    /// Get the id and message of a commit by reference (SHA, branch name, etc.).
    pub fn get_commit_message(&self, reference: &str) -> Result<(String, String)> {
        let invalid = |e: git2::Error| {
            TklError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        };

        let commit = self
            .inner
            .revparse_single(reference)
            .map_err(invalid)?
            .peel_to_commit()
            .map_err(invalid)?;

        let message = commit.message().ok_or_else(|| {
            TklError::Git(GitError::InvalidReference {
                reference: format!("{}: Invalid message encoding", reference),
            })
        })?;

        Ok((commit.id().to_string(), message.to_string()))
    }
}

/// Get the current branch name.
pub fn get_branch_name() -> Result<String> {
    Repository::open_current()?.branch_name()
}

/// Get the id and message of a commit in the current repository.
pub fn get_commit_message(reference: &str) -> Result<(String, String)> {
    Repository::open_current()?.get_commit_message(reference)
}
