// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for header validation.
//!
//! A header is parsed once; if it matches the grammar, every configured
//! rule runs against the parsed fields and all violations are collected.

mod builtin;
mod engine;
mod validator;

pub use builtin::*;
pub use engine::RuleEngine;
pub use validator::{
    Constraint, HeaderField, ValidationResult, Violation, HEADER_FORMAT_CODE,
};
