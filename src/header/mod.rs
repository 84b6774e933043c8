// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit header handling.
//!
//! A header is the first line of a commit message and must have the shape
//! `type: TICKETKEY-TICKETNUMBER description`.

mod extract;
mod parser;

pub use extract::extract_header;
pub use parser::{FormatError, ParsedHeader};
