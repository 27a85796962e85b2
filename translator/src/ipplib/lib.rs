//! Validation and translation of IPPcode23 source into its XML
//! program representation.
#![warn(unreachable_pub)]
#![deny(unsafe_code)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::manual_string_new)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::return_self_not_must_use)]
#![warn(clippy::wildcard_imports)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::match_same_arms)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)] // fix soon
#![allow(clippy::needless_pass_by_value)] // fix soon

mod document;
mod driver;
mod header;
mod lexer;
mod normalize;
mod source;
mod types;
mod validator;

pub use document::{Argument, Document, Instruction, ProgramBuilder, ValidatedInstruction};
pub use driver::*;
pub use header::{is_header, HEADER};
pub use lexer::classify;
pub use normalize::{normalize, Normalized};
pub use source::WithLocation;
pub use types::*;
pub use validator::validate;
