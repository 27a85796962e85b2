//! The `base` crate defines the IPPcode23-related things which are
//! useful in both a parser and other associated tools.  The idea is
//! that if you want to write an interpreter, it would depend on the
//! base crate but would not need to depend on the translator library
//! itself.

pub mod instruction;
pub mod operand;
pub mod prelude;

/// The language identifier used in the source header and in the
/// translated program.
pub const LANGUAGE: &str = "IPPcode23";
