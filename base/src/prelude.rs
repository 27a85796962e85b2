//! The prelude exports the structs which are useful in representing
//! IPPcode23 instructions.  Providing this prelude is the main purpose
//! of the base crate.
pub use super::instruction::*;
pub use super::operand::*;
pub use super::LANGUAGE;
