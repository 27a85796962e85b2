//! The translated program.
//!
//! A [`Document`] is built up one accepted instruction at a time by a
//! [`ProgramBuilder`], and rendered as XML once the whole input has
//! been accepted:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <program language="IPPcode23">
//!   <instruction order="1" opcode="MOVE">
//!     <arg1 type="var">GF@x</arg1>
//!     <arg2 type="string">hello</arg2>
//!   </instruction>
//! </program>
//! ```
use std::fmt::{self, Display, Formatter, Write};
use std::num::NonZeroUsize;

use tracing::{event, Level};

use base::prelude::{Opcode, ValueKind, LANGUAGE};

use super::lexer::PREFIX_SEPARATOR;

const INDENT: &str = "  ";

/// One operand of an accepted instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    kind: ValueKind,
    /// The text content of the argument element (before XML
    /// escaping).
    value: String,
}

impl Argument {
    /// Build the argument for an operand `token` which has already
    /// been classified as `kind`.
    pub(crate) fn new(kind: ValueKind, token: &str) -> Argument {
        let value = match (kind, token.split_once(PREFIX_SEPARATOR)) {
            (ValueKind::Var, Some((frame, name))) => {
                format!("{}{PREFIX_SEPARATOR}{name}", frame.to_ascii_uppercase())
            }
            (
                ValueKind::Bool | ValueKind::Nil | ValueKind::Int | ValueKind::String,
                Some((_, payload)),
            ) => payload.to_string(),
            // Type names and labels never contain the separator and
            // are used as-is.
            _ => token.to_string(),
        };
        Argument { kind, value }
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// An instruction which passed validation but has not yet been given
/// a place in the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub arguments: Vec<Argument>,
}

/// An instruction together with its position in the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInstruction {
    order: NonZeroUsize,
    instruction: Instruction,
}

impl ValidatedInstruction {
    #[must_use]
    pub fn order(&self) -> usize {
        self.order.get()
    }

    #[must_use]
    pub fn opcode(&self) -> Opcode {
        self.instruction.opcode
    }

    #[must_use]
    pub fn arguments(&self) -> &[Argument] {
        &self.instruction.arguments
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    language: &'static str,
    instructions: Vec<ValidatedInstruction>,
}

impl Document {
    #[must_use]
    pub fn language(&self) -> &str {
        self.language
    }

    #[must_use]
    pub fn instructions(&self) -> &[ValidatedInstruction] {
        &self.instructions
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The XML form of the program.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// Accumulates accepted instructions, numbering them from 1.
#[derive(Debug)]
pub struct ProgramBuilder {
    document: Document,
}

impl Default for ProgramBuilder {
    fn default() -> ProgramBuilder {
        ProgramBuilder::new()
    }
}

impl ProgramBuilder {
    #[must_use]
    pub fn new() -> ProgramBuilder {
        ProgramBuilder {
            document: Document {
                language: LANGUAGE,
                instructions: Vec::new(),
            },
        }
    }

    /// Append `instruction` to the program and return the order
    /// number it was given.
    pub fn append(&mut self, instruction: Instruction) -> usize {
        let order = NonZeroUsize::MIN.saturating_add(self.document.instructions.len());
        event!(
            Level::DEBUG,
            "instruction {order} is {} with {} operand(s)",
            instruction.opcode,
            instruction.arguments.len()
        );
        self.document.instructions.push(ValidatedInstruction { order, instruction });
        order.get()
    }

    #[must_use]
    pub fn finish(self) -> Document {
        self.document
    }
}

/// Writes `text` with the characters which are special in XML text
/// content replaced by entity references.
struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for ch in self.0.chars() {
            match ch {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                other => f.write_char(other)?,
            }
        }
        Ok(())
    }
}

impl Display for ValidatedInstruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{INDENT}<instruction order=\"{}\" opcode=\"{}\"",
            self.order,
            self.opcode()
        )?;
        if self.arguments().is_empty() {
            return f.write_str("/>\n");
        }
        f.write_str(">\n")?;
        for (i, arg) in self.arguments().iter().enumerate() {
            let position = i + 1;
            write!(f, "{INDENT}{INDENT}<arg{position} type=\"{}\"", arg.kind)?;
            if arg.value.is_empty() {
                f.write_str("/>\n")?;
            } else {
                writeln!(f, ">{}</arg{position}>", Escaped(&arg.value))?;
            }
        }
        writeln!(f, "{INDENT}</instruction>")
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n")?;
        write!(f, "<program language=\"{}\"", self.language)?;
        if self.instructions.is_empty() {
            return f.write_str("/>\n");
        }
        f.write_str(">\n")?;
        for instruction in &self.instructions {
            write!(f, "{instruction}")?;
        }
        f.write_str("</program>\n")
    }
}
