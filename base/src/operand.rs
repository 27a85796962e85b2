//! Classification of IPPcode23 operands.
//!
//! There are two related taxonomies here.  [`OperandCategory`]
//! describes what an instruction requires at one operand position
//! (for example `MOVE` requires a variable followed by a symbol).
//! [`ValueKind`] describes what an actual operand turned out to be
//! once it was examined.  A symbol is either a variable or a
//! constant, so `ValueKind` is the finer of the two.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// What an instruction requires at one operand position.
///
/// Schemas always describe three positions; positions beyond the
/// instruction's arity are `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandCategory {
    /// A variable reference such as `GF@counter`.
    Variable,
    /// Either a variable reference or a typed constant.
    Symbol,
    /// A bare name, used as a jump target.
    Label,
    /// One of the type names `int`, `string` or `bool`.
    TypeName,
    /// No operand at this position.
    None,
}

impl OperandCategory {
    /// Returns true when an operand of kind `kind` may appear at a
    /// position requiring `self`.
    #[must_use]
    pub fn accepts(self, kind: ValueKind) -> bool {
        match self {
            OperandCategory::Variable => kind == ValueKind::Var,
            OperandCategory::Symbol => matches!(
                kind,
                ValueKind::Bool | ValueKind::Var | ValueKind::Nil | ValueKind::Int | ValueKind::String
            ),
            OperandCategory::Label => kind == ValueKind::Label,
            OperandCategory::TypeName => kind == ValueKind::TypeName,
            OperandCategory::None => false,
        }
    }

    /// The name used for this category in the language reference
    /// and in diagnostics.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            OperandCategory::Variable => "<var>",
            OperandCategory::Symbol => "<symb>",
            OperandCategory::Label => "<label>",
            OperandCategory::TypeName => "<type>",
            OperandCategory::None => "nothing",
        }
    }
}

impl Display for OperandCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// The concrete classification of an operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Var,
    Nil,
    Int,
    String,
    TypeName,
    Label,
}

impl ValueKind {
    /// The value of the `type` attribute of an argument element.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Var => "var",
            ValueKind::Nil => "nil",
            ValueKind::Int => "int",
            ValueKind::String => "string",
            ValueKind::TypeName => "type",
            ValueKind::Label => "label",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The storage frame of a variable.  In source code the frame is
/// written as a two-letter upper-case marker before the `@`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Frame {
    Global,
    Local,
    Temporary,
}

impl Frame {
    pub const ALL: [Frame; 3] = [Frame::Global, Frame::Local, Frame::Temporary];

    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Frame::Global => "GF",
            Frame::Local => "LF",
            Frame::Temporary => "TF",
        }
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Signals that a string is not exactly one of the frame markers.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NotAFrameMarker(pub String);

impl Display for NotAFrameMarker {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a frame marker", self.0)
    }
}

impl std::error::Error for NotAFrameMarker {}

impl FromStr for Frame {
    type Err = NotAFrameMarker;

    /// Frame markers are case-sensitive.
    fn from_str(s: &str) -> Result<Frame, NotAFrameMarker> {
        Frame::ALL
            .into_iter()
            .find(|frame| frame.marker() == s)
            .ok_or_else(|| NotAFrameMarker(s.to_string()))
    }
}

/// The names which may appear as a `<type>` operand (for example in
/// `READ GF@x int`).
pub const TYPE_NAMES: [&str; 3] = ["int", "string", "bool"];

#[test]
fn test_symbol_accepts_variables_and_constants() {
    for kind in [
        ValueKind::Bool,
        ValueKind::Var,
        ValueKind::Nil,
        ValueKind::Int,
        ValueKind::String,
    ] {
        assert!(OperandCategory::Symbol.accepts(kind), "{kind}");
    }
    assert!(!OperandCategory::Symbol.accepts(ValueKind::Label));
    assert!(!OperandCategory::Symbol.accepts(ValueKind::TypeName));
}

#[test]
fn test_narrow_categories() {
    assert!(OperandCategory::Variable.accepts(ValueKind::Var));
    assert!(!OperandCategory::Variable.accepts(ValueKind::Int));
    assert!(OperandCategory::Label.accepts(ValueKind::Label));
    assert!(!OperandCategory::Label.accepts(ValueKind::TypeName));
    assert!(OperandCategory::TypeName.accepts(ValueKind::TypeName));
    assert!(!OperandCategory::TypeName.accepts(ValueKind::Label));
}

#[test]
fn test_none_accepts_nothing() {
    for kind in [
        ValueKind::Bool,
        ValueKind::Var,
        ValueKind::Nil,
        ValueKind::Int,
        ValueKind::String,
        ValueKind::TypeName,
        ValueKind::Label,
    ] {
        assert!(!OperandCategory::None.accepts(kind));
    }
}

#[test]
fn test_frame_markers_are_case_sensitive() {
    assert_eq!("GF".parse::<Frame>(), Ok(Frame::Global));
    assert_eq!("LF".parse::<Frame>(), Ok(Frame::Local));
    assert_eq!("TF".parse::<Frame>(), Ok(Frame::Temporary));
    assert!("gf".parse::<Frame>().is_err());
    assert!("Tf".parse::<Frame>().is_err());
    assert!("XF".parse::<Frame>().is_err());
}
