use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io::Error as IoError;
use std::path::PathBuf;

use base::prelude::{Opcode, OperandCategory, UnknownOpcode, ValueKind};

use super::source::WithLocation;

/// Line numbers count physical lines of the input, starting at 1.
pub type LineNumber = usize;

/// The process exit status which corresponds to each class of
/// outcome.  Callers rely on these values to tell the classes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitStatus {
    Success,
    /// Invalid or missing command-line usage.
    Usage,
    /// The source could not be opened or read.
    InputFile,
    /// The output could not be created or written.
    OutputFile,
    /// Missing or malformed header line.
    Header,
    /// Unknown instruction mnemonic.
    Opcode,
    /// Wrong operand count, or a lexical or syntactic error in an
    /// operand.
    Syntax,
    Internal,
}

impl ExitStatus {
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Usage => 10,
            ExitStatus::InputFile => 11,
            ExitStatus::OutputFile => 12,
            ExitStatus::Header => 21,
            ExitStatus::Opcode => 22,
            ExitStatus::Syntax => 23,
            ExitStatus::Internal => 99,
        }
    }
}

/// Problems with a single operand, found without knowing which
/// instruction the operand belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    /// A variable or label name contains a forbidden character, starts
    /// with a digit, or is empty.
    Name { token: String, reason: &'static str },
    /// A `bool@` or `nil@` constant has a value its type does not
    /// allow, or a `string@` constant contains a forbidden character.
    InvalidLiteral { kind: ValueKind, token: String },
    /// A constant (such as `int@`) has no value at all.
    EmptyLiteral { kind: ValueKind, token: String },
    /// A backslash in a string constant does not introduce a
    /// three-digit escape sequence.
    Escape { token: String },
    /// A frame marker or type prefix is written in the wrong case.
    Case { token: String },
    /// The part before the `@` is neither a frame marker nor a type.
    Frame { token: String },
}

impl Display for LexicalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            LexicalError::Name { token, reason } => {
                write!(f, "invalid name in '{token}': {reason}")
            }
            LexicalError::InvalidLiteral { kind, token } => {
                write!(f, "'{token}' is not a valid {kind} constant")
            }
            LexicalError::EmptyLiteral { kind, token } => {
                write!(f, "{kind} constant '{token}' has no value")
            }
            LexicalError::Escape { token } => {
                write!(
                    f,
                    "'{token}' contains a backslash which is not followed by exactly three decimal digits"
                )
            }
            LexicalError::Case { token } => {
                write!(f, "'{token}' has a frame or type prefix in the wrong case")
            }
            LexicalError::Frame { token } => {
                write!(f, "'{token}' does not start with a known frame or type")
            }
        }
    }
}

impl Error for LexicalError {}

/// Reasons for rejecting one instruction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionError {
    UnknownOpcode(UnknownOpcode),
    Arity {
        opcode: Opcode,
        expected: usize,
        got: usize,
    },
    CategoryMismatch {
        opcode: Opcode,
        /// Operand positions count from 1.
        position: usize,
        expected: OperandCategory,
        got: ValueKind,
    },
    Operand {
        position: usize,
        error: LexicalError,
    },
}

impl InstructionError {
    #[must_use]
    pub fn status(&self) -> ExitStatus {
        match self {
            InstructionError::UnknownOpcode(_) => ExitStatus::Opcode,
            InstructionError::Arity { .. }
            | InstructionError::CategoryMismatch { .. }
            | InstructionError::Operand { .. } => ExitStatus::Syntax,
        }
    }
}

impl Display for InstructionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            InstructionError::UnknownOpcode(e) => e.fmt(f),
            InstructionError::Arity {
                opcode,
                expected,
                got,
            } => {
                write!(
                    f,
                    "{opcode} takes {} ({expected} operands) but {got} were given",
                    opcode.schema().shape
                )
            }
            InstructionError::CategoryMismatch {
                opcode,
                position,
                expected,
                got,
            } => {
                write!(
                    f,
                    "operand {position} of {opcode} must be {expected} but a {got} operand was given"
                )
            }
            InstructionError::Operand { position, error } => {
                write!(f, "operand {position}: {error}")
            }
        }
    }
}

impl Error for InstructionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoAction {
    Read,
    Write,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoTarget {
    File(PathBuf),
    Stdin,
    Stdout,
}

impl Display for IoTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            IoTarget::File(path) => write!(f, "file {}", path.display()),
            IoTarget::Stdin => f.write_str("standard input"),
            IoTarget::Stdout => f.write_str("standard output"),
        }
    }
}

#[derive(Debug)]
pub struct IoFailed {
    pub action: IoAction,
    pub target: IoTarget,
    pub error: IoError,
}

impl Display for IoFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        let verb = match self.action {
            IoAction::Read => "read",
            IoAction::Write => "write",
        };
        write!(f, "failed to {verb} {}: {}", self.target, self.error)
    }
}

impl Error for IoFailed {}

/// Reasons why a whole translation run failed.  The first failure
/// ends the run.
#[derive(Debug)]
pub enum TranslationFailure {
    Io(IoFailed),
    /// The input contained nothing but blank lines and comments.
    MissingHeader,
    BadHeader {
        line: LineNumber,
        text: String,
    },
    /// The part of a line outside its comment is not valid UTF-8.
    NotUtf8 {
        line: LineNumber,
    },
    Instruction(WithLocation<InstructionError>),
}

impl TranslationFailure {
    #[must_use]
    pub fn status(&self) -> ExitStatus {
        match self {
            TranslationFailure::Io(IoFailed {
                action: IoAction::Read,
                ..
            }) => ExitStatus::InputFile,
            TranslationFailure::Io(IoFailed {
                action: IoAction::Write,
                ..
            }) => ExitStatus::OutputFile,
            TranslationFailure::MissingHeader | TranslationFailure::BadHeader { .. } => {
                ExitStatus::Header
            }
            TranslationFailure::NotUtf8 { .. } => ExitStatus::Syntax,
            TranslationFailure::Instruction(e) => e.inner().status(),
        }
    }
}

impl Display for TranslationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            TranslationFailure::Io(e) => e.fmt(f),
            TranslationFailure::MissingHeader => {
                f.write_str("input does not begin with the .IPPcode23 header")
            }
            TranslationFailure::BadHeader { line, text } => {
                write!(f, "line {line}: invalid header '{text}'")
            }
            TranslationFailure::NotUtf8 { line } => {
                write!(f, "line {line}: text outside a comment is not valid UTF-8")
            }
            TranslationFailure::Instruction(e) => e.fmt(f),
        }
    }
}

impl Error for TranslationFailure {}

impl From<IoFailed> for TranslationFailure {
    fn from(e: IoFailed) -> TranslationFailure {
        TranslationFailure::Io(e)
    }
}

#[test]
fn test_status_codes_are_distinct() {
    use std::collections::HashSet;
    let all = [
        ExitStatus::Success,
        ExitStatus::Usage,
        ExitStatus::InputFile,
        ExitStatus::OutputFile,
        ExitStatus::Header,
        ExitStatus::Opcode,
        ExitStatus::Syntax,
        ExitStatus::Internal,
    ];
    let codes: HashSet<i32> = all.iter().map(|s| s.code()).collect();
    assert_eq!(codes.len(), all.len());
    assert_eq!(ExitStatus::Header.code(), 21);
    assert_eq!(ExitStatus::Opcode.code(), 22);
    assert_eq!(ExitStatus::Syntax.code(), 23);
}

#[test]
fn test_instruction_error_status() {
    let unknown = InstructionError::UnknownOpcode(UnknownOpcode("FOOBAR".to_string()));
    assert_eq!(unknown.status(), ExitStatus::Opcode);
    let arity = InstructionError::Arity {
        opcode: Opcode::Move,
        expected: 2,
        got: 1,
    };
    assert_eq!(arity.status(), ExitStatus::Syntax);
    assert_eq!(
        arity.to_string(),
        "MOVE takes <var> <symb> (2 operands) but 1 were given"
    );
}
