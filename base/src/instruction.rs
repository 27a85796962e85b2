//! The IPPcode23 instruction set and the operands each instruction
//! takes.
//!
//! Every instruction is a mnemonic followed by zero to three
//! operands.  Instructions are grouped by the shape of their operand
//! list; for example `ADD`, `CONCAT` and `SETCHAR` all take a
//! variable followed by two symbols:
//!
//! | Shape              | Mnemonics                                          |
//! |--------------------|----------------------------------------------------|
//! | (none)             | CREATEFRAME PUSHFRAME POPFRAME RETURN BREAK        |
//! | var                | DEFVAR POPS                                        |
//! | label              | CALL LABEL JUMP                                    |
//! | symb               | PUSHS WRITE EXIT DPRINT                            |
//! | var symb           | MOVE INT2CHAR STRLEN TYPE NOT                      |
//! | var symb symb      | ADD SUB MUL IDIV LT GT EQ AND OR STRI2INT CONCAT   |
//! |                    | GETCHAR SETCHAR                                    |
//! | var type           | READ                                               |
//! | label symb symb    | JUMPIFEQ JUMPIFNEQ                                 |
//!
//! The mapping is held in a single table ([`SCHEMA_TABLE`]) so that it
//! can be audited in one place.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use super::operand::OperandCategory;

/// No instruction takes more than this many operands.
pub const MAX_OPERANDS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Opcode {
    // Frames and function calls.
    Move,
    CreateFrame,
    PushFrame,
    PopFrame,
    DefVar,
    Call,
    Return,

    // Data stack.
    PushS,
    PopS,

    // Arithmetic, relational, boolean and conversion instructions.
    Add,
    Sub,
    Mul,
    IDiv,
    Lt,
    Gt,
    Eq,
    And,
    Or,
    Not,
    Int2Char,
    /// Written `STRI2INT` in source code.
    StrI2Int,

    // Input and output.
    Read,
    Write,

    // Strings.
    Concat,
    StrLen,
    GetChar,
    SetChar,

    // Types.
    Type,

    // Control flow.
    Label,
    Jump,
    JumpIfEq,
    JumpIfNeq,
    Exit,

    // Debugging.
    DPrint,
    Break,
}

/// The shape of an instruction's operand list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandShape {
    Nothing,
    Var,
    Symb,
    Label,
    VarSymb,
    VarSymbSymb,
    VarType,
    LabelSymbSymb,
}

impl OperandShape {
    /// The category required at each operand position, padded with
    /// [`OperandCategory::None`].
    #[must_use]
    pub fn categories(self) -> [OperandCategory; MAX_OPERANDS] {
        use OperandCategory::{Label, None, Symbol, TypeName, Variable};
        match self {
            OperandShape::Nothing => [None, None, None],
            OperandShape::Var => [Variable, None, None],
            OperandShape::Symb => [Symbol, None, None],
            OperandShape::Label => [Label, None, None],
            OperandShape::VarSymb => [Variable, Symbol, None],
            OperandShape::VarSymbSymb => [Variable, Symbol, Symbol],
            OperandShape::VarType => [Variable, TypeName, None],
            OperandShape::LabelSymbSymb => [Label, Symbol, Symbol],
        }
    }

    /// The number of operands an instruction of this shape takes.
    #[must_use]
    pub fn arity(self) -> usize {
        self.categories()
            .iter()
            .filter(|cat| **cat != OperandCategory::None)
            .count()
    }
}

impl Display for OperandShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for cat in self.categories() {
            if cat == OperandCategory::None {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{cat}")?;
        }
        if first {
            f.write_str("no operands")?;
        }
        Ok(())
    }
}

/// Canonical mnemonic, opcode and operand shape of every instruction.
pub static SCHEMA_TABLE: [(&str, Opcode, OperandShape); 35] = [
    ("MOVE", Opcode::Move, OperandShape::VarSymb),
    ("CREATEFRAME", Opcode::CreateFrame, OperandShape::Nothing),
    ("PUSHFRAME", Opcode::PushFrame, OperandShape::Nothing),
    ("POPFRAME", Opcode::PopFrame, OperandShape::Nothing),
    ("DEFVAR", Opcode::DefVar, OperandShape::Var),
    ("CALL", Opcode::Call, OperandShape::Label),
    ("RETURN", Opcode::Return, OperandShape::Nothing),
    ("PUSHS", Opcode::PushS, OperandShape::Symb),
    ("POPS", Opcode::PopS, OperandShape::Var),
    ("ADD", Opcode::Add, OperandShape::VarSymbSymb),
    ("SUB", Opcode::Sub, OperandShape::VarSymbSymb),
    ("MUL", Opcode::Mul, OperandShape::VarSymbSymb),
    ("IDIV", Opcode::IDiv, OperandShape::VarSymbSymb),
    ("LT", Opcode::Lt, OperandShape::VarSymbSymb),
    ("GT", Opcode::Gt, OperandShape::VarSymbSymb),
    ("EQ", Opcode::Eq, OperandShape::VarSymbSymb),
    ("AND", Opcode::And, OperandShape::VarSymbSymb),
    ("OR", Opcode::Or, OperandShape::VarSymbSymb),
    ("NOT", Opcode::Not, OperandShape::VarSymb),
    ("INT2CHAR", Opcode::Int2Char, OperandShape::VarSymb),
    ("STRI2INT", Opcode::StrI2Int, OperandShape::VarSymbSymb),
    ("READ", Opcode::Read, OperandShape::VarType),
    ("WRITE", Opcode::Write, OperandShape::Symb),
    ("CONCAT", Opcode::Concat, OperandShape::VarSymbSymb),
    ("STRLEN", Opcode::StrLen, OperandShape::VarSymb),
    ("GETCHAR", Opcode::GetChar, OperandShape::VarSymbSymb),
    ("SETCHAR", Opcode::SetChar, OperandShape::VarSymbSymb),
    ("TYPE", Opcode::Type, OperandShape::VarSymb),
    ("LABEL", Opcode::Label, OperandShape::Label),
    ("JUMP", Opcode::Jump, OperandShape::Label),
    ("JUMPIFEQ", Opcode::JumpIfEq, OperandShape::LabelSymbSymb),
    ("JUMPIFNEQ", Opcode::JumpIfNeq, OperandShape::LabelSymbSymb),
    ("EXIT", Opcode::Exit, OperandShape::Symb),
    ("DPRINT", Opcode::DPrint, OperandShape::Symb),
    ("BREAK", Opcode::Break, OperandShape::Nothing),
];

/// The operand requirements of one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstructionSchema {
    pub opcode: Opcode,
    pub shape: OperandShape,
}

impl InstructionSchema {
    #[must_use]
    pub fn arity(&self) -> usize {
        self.shape.arity()
    }

    #[must_use]
    pub fn categories(&self) -> [OperandCategory; MAX_OPERANDS] {
        self.shape.categories()
    }
}

/// Signals that a mnemonic is not part of the instruction set.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct UnknownOpcode(pub String);

impl Display for UnknownOpcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unknown opcode {}", self.0)
    }
}

impl std::error::Error for UnknownOpcode {}

/// Find the schema for `mnemonic`, ignoring case.
///
/// # Errors
///
/// `UnknownOpcode` when `mnemonic` does not name an instruction.
pub fn lookup(mnemonic: &str) -> Result<InstructionSchema, UnknownOpcode> {
    SCHEMA_TABLE
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(mnemonic))
        .map(|(_, opcode, shape)| InstructionSchema {
            opcode: *opcode,
            shape: *shape,
        })
        .ok_or_else(|| UnknownOpcode(mnemonic.to_string()))
}

impl Opcode {
    /// The mnemonic in canonical (upper) case.
    #[must_use]
    pub fn mnemonic(&self) -> &'static str {
        match SCHEMA_TABLE.iter().find(|(_, opcode, _)| opcode == self) {
            Some((name, _, _)) => name,
            None => unreachable!("every opcode has an entry in SCHEMA_TABLE"),
        }
    }

    #[must_use]
    pub fn schema(&self) -> InstructionSchema {
        match SCHEMA_TABLE.iter().find(|(_, opcode, _)| opcode == self) {
            Some((_, opcode, shape)) => InstructionSchema {
                opcode: *opcode,
                shape: *shape,
            },
            None => unreachable!("every opcode has an entry in SCHEMA_TABLE"),
        }
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Opcode {
    type Err = UnknownOpcode;

    fn from_str(s: &str) -> Result<Opcode, UnknownOpcode> {
        lookup(s).map(|schema| schema.opcode)
    }
}
