//! Validation of one normalized instruction line.
use base::prelude::{lookup, InstructionSchema, Opcode, OperandCategory, ValueKind};

use super::document::{Argument, Instruction};
use super::lexer::classify;
use super::types::InstructionError;


const TOKEN_SEPARATOR: char = ' ';

/// Check a normalized line (see [`crate::normalize()`]) and turn it into
/// an [`Instruction`].
///
/// # Errors
///
/// The first problem found, in this order: an unknown mnemonic, the
/// wrong number of operands, then the operands from left to right.
pub fn validate(line: &str) -> Result<Instruction, InstructionError> {
    let mut tokens = line.split(TOKEN_SEPARATOR);
    let mnemonic = tokens.next().unwrap_or_default();
    let operands: Vec<&str> = tokens.collect();

    let schema: InstructionSchema = lookup(mnemonic).map_err(InstructionError::UnknownOpcode)?;
    if operands.len() != schema.arity() {
        return Err(InstructionError::Arity {
            opcode: schema.opcode,
            expected: schema.arity(),
            got: operands.len(),
        });
    }

    let mut arguments = Vec::with_capacity(operands.len());
    for (index, (token, category)) in operands.iter().zip(schema.categories()).enumerate() {
        let position = index + 1;
        let kind = classify(token).map_err(|error| InstructionError::Operand { position, error })?;
        refine(schema.opcode, position, kind)?;
        check_category(schema.opcode, position, category, kind)?;
        arguments.push(Argument::new(kind, token));
    }
    Ok(Instruction {
        opcode: schema.opcode,
        arguments,
    })
}

/// Check that an operand of kind `kind` may appear where `category`
/// is required.
fn check_category(
    opcode: Opcode,
    position: usize,
    category: OperandCategory,
    kind: ValueKind,
) -> Result<(), InstructionError> {
    if category.accepts(kind) {
        Ok(())
    } else {
        Err(InstructionError::CategoryMismatch {
            opcode,
            position,
            expected: category,
            got: kind,
        })
    }
}

/// Restrictions on particular instructions, applied before the
/// general category check.
fn refine(opcode: Opcode, position: usize, kind: ValueKind) -> Result<(), InstructionError> {
    match (opcode, kind) {
        // A bare name pushed onto the data stack is a label, which is
        // not a value.
        (Opcode::PushS, ValueKind::Label) => Err(InstructionError::CategoryMismatch {
            opcode,
            position,
            expected: OperandCategory::Symbol,
            got: kind,
        }),
        _ => Ok(()),
    }
}
