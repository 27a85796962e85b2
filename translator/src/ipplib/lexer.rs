//! Lexical classification of a single operand.
//!
//! Operands come in two forms.  Those containing `@` have a prefix
//! (before the first `@`) which is either a frame marker (`GF`,
//! `LF`, `TF`) or a constant type (`bool`, `nil`, `int`,
//! `string`).  Those without `@` are either one of the type names
//! accepted by `READ` or a label.
//!
//! Classification knows nothing about which instruction the operand
//! belongs to; the validator decides whether the resulting
//! [`ValueKind`] is acceptable at the operand's position.

use base::prelude::{Frame, ValueKind, TYPE_NAMES};

use super::normalize::{is_blank, COMMENT_CHAR};
use super::types::LexicalError;

mod rx;

use rx::LazyRegex;

pub(crate) const PREFIX_SEPARATOR: char = '@';
const ESCAPE_CHAR: char = '\\';

/// Characters below the space must be written as escape sequences.
/// Most of them may not appear in an XML document at all.
fn is_raw_control(ch: char) -> bool {
    ch < ' '
}

/// Matches one escape sequence in a string constant, for example
/// `\032` (a space).
static RX_ESCAPE: LazyRegex = LazyRegex::new(r"\\[0-9]{3}");

/// Determine what kind of operand `token` is, checking its internal
/// structure along the way.
///
/// # Errors
///
/// Returns the `LexicalError` describing the first problem found in
/// `token`.
pub fn classify(token: &str) -> Result<ValueKind, LexicalError> {
    match token.split_once(PREFIX_SEPARATOR) {
        None => classify_bare(token),
        Some((prefix, suffix)) => classify_prefixed(token, prefix, suffix),
    }
}

fn classify_bare(token: &str) -> Result<ValueKind, LexicalError> {
    if TYPE_NAMES.contains(&token) {
        Ok(ValueKind::TypeName)
    } else {
        check_name(token, token)?;
        Ok(ValueKind::Label)
    }
}

fn is_frame_marker_ignoring_case(prefix: &str) -> bool {
    Frame::ALL
        .iter()
        .any(|frame| frame.marker().eq_ignore_ascii_case(prefix))
}

fn constant_kind(folded_prefix: &str) -> Option<ValueKind> {
    match folded_prefix {
        "bool" => Some(ValueKind::Bool),
        "nil" => Some(ValueKind::Nil),
        "int" => Some(ValueKind::Int),
        "string" => Some(ValueKind::String),
        _ => None,
    }
}

fn classify_prefixed(token: &str, prefix: &str, suffix: &str) -> Result<ValueKind, LexicalError> {
    if prefix.parse::<Frame>().is_ok() {
        check_name(token, suffix)?;
        return Ok(ValueKind::Var);
    }
    if is_frame_marker_ignoring_case(prefix) {
        return Err(LexicalError::Case {
            token: token.to_string(),
        });
    }

    let folded = prefix.to_ascii_lowercase();
    let kind = match constant_kind(&folded) {
        Some(kind) => kind,
        None => {
            return Err(LexicalError::Frame {
                token: token.to_string(),
            });
        }
    };
    if folded != prefix {
        return Err(LexicalError::Case {
            token: token.to_string(),
        });
    }

    match kind {
        ValueKind::Bool if suffix == "true" || suffix == "false" => Ok(kind),
        ValueKind::Nil if suffix == "nil" => Ok(kind),
        ValueKind::Bool | ValueKind::Nil => Err(LexicalError::InvalidLiteral {
            kind,
            token: token.to_string(),
        }),
        ValueKind::Int if suffix.is_empty() => Err(LexicalError::EmptyLiteral {
            kind,
            token: token.to_string(),
        }),
        ValueKind::String => {
            check_string_literal(token, suffix)?;
            Ok(kind)
        }
        _ => Ok(kind),
    }
}

/// Check the name part of a variable, or a whole label.
fn check_name(token: &str, name: &str) -> Result<(), LexicalError> {
    let fail = |reason: &'static str| -> Result<(), LexicalError> {
        Err(LexicalError::Name {
            token: token.to_string(),
            reason,
        })
    };
    match name.chars().next() {
        None => fail("the name is empty"),
        Some(first) if first.is_ascii_digit() => fail("names may not start with a digit"),
        Some(_) if name.contains(PREFIX_SEPARATOR) => fail("names may not contain '@'"),
        Some(_) if name.contains('/') => fail("names may not contain '/'"),
        Some(_) if name.contains(ESCAPE_CHAR) => fail("names may not contain '\\'"),
        Some(_) if name.contains(is_raw_control) => fail("names may not contain control characters"),
        Some(_) => Ok(()),
    }
}

/// Check the content of a `string@` constant.  Characters which
/// could not otherwise appear in a single operand are written as a
/// backslash followed by their three-digit decimal code.
fn check_string_literal(token: &str, content: &str) -> Result<(), LexicalError> {
    let only_blanks = !content.is_empty() && content.chars().all(is_blank);
    if only_blanks || content.contains(COMMENT_CHAR) || content.contains(is_raw_control) {
        return Err(LexicalError::InvalidLiteral {
            kind: ValueKind::String,
            token: token.to_string(),
        });
    }
    let backslashes = content.matches(ESCAPE_CHAR).count();
    if backslashes != RX_ESCAPE.count_matches(content) {
        return Err(LexicalError::Escape {
            token: token.to_string(),
        });
    }
    Ok(())
}
