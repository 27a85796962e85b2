//! Clean up a raw source line before it is validated.
//!
//! A comment runs from the first `#` to the end of the line.  `#`
//! cannot appear in an operand (a string constant must write it as
//! `\035`), so there is no escaped form to worry about.
use logos::Logos;

pub(crate) const COMMENT_CHAR: char = '#';
const COMMENT_BYTE: u8 = b'#';

/// The part of an undecoded line which comes before its comment.
/// Comments are discarded unread, so they need not be valid UTF-8.
pub(crate) fn strip_comment(raw: &[u8]) -> &[u8] {
    match raw.iter().position(|b| *b == COMMENT_BYTE) {
        Some(pos) => &raw[..pos],
        None => raw,
    }
}

/// The whitespace characters which separate words.
pub(crate) fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

#[derive(Debug, Logos, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\n\r\x0B\x0C]+")]
enum Piece {
    #[regex(r"[^ \t\n\r\x0B\x0C]+")]
    Word,
}

/// The result of normalizing a line.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Normalized {
    /// The line was blank or held only a comment.
    Skip,
    /// The words of the line, separated by single spaces.
    Line(String),
}

impl Normalized {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Normalized::Skip => None,
            Normalized::Line(s) => Some(s.as_str()),
        }
    }
}

/// Strip the comment from `raw`, collapse each run of whitespace to
/// a single space and trim both ends.
#[must_use]
pub fn normalize(raw: &str) -> Normalized {
    let code = match raw.split_once(COMMENT_CHAR) {
        Some((code, _comment)) => code,
        None => raw,
    };
    let mut line = String::with_capacity(code.len());
    let mut lex = Piece::lexer(code);
    // Every character is either blank (skipped) or part of a word, so
    // the lexer cannot report an error; we keep the text regardless.
    while let Some(Ok(Piece::Word) | Err(())) = lex.next() {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(lex.slice());
    }
    if line.is_empty() {
        Normalized::Skip
    } else {
        Normalized::Line(line)
    }
}
