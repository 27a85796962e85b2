//! The translation pipeline: header, then one instruction per
//! meaningful line, stopping at the first error.
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::Path;
use std::str;

use tracing::{event, span, Level};

use super::document::{Document, ProgramBuilder};
use super::header::is_header;
use super::normalize::{normalize, strip_comment, Normalized};
use super::source::WithLocation;
use super::types::{IoAction, IoFailed, IoTarget, LineNumber, TranslationFailure};
use super::validator::validate;

mod output;
#[cfg(test)]
mod tests;

pub use output::write_document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    AwaitingHeader,
    Body,
}

/// The state of one translation run.  Lines are fed in one at a
/// time; nothing is shared between runs.
#[derive(Debug)]
pub struct TranslationRun {
    stage: Stage,
    builder: ProgramBuilder,
}

impl Default for TranslationRun {
    fn default() -> TranslationRun {
        TranslationRun::new()
    }
}

impl TranslationRun {
    #[must_use]
    pub fn new() -> TranslationRun {
        TranslationRun {
            stage: Stage::AwaitingHeader,
            builder: ProgramBuilder::new(),
        }
    }

    /// Process the raw source line `raw`, which is line number
    /// `line_number` of the input.
    ///
    /// # Errors
    ///
    /// The line is not a valid header (when one is expected) or not
    /// a valid instruction.  The run should not continue after an
    /// error.
    pub fn feed(&mut self, line_number: LineNumber, raw: &str) -> Result<(), TranslationFailure> {
        let text = match normalize(raw) {
            Normalized::Skip => {
                event!(Level::DEBUG, "line {line_number} is blank or a comment");
                return Ok(());
            }
            Normalized::Line(text) => text,
        };
        match self.stage {
            Stage::AwaitingHeader => {
                if is_header(&text) {
                    event!(Level::DEBUG, "found header on line {line_number}");
                    self.stage = Stage::Body;
                    Ok(())
                } else {
                    Err(TranslationFailure::BadHeader {
                        line: line_number,
                        text,
                    })
                }
            }
            Stage::Body => {
                let instruction = validate(&text).map_err(|e| {
                    TranslationFailure::Instruction(WithLocation::new(e, line_number))
                })?;
                self.builder.append(instruction);
                Ok(())
            }
        }
    }

    /// Complete the run.
    ///
    /// # Errors
    ///
    /// `MissingHeader` if no header line was ever seen.
    pub fn finish(self) -> Result<Document, TranslationFailure> {
        match self.stage {
            Stage::AwaitingHeader => Err(TranslationFailure::MissingHeader),
            Stage::Body => Ok(self.builder.finish()),
        }
    }
}

/// Translate the program read from `reader`.  `source` names the
/// input in error messages.
///
/// # Errors
///
/// Failure to read the input, or the first header, encoding or
/// instruction error in it.  Comments may hold any bytes at all; the
/// rest of each line must be UTF-8.
pub fn translate<R: BufRead>(mut reader: R, source: &IoTarget) -> Result<Document, TranslationFailure> {
    let span = span!(Level::ERROR, "translate", source = %source);
    let _enter = span.enter();

    let mut run = TranslationRun::new();
    let mut raw: Vec<u8> = Vec::new();
    let mut line_number: LineNumber = 0;
    loop {
        raw.clear();
        let got = reader.read_until(b'\n', &mut raw).map_err(|error| IoFailed {
            action: IoAction::Read,
            target: source.clone(),
            error,
        })?;
        if got == 0 {
            break;
        }
        line_number += 1;
        let code = str::from_utf8(strip_comment(&raw))
            .map_err(|_| TranslationFailure::NotUtf8 { line: line_number })?;
        run.feed(line_number, code)?;
    }
    let document = run.finish()?;
    event!(
        Level::INFO,
        "translated {} instruction(s)",
        document.instructions().len()
    );
    Ok(document)
}

/// Translate the program in `input` (standard input if `None`) and
/// write the XML document to `output` (standard output if `None`).
/// Nothing is written unless the whole program is valid.
///
/// # Errors
///
/// See [`translate`]; in addition the output may not be writable.
pub fn translate_file(input: Option<&Path>, output: Option<&Path>) -> Result<(), TranslationFailure> {
    let document = match input {
        None => translate(io::stdin().lock(), &IoTarget::Stdin)?,
        Some(path) => {
            let target = IoTarget::File(path.to_path_buf());
            let file = OpenOptions::new()
                .read(true)
                .open(path)
                .map_err(|error| IoFailed {
                    action: IoAction::Read,
                    target: target.clone(),
                    error,
                })?;
            translate(BufReader::new(file), &target)?
        }
    };

    match output {
        None => write_document(&document, &mut io::stdout().lock(), &IoTarget::Stdout)?,
        Some(path) => {
            let target = IoTarget::File(path.to_path_buf());
            let file = File::create(path).map_err(|error| IoFailed {
                action: IoAction::Write,
                target: target.clone(),
                error,
            })?;
            write_document(&document, &mut BufWriter::new(file), &target)?;
        }
    }
    Ok(())
}
