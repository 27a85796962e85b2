use std::io::Write;

use tracing::{event, span, Level};

use super::super::document::Document;
use super::super::types::{IoAction, IoFailed, IoTarget};

/// Write the XML form of `document` to `writer`.
///
/// # Errors
///
/// Failure to write or flush `writer`; `target` identifies it in the
/// error.
pub fn write_document<W: Write>(
    document: &Document,
    writer: &mut W,
    target: &IoTarget,
) -> Result<(), IoFailed> {
    let span = span!(Level::ERROR, "write document", target = %target);
    let _enter = span.enter();

    let rendered = document.render();
    event!(
        Level::DEBUG,
        "writing {} instruction(s) as {} bytes of XML",
        document.instructions().len(),
        rendered.len()
    );
    let mut inner = || -> Result<(), std::io::Error> {
        writer.write_all(rendered.as_bytes())?;
        writer.flush()
    };
    inner().map_err(|error| IoFailed {
        action: IoAction::Write,
        target: target.clone(),
        error,
    })
}
