//! Locations within the original input.
use std::fmt::{self, Display, Formatter};

use super::types::LineNumber;

/// Attaches the number of the source line it came from to a value
/// (usually an error).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WithLocation<T> {
    pub(crate) inner: T,
    pub(crate) line: LineNumber,
}

impl<T> WithLocation<T> {
    pub fn new(inner: T, line: LineNumber) -> WithLocation<T> {
        WithLocation { inner, line }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Display> Display for WithLocation<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, &self.inner)
    }
}

#[test]
fn test_display_prefixes_line_number() {
    let located = WithLocation::new("unknown opcode FOOBAR", 7);
    assert_eq!(located.to_string(), "line 7: unknown opcode FOOBAR");
    assert_eq!(located.line, 7);
}
