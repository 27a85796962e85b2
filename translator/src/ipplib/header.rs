use super::normalize::{normalize, Normalized};

/// The first meaningful line of every program must be this token
/// (letter case is not significant).
pub const HEADER: &str = ".IPPcode23";

/// Returns true if `raw` is a valid header line.  A trailing comment
/// is allowed, anything else on the line is not.
#[must_use]
pub fn is_header(raw: &str) -> bool {
    match normalize(raw) {
        Normalized::Skip => false,
        Normalized::Line(text) => text.eq_ignore_ascii_case(HEADER),
    }
}

#[test]
fn test_header_case_is_ignored() {
    assert!(is_header(".IPPcode23"));
    assert!(is_header(".ippcode23"));
    assert!(is_header(".IPPCODE23"));
    assert!(is_header("  .IPPcode23  \r"));
}

#[test]
fn test_header_with_comment() {
    assert!(is_header(".IPPcode23 # first line"));
    assert!(is_header(".IPPcode23#"));
}

#[test]
fn test_partial_matches_are_rejected() {
    assert!(!is_header(".IPPcode23x"));
    assert!(!is_header(".IPPcode23 x"));
    assert!(!is_header(".IPPcode22"));
    assert!(!is_header("IPPcode23"));
    assert!(!is_header(".IPPcode2"));
    assert!(!is_header("ADD GF@a int@1 int@2"));
    assert!(!is_header("# .IPPcode23"));
}
