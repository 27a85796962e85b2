//! Regular expressions compiled on first use.
use std::{ops::Deref, sync::OnceLock};

use regex::Regex;

pub(crate) struct LazyRegex {
    once: OnceLock<Regex>,
    pattern: &'static str,
}

impl LazyRegex {
    pub(crate) const fn new(pattern: &'static str) -> Self {
        LazyRegex {
            once: OnceLock::new(),
            pattern,
        }
    }

    /// Number of non-overlapping matches in `text`.
    pub(crate) fn count_matches(&self, text: &str) -> usize {
        self.find_iter(text).count()
    }
}

impl Deref for LazyRegex {
    type Target = Regex;

    fn deref(&self) -> &Regex {
        // The patterns are fixed at compile time, so a bad one is a
        // bug in this crate rather than in the input.
        self.once.get_or_init(|| match Regex::new(self.pattern) {
            Ok(r) => r,
            Err(e) => {
                panic!("'{}' is not a valid regular expression: {e}", self.pattern);
            }
        })
    }
}

#[test]
fn test_count_matches() {
    static RX: LazyRegex = LazyRegex::new("a+");
    assert_eq!(RX.count_matches("a b aa"), 2);
    assert_eq!(RX.count_matches(""), 0);
}
