//! Listing errors

use std::fmt;

/// Errors from the filter/tab controller.
///
/// Out-of-range pages are not errors (they clamp) and neither are empty
/// buckets. The only failure is naming a bucket that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// The requested filter is not part of the board's enumeration
    InvalidFilterKind {
        kind: String,
        expected: Vec<&'static str>,
    },
}

impl fmt::Display for ListingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFilterKind { kind, expected } => write!(
                f,
                "Invalid filter kind {:?} (expected one of: {})",
                kind,
                expected.join(", ")
            ),
        }
    }
}

impl std::error::Error for ListingError {}
