//! Where recovered line problems are sent as they happen.
//!
//! The parser hands every skipped line to a reporter supplied by the caller,
//! in addition to returning the full list with the parsed document.

use tracing::warn;

use crate::language::LineError;

pub trait Report {
    fn skipped(&self, error: &LineError);
}

/// Log each skipped line as a warning.
pub struct Tracing;

impl Report for Tracing {
    fn skipped(&self, error: &LineError) {
        warn!("{}", error);
    }
}

/// Discard; callers inspect `Outcome::skipped` instead.
pub struct Silent;

impl Report for Silent {
    fn skipped(&self, _error: &LineError) {}
}
