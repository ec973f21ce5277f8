//! Accumulator for reset files, which say where a session was restarted.

use crate::language::{ResetMarker, Tag};

#[derive(Debug)]
pub struct ResetState {
    marker: Option<String>,
    blank: bool,
}

impl Default for ResetState {
    fn default() -> Self {
        ResetState {
            marker: None,
            blank: true,
        }
    }
}

impl ResetState {
    pub fn new() -> ResetState {
        ResetState::default()
    }

    /// Lines other than the slide marker carry nothing and are ignored.
    /// Only the first slide marker counts.
    pub fn apply(&mut self, tag: Tag, line: &str) {
        if !line
            .trim()
            .is_empty()
        {
            self.blank = false;
        }

        if tag == Tag::ResetMarker && self.marker.is_none() {
            self.marker = Some(
                line.trim()
                    .to_string(),
            );
        }
    }

    /// `None` when the body had content but no slide marker.
    pub fn into_marker(self) -> Option<ResetMarker> {
        match self.marker {
            Some(label) => Some(ResetMarker::Slide(label)),
            None if self.blank => Some(ResetMarker::Blank),
            None => None,
        }
    }
}
