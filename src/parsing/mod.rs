//! Parsers for experiment-log files

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::language::{FileError, Payload};

mod answers;
pub mod classify;
mod debug;
pub mod fields;
mod info;
pub mod metadata;
pub mod parser;
pub mod report;
mod reset;
mod signals;

pub use parser::{Outcome, Parser};
pub use report::{Report, Silent, Tracing};

/// Read a file and return its content as an owned String. Bytes that are not
/// valid UTF-8 are replaced rather than failing the whole file; the lines
/// they appear on will be reported individually.
pub fn load(filename: &Path) -> Result<String, FileError> {
    match std::fs::read(filename) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(error) => {
            debug!(?error);
            Err(unreadable(filename, error))
        }
    }
}

/// The calendar day, in UTC, on which the file was last modified.
pub fn modified(filename: &Path) -> Result<NaiveDate, FileError> {
    let modified = std::fs::metadata(filename)
        .and_then(|metadata| metadata.modified())
        .map_err(|error| {
            debug!(?error);
            unreadable(filename, error)
        })?;

    let modified: DateTime<Utc> = modified.into();
    Ok(modified.date_naive())
}

fn unreadable(filename: &Path, error: std::io::Error) -> FileError {
    match error.kind() {
        std::io::ErrorKind::NotFound => FileError::Unreadable {
            filename: filename.to_path_buf(),
            problem: "File not found".to_string(),
            details: String::new(),
        },
        _ => FileError::Unreadable {
            filename: filename.to_path_buf(),
            problem: "Failed reading".to_string(),
            details: error
                .kind()
                .to_string(),
        },
    }
}

/// Parse a single file into a document, reporting each skipped line to the
/// given reporter as it happens.
pub fn parse(filename: &Path, reporter: &dyn Report) -> Result<Outcome, FileError> {
    let mut parser = Parser::new(filename, reporter)?;

    let content = load(filename)?;
    parser.scan(&content);

    let outcome = parser.finish()?;

    match &outcome
        .document
        .payload
    {
        Payload::Answers(answers) => {
            debug!(
                "Found {} emotion ind{}",
                answers
                    .emotion_indices
                    .len(),
                if answers
                    .emotion_indices
                    .len()
                    == 1
                {
                    "ex"
                } else {
                    "ices"
                }
            );
        }
        Payload::Info(info) => {
            debug!("Found {} song{}", info.media.len(), if info.media.len() == 1 { "" } else { "s" });
        }
        Payload::Signals(signals) => {
            for (label, trace) in signals {
                debug!("Found {} sample{} for {}", trace.len(), if trace.len() == 1 { "" } else { "s" }, label);
            }
        }
        Payload::Debug(blocks) => {
            debug!("Found {} block{}", blocks.len(), if blocks.len() == 1 { "" } else { "s" });
        }
        Payload::Reset(marker) => {
            debug!(?marker);
        }
    }

    if !outcome
        .skipped
        .is_empty()
    {
        debug!("skipped: {}", outcome.skipped.len());
    }

    Ok(outcome)
}
