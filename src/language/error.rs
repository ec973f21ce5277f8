use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use super::Tag;

/// Problems that prevent a file from yielding any document at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    NoLocation(PathBuf),
    NoTerminal(PathBuf),
    NoSessionId(PathBuf),
    UnknownKind(PathBuf),
    Unreadable {
        filename: PathBuf,
        problem: String,
        details: String,
    },
    VersionResolution {
        filename: PathBuf,
        modified: NaiveDate,
    },
    NoResetMarker(PathBuf),
}

impl FileError {
    pub fn filename(&self) -> &Path {
        match self {
            FileError::NoLocation(filename) => filename,
            FileError::NoTerminal(filename) => filename,
            FileError::NoSessionId(filename) => filename,
            FileError::UnknownKind(filename) => filename,
            FileError::Unreadable { filename, .. } => filename,
            FileError::VersionResolution { filename, .. } => filename,
            FileError::NoResetMarker(filename) => filename,
        }
    }

    pub fn message(&self) -> String {
        match self {
            FileError::NoLocation(_) => "no experiment location found in path".to_string(),
            FileError::NoTerminal(_) => "no terminal number found in path".to_string(),
            FileError::NoSessionId(_) => "no valid session id found in filename".to_string(),
            FileError::UnknownKind(_) => "unrecognized kind of file".to_string(),
            FileError::Unreadable { problem, details, .. } => {
                if details.is_empty() {
                    problem.to_string()
                } else {
                    format!("{}: {}", problem, details)
                }
            }
            FileError::VersionResolution { modified, .. } => {
                format!("no file format version for modification date {}", modified)
            }
            FileError::NoResetMarker(_) => "malformed reset file".to_string(),
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.filename()
                .display(),
            self.message()
        )
    }
}

impl std::error::Error for FileError {}

/// A single line that could not be used. These are recovered from: the line
/// is reported and skipped and the rest of the file is still parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    Unprocessed {
        filename: PathBuf,
        line: usize,
        text: String,
    },
    Invalid {
        tag: Tag,
        filename: PathBuf,
        line: usize,
        text: String,
    },
}

impl LineError {
    pub fn filename(&self) -> &Path {
        match self {
            LineError::Unprocessed { filename, .. } => filename,
            LineError::Invalid { filename, .. } => filename,
        }
    }

    /// 1-based line number within the source file.
    pub fn line(&self) -> usize {
        match self {
            LineError::Unprocessed { line, .. } => *line,
            LineError::Invalid { line, .. } => *line,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            LineError::Unprocessed { text, .. } => text,
            LineError::Invalid { text, .. } => text,
        }
    }

    pub fn tag(&self) -> Tag {
        match self {
            LineError::Unprocessed { .. } => Tag::Unclassified,
            LineError::Invalid { tag, .. } => *tag,
        }
    }
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::Unprocessed {
                filename,
                line,
                text,
            } => write!(
                f,
                "Unprocessed line: {}:{} {}",
                filename.display(),
                line,
                text.trim_end()
            ),
            LineError::Invalid {
                tag,
                filename,
                line,
                ..
            } => write!(
                f,
                "Invalid {} line: {}:{}",
                tag.describe(),
                filename.display(),
                line
            ),
        }
    }
}

impl std::error::Error for LineError {}
