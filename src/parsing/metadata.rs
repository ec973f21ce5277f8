//! Session facts derived from file paths.
//!
//! Every file is named `T<terminal>_S<session>_<kind>.txt` and lives
//! somewhere below a directory named for the site it was recorded at.

use std::path::{Path, PathBuf};

use crate::language::{FileError, FileKind, Site};

pub fn location(filename: &Path) -> Result<Site, FileError> {
    let path = filename
        .to_string_lossy()
        .to_lowercase();

    Site::ALL
        .into_iter()
        .find(|site| path.contains(site.token()))
        .ok_or_else(|| FileError::NoLocation(filename.to_path_buf()))
}

pub fn terminal(filename: &Path) -> Result<u8, FileError> {
    let re = regex!(r"T([0-9])_S[0-9]+_[^/\\]*\.txt");

    let path = filename.to_string_lossy();
    re.captures(&path)
        .and_then(|cap| {
            cap[1]
                .parse()
                .ok()
        })
        .ok_or_else(|| FileError::NoTerminal(filename.to_path_buf()))
}

pub fn session_number(filename: &Path) -> Result<u32, FileError> {
    let re = regex!(r"T[0-9]_S([0-9]{4,})_[^/\\]*\.txt");

    let path = filename.to_string_lossy();
    re.captures(&path)
        .and_then(|cap| {
            cap[1]
                .parse()
                .ok()
        })
        .ok_or_else(|| FileError::NoSessionId(filename.to_path_buf()))
}

/// Decide what kind of file this is from its name alone.
pub fn kind(filename: &Path) -> Result<FileKind, FileError> {
    let re = regex!(r"T[0-9]_S[0-9]{4,}_(1nfo|TEST|answers|debug|RESET|[HRST][0-9]{3})\.txt$");

    let path = filename.to_string_lossy();
    let cap = re
        .captures(&path)
        .ok_or_else(|| FileError::UnknownKind(filename.to_path_buf()))?;

    let kind = match &cap[1] {
        "1nfo" => FileKind::Info,
        "TEST" => FileKind::Test,
        "answers" => FileKind::Answers,
        "debug" => FileKind::Debug,
        "RESET" => FileKind::Reset,
        code => FileKind::Song(code.to_string()),
    };

    Ok(kind)
}

/// Files that share a session's naming convention but carry nothing to
/// parse.
pub fn is_ignored(filename: &Path) -> bool {
    let re = regex!(r"T[0-9]_S[0-9]{4,}_email\.txt$");

    re.is_match(&filename.to_string_lossy())
}

/// The `T<terminal>_S<session>` prefix shared by every file of a session.
pub fn session_prefix(filename: &Path) -> Option<String> {
    let re = regex!(r"^(T[0-9]_S[0-9]{4,})(?:_|\.)");

    let name = filename.file_name()?;
    let name = name.to_string_lossy();
    re.captures(&name)
        .map(|cap| cap[1].to_string())
}

/// Where the compiled document for a session lives, next to its files.
pub fn session_document(filename: &Path) -> Option<PathBuf> {
    let prefix = session_prefix(filename)?;
    Some(filename.with_file_name(format!("{}.json", prefix)))
}
