//! Output generation: JSON fragments for each parsed file, compiled session
//! documents, and the summary printed at the end of a run.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tinytemplate::TinyTemplate;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::language::Document;
use crate::parsing::metadata;

mod merge;

pub use merge::{is_complete, merge};

/// Problems writing or reading back JSON documents.
#[derive(Debug)]
pub enum OutputError {
    Io {
        filename: PathBuf,
        error: std::io::Error,
    },
    Json {
        filename: PathBuf,
        error: serde_json::Error,
    },
    Template(tinytemplate::error::Error),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Io { filename, error } => {
                write!(f, "{}: {}", filename.display(), error)
            }
            OutputError::Json { filename, error } => {
                write!(f, "{}: invalid JSON: {}", filename.display(), error)
            }
            OutputError::Template(error) => write!(f, "summary: {}", error),
        }
    }
}

impl std::error::Error for OutputError {}

/// Write a document beside the file it was parsed from, as `<stem>.json`.
pub fn write_fragment(source: &Path, document: &Document) -> Result<PathBuf, OutputError> {
    let target = source.with_extension("json");

    let json = serde_json::to_string_pretty(document).map_err(|error| OutputError::Json {
        filename: target.clone(),
        error,
    })?;
    std::fs::write(&target, json).map_err(|error| OutputError::Io {
        filename: target.clone(),
        error,
    })?;

    debug!("Wrote {}", target.display());
    Ok(target)
}

fn read_json(filename: &Path) -> Result<Value, OutputError> {
    let content = std::fs::read_to_string(filename).map_err(|error| OutputError::Io {
        filename: filename.to_path_buf(),
        error,
    })?;
    serde_json::from_str(&content).map_err(|error| OutputError::Json {
        filename: filename.to_path_buf(),
        error,
    })
}

/// Merge the fragments of every session found below `root` into a single
/// `T<terminal>_S<session>.json` per session, alongside the fragments. An
/// existing compiled document is the starting point, so compiling again
/// after adding fragments only adds to it. Returns the number of sessions
/// compiled.
pub fn compile(root: &Path) -> Result<usize, OutputError> {
    let mut sessions: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| {
            entry
                .file_type()
                .is_file()
        })
    {
        let path = entry.path();
        if path
            .extension()
            .map_or(true, |extension| extension != "json")
        {
            continue;
        }

        let Some(target) = metadata::session_document(path) else {
            continue;
        };
        // the compiled document itself is not a fragment
        if target == path {
            continue;
        }

        sessions
            .entry(target)
            .or_default()
            .push(path.to_path_buf());
    }

    for (target, fragments) in &sessions {
        let mut session = if target.exists() {
            read_json(target)?
        } else {
            Value::Object(serde_json::Map::new())
        };

        for fragment in fragments {
            merge(&mut session, read_json(fragment)?);
        }

        if !is_complete(&session) {
            warn!("{}: incomplete session", target.display());
        }

        let json = serde_json::to_string_pretty(&session).map_err(|error| OutputError::Json {
            filename: target.clone(),
            error,
        })?;
        std::fs::write(target, json).map_err(|error| OutputError::Io {
            filename: target.clone(),
            error,
        })?;

        debug!("Compiled {} from {} fragments", target.display(), fragments.len());
    }

    info!("Compiled {} sessions", sessions.len());
    Ok(sessions.len())
}

static SUMMARY: &str = r#"{{ for kind in kinds }}{kind.name}: {kind.count}
{{ endfor }}parsed: {parsed}
unknown: {unknown}
failed: {failed}
skipped lines: {skipped}
"#;

#[derive(Serialize)]
struct Count {
    name: String,
    count: usize,
}

#[derive(Serialize)]
struct Summary {
    kinds: Vec<Count>,
    parsed: usize,
    unknown: usize,
    failed: usize,
    skipped: usize,
}

/// Render the end of run summary for a batch.
pub fn summary(tally: &crate::batch::Tally) -> Result<String, OutputError> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("summary", SUMMARY)
        .map_err(OutputError::Template)?;

    let context = Summary {
        kinds: tally
            .by_kind
            .iter()
            .map(|(name, count)| Count {
                name: name.to_string(),
                count: *count,
            })
            .collect(),
        parsed: tally.parsed(),
        unknown: tally.unknown,
        failed: tally.failed,
        skipped: tally.skipped_lines,
    };

    tt.render("summary", &context)
        .map_err(OutputError::Template)
}
