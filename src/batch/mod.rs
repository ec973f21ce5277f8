//! Walk a data directory and parse every experiment-log file found in it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};
use walkdir::WalkDir;

use crate::output;
use crate::parsing::{self, metadata, Report};

/// Counts accumulated over a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tally {
    /// Files parsed successfully, by kind.
    pub by_kind: BTreeMap<&'static str, usize>,
    /// Text files whose names match no known kind.
    pub unknown: usize,
    /// Files that failed outright.
    pub failed: usize,
    /// Lines skipped across all parsed files.
    pub skipped_lines: usize,
}

impl Tally {
    pub fn parsed(&self) -> usize {
        self.by_kind
            .values()
            .sum()
    }
}

/// Every `.txt` file below `root`, in sorted order.
pub fn discover(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| {
            entry
                .file_type()
                .is_file()
        })
        .map(|entry| {
            entry
                .path()
                .to_path_buf()
        })
        .filter(|path| {
            path.extension()
                .is_some_and(|extension| extension == "txt")
        })
        .collect();

    files.sort();
    files
}

/// Parse every recognized file below `root`, one at a time. A file that
/// fails is logged and counted and the run carries on. When `emit` is set
/// each document is written out beside its source file.
pub fn run(root: &Path, reporter: &dyn Report, emit: bool) -> Tally {
    let mut tally = Tally::default();

    let files = discover(root);
    info!("Found {} files below {}", files.len(), root.display());

    for filename in files {
        if metadata::is_ignored(&filename) {
            debug!("Ignoring {}", filename.display());
            continue;
        }

        let kind = match metadata::kind(&filename) {
            Ok(kind) => kind,
            Err(problem) => {
                debug!("{}", problem);
                tally.unknown += 1;
                continue;
            }
        };

        let outcome = match parsing::parse(&filename, reporter) {
            Ok(outcome) => outcome,
            Err(problem) => {
                error!("{}", problem);
                tally.failed += 1;
                continue;
            }
        };

        if emit {
            if let Err(problem) = output::write_fragment(&filename, &outcome.document) {
                error!("{}", problem);
                tally.failed += 1;
                continue;
            }
        }

        tally.skipped_lines += outcome
            .skipped
            .len();
        *tally
            .by_kind
            .entry(kind.name())
            .or_default() += 1;
    }

    tally
}
