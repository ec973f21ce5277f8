//! Parse one experiment-log file into a document.
//!
//! A [`Parser`] is built for a single file. Construction gathers everything
//! that can be known from the path and, for answers and signal files, the
//! format version from the modification date. [`Parser::scan`] then feeds
//! lines through the classifier into the accumulator for the file's kind,
//! recovering from problems one line at a time, and [`Parser::finish`]
//! assembles the document.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::language::{
    Answers, Document, FileError, FileKind, FileVersion, Layout, LineError, Metadata, Payload,
    Site, Tag,
};
use crate::parsing::answers::AnswersState;
use crate::parsing::classify::classify;
use crate::parsing::debug::DebugState;
use crate::parsing::info::InfoState;
use crate::parsing::metadata;
use crate::parsing::report::Report;
use crate::parsing::reset::ResetState;
use crate::parsing::signals::SignalState;

// One accumulator per kind of file.
#[derive(Debug)]
enum State {
    Answers(AnswersState),
    Info(InfoState),
    Signals(SignalState),
    Debug(DebugState),
    Reset(ResetState),
}

/// The result of parsing a file: the document, along with every line that
/// was skipped on the way.
#[derive(Debug)]
pub struct Outcome {
    pub document: Document,
    pub skipped: Vec<LineError>,
}

pub struct Parser<'r> {
    filename: PathBuf,
    kind: FileKind,
    location: Site,
    terminal: u8,
    version: Option<FileVersion>,
    state: State,
    skipped: Vec<LineError>,
    reporter: &'r dyn Report,
}

impl<'r> Parser<'r> {
    /// Gather metadata from the path and, where the format depends on it,
    /// resolve the file version from its modification date.
    pub fn new(filename: &Path, reporter: &'r dyn Report) -> Result<Parser<'r>, FileError> {
        let location = metadata::location(filename)?;
        let terminal = metadata::terminal(filename)?;
        let kind = metadata::kind(filename)?;

        let version = match kind {
            FileKind::Answers | FileKind::Test | FileKind::Song(_) => {
                let modified = super::modified(filename)?;
                let version = FileVersion::resolve(modified).ok_or_else(|| {
                    FileError::VersionResolution {
                        filename: filename.to_path_buf(),
                        modified,
                    }
                })?;
                debug!("{}: format version {}", filename.display(), version.number());
                Some(version)
            }
            _ => None,
        };

        Ok(Parser::assemble(filename, kind, location, terminal, version, reporter))
    }

    /// As [`Parser::new`], but with the format version given rather than
    /// taken from the filesystem.
    pub fn with_version(
        filename: &Path,
        version: FileVersion,
        reporter: &'r dyn Report,
    ) -> Result<Parser<'r>, FileError> {
        let location = metadata::location(filename)?;
        let terminal = metadata::terminal(filename)?;
        let kind = metadata::kind(filename)?;

        Ok(Parser::assemble(filename, kind, location, terminal, Some(version), reporter))
    }

    fn assemble(
        filename: &Path,
        kind: FileKind,
        location: Site,
        terminal: u8,
        version: Option<FileVersion>,
        reporter: &'r dyn Report,
    ) -> Parser<'r> {
        let layout = version
            .map(|version| version.layout())
            .unwrap_or(Layout::Current);

        let state = match &kind {
            FileKind::Answers => State::Answers(AnswersState::new()),
            FileKind::Info => State::Info(InfoState::new()),
            FileKind::Test => State::Signals(SignalState::new("test", layout)),
            FileKind::Song(code) => State::Signals(SignalState::new(code, layout)),
            FileKind::Debug => State::Debug(DebugState::new()),
            FileKind::Reset => State::Reset(ResetState::new()),
        };

        Parser {
            filename: filename.to_path_buf(),
            kind,
            location,
            terminal,
            version,
            state,
            skipped: Vec::new(),
            reporter,
        }
    }

    pub fn version(&self) -> Option<FileVersion> {
        self.version
    }

    /// Lines skipped so far.
    pub fn skipped(&self) -> &[LineError] {
        &self.skipped
    }

    /// The answers accumulated so far, for answers files.
    pub fn answers(&self) -> Option<&Answers> {
        match &self.state {
            State::Answers(state) => Some(state.current()),
            _ => None,
        }
    }

    /// Classify one line and apply it to the accumulator. `number` is the
    /// 1-based line number, used only for reporting.
    pub fn parse_line(&mut self, line: &str, number: usize) -> Result<(), LineError> {
        let tag = classify(&self.kind, line);

        let result = match &mut self.state {
            State::Reset(state) => {
                state.apply(tag, line);
                Ok(())
            }
            State::Debug(_) => Ok(()),
            _ if tag == Tag::Unclassified => {
                return Err(LineError::Unprocessed {
                    filename: self
                        .filename
                        .clone(),
                    line: number,
                    text: line.to_string(),
                });
            }
            State::Answers(state) => state.apply(tag, line),
            State::Info(state) => state.apply(tag, line),
            State::Signals(state) => state.apply(tag, line),
        };

        result.map_err(|tag| LineError::Invalid {
            tag,
            filename: self
                .filename
                .clone(),
            line: number,
            text: line.to_string(),
        })
    }

    /// Parse the content of the file. Line problems are reported, recorded,
    /// and skipped; they never stop the scan.
    pub fn scan(&mut self, content: &str) {
        if let State::Debug(state) = &mut self.state {
            state.scan(content);
            return;
        }

        let lines: Vec<&str> = content
            .lines()
            .collect();

        // historical answers files carry boilerplate ahead of the questionnaire
        let first = match self.kind {
            FileKind::Answers => self
                .version
                .and_then(|version| version.window())
                .map(|window| {
                    lines
                        .len()
                        .saturating_sub(window)
                })
                .unwrap_or(0),
            _ => 0,
        };

        debug!(
            "{}: {} of {} lines in scope",
            self.filename
                .display(),
            lines.len() - first,
            lines.len()
        );

        let in_scope: Vec<(usize, &str)> = lines
            .iter()
            .enumerate()
            .skip(first)
            .map(|(i, line)| (i + 1, *line))
            .filter(|(_, line)| {
                !line
                    .trim()
                    .is_empty()
            })
            .collect();

        // timestamps are combined with the session date, so dates go first
        let (dates, rest): (Vec<_>, Vec<_>) = in_scope
            .into_iter()
            .partition(|(_, line)| classify(&self.kind, line) == Tag::Date);

        for (number, line) in dates
            .into_iter()
            .chain(rest)
        {
            self.attempt(line, number);
        }
    }

    fn attempt(&mut self, line: &str, number: usize) {
        if let Err(error) = self.parse_line(line, number) {
            self.reporter
                .skipped(&error);
            self.skipped
                .push(error);
        }
    }

    /// Derive the session number and assemble the document.
    pub fn finish(self) -> Result<Outcome, FileError> {
        let session_number = metadata::session_number(&self.filename)?;

        let payload = match self.state {
            State::Answers(state) => Payload::Answers(state.into_answers()),
            State::Info(state) => Payload::Info(state.into_info()),
            State::Signals(state) => {
                let (label, trace) = state.into_trace();
                let mut signals = BTreeMap::new();
                signals.insert(label, trace);
                Payload::Signals(signals)
            }
            State::Debug(state) => Payload::Debug(state.into_blocks()),
            State::Reset(state) => match state.into_marker() {
                Some(marker) => Payload::Reset(marker),
                None => return Err(FileError::NoResetMarker(self.filename)),
            },
        };

        Ok(Outcome {
            document: Document {
                metadata: Metadata {
                    location: self.location,
                    terminal: self.terminal,
                    session_number,
                },
                payload,
            },
            skipped: self.skipped,
        })
    }
}
