//! Historical revisions of the answers and signal file formats

use chrono::{Datelike, NaiveDate};

/// The format revision a file was written in, known only from when it was
/// last modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileVersion {
    V1,
    V2,
    V3,
    V4,
    V5,
}

/// Row layout of a sensor trace file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// timestamp, EDA raw, PPG raw
    Legacy,
    /// timestamp, EDA raw, EDA filtered, EDA status, PPG raw, heart rate, HR status
    Current,
}

impl Layout {
    pub fn columns(&self) -> usize {
        match self {
            Layout::Legacy => 3,
            Layout::Current => 7,
        }
    }
}

// Inclusive (year, month, day) bounds of the four historical windows.
// Anything after the last one is the current format.
const WINDOWS: [(FileVersion, (i32, u32, u32), (i32, u32, u32)); 4] = [
    (FileVersion::V1, (2010, 6, 1), (2010, 8, 31)),
    (FileVersion::V2, (2010, 9, 1), (2011, 2, 28)),
    (FileVersion::V3, (2011, 3, 1), (2011, 8, 31)),
    (FileVersion::V4, (2011, 9, 1), (2012, 2, 29)),
];

impl FileVersion {
    /// Map a modification date onto a format revision. Returns `None` for
    /// dates before the first historical window.
    pub fn resolve(modified: NaiveDate) -> Option<FileVersion> {
        let day = (modified.year(), modified.month(), modified.day());

        for (version, first, last) in WINDOWS {
            if day >= first && day <= last {
                return Some(version);
            }
        }

        let (_, _, last) = WINDOWS[WINDOWS.len() - 1];
        if day > last {
            Some(FileVersion::V5)
        } else {
            None
        }
    }

    /// How many trailing lines of an answers file hold the questionnaire.
    /// Earlier lines in historical files are boilerplate. `None` means the
    /// whole file.
    pub fn window(&self) -> Option<usize> {
        match self {
            FileVersion::V1 => Some(84),
            FileVersion::V2 => Some(41),
            FileVersion::V3 => Some(47),
            FileVersion::V4 => Some(20),
            FileVersion::V5 => None,
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            FileVersion::V5 => Layout::Current,
            _ => Layout::Legacy,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            FileVersion::V1 => 1,
            FileVersion::V2 => 2,
            FileVersion::V3 => 3,
            FileVersion::V4 => 4,
            FileVersion::V5 => 5,
        }
    }
}
