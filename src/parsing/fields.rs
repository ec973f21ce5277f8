//! Extract typed values from classified lines.
//!
//! Extractors are pure: they look at one line and either produce a value,
//! report that the field was present but unanswered (`Ok(None)`), or fail
//! with the tag of the family whose grammar the line did not fit. Callers
//! add the filename and line number.

use std::num::NonZeroUsize;

use chrono::{NaiveDate, NaiveTime};

use crate::language::{Layout, Scale, Tag};

/// Outcome of extracting one field. `Ok(None)` is the unanswered variant.
pub type Extracted<T> = Result<Option<T>, Tag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Most {
    Enjoyed,
    Engaged,
}

/// One rating of one song on one scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating {
    pub song: NonZeroUsize,
    pub scale: Scale,
    pub value: Option<u32>,
}

/// One row of a sensor trace. The filtered and status columns are absent in
/// legacy files.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub millis: u64,
    pub eda_raw: f64,
    pub pox_raw: f64,
    pub extended: Option<Extended>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extended {
    pub eda_filtered: f64,
    pub eda_status: i32,
    pub hr: f64,
    pub hr_status: i32,
}

/// Split a questionnaire line of the form
///
/// ```text
/// "<tag>" , symbol <value> ;
/// ```
///
/// into its tag and value. The quotes, comma, `symbol` keyword, and
/// terminating semicolon are all optional; a missing or blank value is
/// returned as `None`.
pub fn split_field(line: &str) -> Option<(&str, Option<&str>)> {
    let re = regex!(r#"^\s*"?([A-Za-z0-9_]+)"?\s*,?\s*(.*?)\s*;?\s*$"#);

    let cap = re.captures(line)?;
    let tag = cap
        .get(1)?
        .as_str();
    let rest = cap
        .get(2)
        .map(|m| m.as_str())
        .unwrap_or("");

    let rest = match rest.strip_prefix("symbol") {
        Some(after) if after.is_empty() || after.starts_with(char::is_whitespace) => after,
        _ => rest,
    };
    let value = rest
        .trim()
        .trim_matches('"')
        .trim();

    if value.is_empty() {
        Some((tag, None))
    } else {
        Some((tag, Some(value)))
    }
}

fn value_of(line: &str, tag: Tag) -> Result<Option<&str>, Tag> {
    match split_field(line) {
        Some((_, value)) => Ok(value),
        None => Err(tag),
    }
}

pub fn sex(line: &str) -> Extracted<String> {
    let Some(value) = value_of(line, Tag::Sex)? else {
        return Ok(None);
    };

    let re = regex!(r"(?i)\b(female|male)\b");
    match re.captures(value) {
        Some(cap) => Ok(Some(cap[1].to_lowercase())),
        None => Err(Tag::Sex),
    }
}

/// Year of birth. A year of 0 is how the questionnaire records "declined"
/// and is returned as is; the caller decides how to store it.
pub fn dob(line: &str) -> Extracted<u16> {
    let Some(value) = value_of(line, Tag::Dob)? else {
        return Ok(None);
    };

    let re = regex!(r"([0-9]{1,4})");
    match re.captures(value) {
        Some(cap) => cap[1]
            .parse()
            .map(Some)
            .map_err(|_| Tag::Dob),
        None => Err(Tag::Dob),
    }
}

pub fn nationality(line: &str) -> Extracted<String> {
    let Some(value) = value_of(line, Tag::Nationality)? else {
        return Ok(None);
    };

    if !value
        .chars()
        .any(char::is_alphabetic)
    {
        return Err(Tag::Nationality);
    }

    Ok(Some(
        value
            .trim()
            .to_lowercase(),
    ))
}

/// Yes or No answers: musical background and the two impairment questions.
pub fn yes_no(line: &str, tag: Tag) -> Extracted<bool> {
    let Some(value) = value_of(line, tag)? else {
        return Ok(None);
    };

    let re = regex!(r"(?i)\b(yes|no)\b");
    match re.captures(value) {
        Some(cap) => Ok(Some(cap[1].eq_ignore_ascii_case("yes"))),
        None => Err(tag),
    }
}

pub fn musical_expertise(line: &str) -> Extracted<u32> {
    let Some(value) = value_of(line, Tag::MusicalExpertise)? else {
        return Ok(None);
    };

    first_integer(value)
        .map(Some)
        .ok_or(Tag::MusicalExpertise)
}

pub fn song_scale(line: &str) -> Extracted<Rating> {
    let (tag, value) = split_field(line).ok_or(Tag::SongScale)?;

    let re = regex!(r"(?i)^Song([0-9]+)_Scale[0-9]+_([A-Za-z_]+)$");
    let cap = re
        .captures(tag)
        .ok_or(Tag::SongScale)?;

    let song = ordinal(&cap[1]).ok_or(Tag::SongScale)?;
    let scale = Scale::from_name(&cap[2]).ok_or(Tag::SongScale)?;

    let Some(value) = value else {
        return Ok(None);
    };

    let re = regex!(r"^[0-9]+$");
    if !re.is_match(value) {
        return Err(Tag::SongScale);
    }
    let value = value
        .parse()
        .map_err(|_| Tag::SongScale)?;

    Ok(Some(Rating {
        song,
        scale,
        value: Some(value),
    }))
}

/// The final questions naming the most enjoyed and most engaging song.
/// "Ejoyed" is a misspelling that shipped in some questionnaires.
pub fn most_enjoyed_engaged(line: &str) -> Extracted<(Most, u32)> {
    let re = regex!(r"(?i)FinalQ_Most_(Enjoyed|Ejoyed|Engaged)");
    let cap = re
        .captures(line)
        .ok_or(Tag::MostEnjoyedEngaged)?;

    let which = if cap[1].eq_ignore_ascii_case("engaged") {
        Most::Engaged
    } else {
        Most::Enjoyed
    };

    let Some(value) = value_of(line, Tag::MostEnjoyedEngaged)? else {
        return Ok(None);
    };

    let number = first_integer(value).ok_or(Tag::MostEnjoyedEngaged)?;
    Ok(Some((which, number)))
}

/// Emotion indices have no unanswered form: a missing value is an error.
pub fn emotion_index(line: &str) -> Result<(NonZeroUsize, f64), Tag> {
    let (tag, value) = split_field(line).ok_or(Tag::EmotionIndex)?;

    let re = regex!(r"(?i)^EmotionIndex([0-9]+)$");
    let cap = re
        .captures(tag)
        .ok_or(Tag::EmotionIndex)?;
    let index = ordinal(&cap[1]).ok_or(Tag::EmotionIndex)?;

    let value = value.ok_or(Tag::EmotionIndex)?;
    let value = value
        .parse::<f64>()
        .map_err(|_| Tag::EmotionIndex)?;

    // NaN and infinity would serialize as null, the same as a missing slot
    if !value.is_finite() {
        return Err(Tag::EmotionIndex);
    }

    Ok((index, value))
}

/// A music style and whether it was ticked. Older questionnaires answer
/// with `symbol Yes`, newer ones with `1`.
pub fn music_style(line: &str) -> Extracted<(String, bool)> {
    let (tag, value) = split_field(line).ok_or(Tag::MusicStyle)?;

    let re = regex!(r"(?i)Music_?Style_(\w+)$");
    let cap = re
        .captures(tag)
        .ok_or(Tag::MusicStyle)?;
    let style = cap[1].to_lowercase();

    let Some(value) = value else {
        return Ok(None);
    };

    let flag = match value
        .to_lowercase()
        .as_str()
    {
        "1" | "yes" => true,
        "0" | "no" => false,
        _ => return Err(Tag::MusicStyle),
    };

    Ok(Some((style, flag)))
}

/// Song codes in presentation order, as listed on the SONGS line.
pub fn song_list(line: &str) -> Result<Vec<String>, Tag> {
    let re = regex!(r"[HRST][0-9]{3}");

    let songs: Vec<String> = re
        .find_iter(line)
        .map(|m| {
            m.as_str()
                .to_string()
        })
        .collect();

    if songs.is_empty() {
        Err(Tag::SongList)
    } else {
        Ok(songs)
    }
}

/// Session date, written month first.
pub fn date(line: &str) -> Result<NaiveDate, Tag> {
    let re = regex!(r"([0-9]{2})-([0-9]{2})-([0-9]{4})");

    let cap = re
        .captures(line)
        .ok_or(Tag::Date)?;
    let month = cap[1]
        .parse()
        .map_err(|_| Tag::Date)?;
    let day = cap[2]
        .parse()
        .map_err(|_| Tag::Date)?;
    let year = cap[3]
        .parse()
        .map_err(|_| Tag::Date)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(Tag::Date)
}

/// A wall clock time `HH:MM:SS` anywhere in the line.
pub fn clock(line: &str) -> Option<NaiveTime> {
    let re = regex!(r"([0-9]{2}):([0-9]{2}):([0-9]{2})");

    let cap = re.captures(line)?;
    let h = cap[1]
        .parse()
        .ok()?;
    let m = cap[2]
        .parse()
        .ok()?;
    let s = cap[3]
        .parse()
        .ok()?;

    NaiveTime::from_hms_opt(h, m, s)
}

/// The ordinal of a `song<N>` timestamp line.
pub fn song_ordinal(line: &str) -> Option<NonZeroUsize> {
    let re = regex!(r#"(?i)^\s*"?song([0-9]+)"?"#);

    let cap = re.captures(line)?;
    ordinal(&cap[1])
}

/// A bare song code leading the line, like `T001, 17:29:38;`.
pub fn song_code(line: &str) -> Option<&str> {
    let re = regex!(r#"^\s*"?([HRST][0-9]{3})\b"#);

    re.captures(line)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// Convert an elapsed time `MM:SS.mmm` into milliseconds. Fractions with
/// fewer than three digits are read as decimal fractions of a second.
pub fn timestamp_to_millis(timestamp: &str) -> Option<u64> {
    let re = regex!(r"^([0-9]+):([0-9]{1,2})\.([0-9]+)$");

    let cap = re.captures(timestamp.trim())?;
    let minutes: u64 = cap[1]
        .parse()
        .ok()?;
    let seconds: u64 = cap[2]
        .parse()
        .ok()?;

    let mut fraction: String = cap[3]
        .chars()
        .take(3)
        .collect();
    while fraction.len() < 3 {
        fraction.push('0');
    }
    let millis: u64 = fraction
        .parse()
        .ok()?;

    minutes
        .checked_mul(60000)?
        .checked_add(seconds * 1000 + millis)
}

/// One whitespace separated row of a sensor trace, laid out according to
/// the file's version.
pub fn signal_row(line: &str, layout: Layout) -> Result<Sample, Tag> {
    let columns: Vec<&str> = line
        .split_whitespace()
        .collect();

    if columns.len() != layout.columns() {
        return Err(Tag::SignalSampleRow);
    }

    let millis = timestamp_to_millis(columns[0]).ok_or(Tag::SignalSampleRow)?;
    let float = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| Tag::SignalSampleRow)
    };
    let integer = |s: &str| {
        s.parse::<i32>()
            .map_err(|_| Tag::SignalSampleRow)
    };

    match layout {
        Layout::Legacy => Ok(Sample {
            millis,
            eda_raw: float(columns[1])?,
            pox_raw: float(columns[2])?,
            extended: None,
        }),
        Layout::Current => Ok(Sample {
            millis,
            eda_raw: float(columns[1])?,
            pox_raw: float(columns[4])?,
            extended: Some(Extended {
                eda_filtered: float(columns[2])?,
                eda_status: integer(columns[3])?,
                hr: float(columns[5])?,
                hr_status: integer(columns[6])?,
            }),
        }),
    }
}

/// Largest song or slot number accepted. Questionnaires have a few dozen
/// slots at most; anything far beyond is a corrupted line.
pub const MAX_ORDINAL: usize = 999;

fn ordinal(digits: &str) -> Option<NonZeroUsize> {
    digits
        .parse::<usize>()
        .ok()
        .filter(|index| *index <= MAX_ORDINAL)
        .and_then(NonZeroUsize::new)
}

fn first_integer(value: &str) -> Option<u32> {
    let re = regex!(r"([0-9]+)");

    re.captures(value)
        .and_then(|cap| {
            cap[1]
                .parse()
                .ok()
        })
}
