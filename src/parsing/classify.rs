//! Decide which field family a raw line belongs to.
//!
//! Each kind of file has an ordered table of rules and the first one that
//! matches wins. Order matters: the song-scale rule precedes anything that
//! would match a bare "song" and the demographic rules are ordered as the
//! questionnaire is.

use crate::language::{FileKind, Tag};

struct Rule {
    tag: Tag,
    test: fn(&str) -> bool,
}

// Answers rules are given the upper-cased line.
const ANSWERS: &[Rule] = &[
    Rule {
        tag: Tag::Sex,
        test: is_sex,
    },
    Rule {
        tag: Tag::Dob,
        test: is_dob,
    },
    Rule {
        tag: Tag::Nationality,
        test: is_nationality,
    },
    Rule {
        tag: Tag::MusicalBackground,
        test: is_musical_background,
    },
    Rule {
        tag: Tag::MusicalExpertise,
        test: is_musical_expertise,
    },
    Rule {
        tag: Tag::HearingImpairment,
        test: is_hearing_impairment,
    },
    Rule {
        tag: Tag::VisualImpairment,
        test: is_visual_impairment,
    },
    Rule {
        tag: Tag::SongScale,
        test: is_song_scale,
    },
    Rule {
        tag: Tag::MostEnjoyedEngaged,
        test: is_most_enjoyed_engaged,
    },
    Rule {
        tag: Tag::EmotionIndex,
        test: is_emotion_index,
    },
    Rule {
        tag: Tag::MusicStyle,
        test: is_music_style,
    },
];

// Info rules are given the upper-cased leading token of the line.
const INFO: &[Rule] = &[
    Rule {
        tag: Tag::SongList,
        test: is_song_list,
    },
    Rule {
        tag: Tag::Date,
        test: is_date,
    },
    Rule {
        tag: Tag::StartTimestamp,
        test: is_start,
    },
    Rule {
        tag: Tag::TestTimestamp,
        test: is_test,
    },
    Rule {
        tag: Tag::EndTimestamp,
        test: is_end,
    },
    Rule {
        tag: Tag::SongTimestamp,
        test: is_song_timestamp,
    },
];

/// Classify one line of a file of the given kind. Lines that no rule
/// recognizes come back as [`Tag::Unclassified`].
pub fn classify(kind: &FileKind, line: &str) -> Tag {
    match kind {
        FileKind::Answers => {
            let upper = line.to_uppercase();
            first_match(ANSWERS, &upper)
        }
        FileKind::Info => match leading_token(line) {
            Some(token) => first_match(INFO, &token.to_uppercase()),
            None => Tag::Unclassified,
        },
        FileKind::Test | FileKind::Song(_) => Tag::SignalSampleRow,
        FileKind::Reset => {
            if is_reset_marker(line) {
                Tag::ResetMarker
            } else {
                Tag::Unclassified
            }
        }
        // debug files are matched as a whole, not line by line
        FileKind::Debug => Tag::Unclassified,
    }
}

fn first_match(rules: &[Rule], content: &str) -> Tag {
    rules
        .iter()
        .find(|rule| (rule.test)(content))
        .map(|rule| rule.tag)
        .unwrap_or(Tag::Unclassified)
}

/// The first word of a line, with any surrounding quote removed.
pub(crate) fn leading_token(line: &str) -> Option<&str> {
    let re = regex!(r#"^\s*"?(\w+)"?"#);

    re.captures(line)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

fn is_sex(content: &str) -> bool {
    content.contains("SEX")
}

fn is_dob(content: &str) -> bool {
    content.contains("DOB")
}

fn is_nationality(content: &str) -> bool {
    content.contains("NATIONALITY")
}

fn is_musical_background(content: &str) -> bool {
    content.contains("MUSICAL_BACKGROUND")
}

fn is_musical_expertise(content: &str) -> bool {
    content.contains("MUSICAL_EXPERTISE")
}

fn is_hearing_impairment(content: &str) -> bool {
    content.contains("HEARING_IMPAIRMENT")
}

fn is_visual_impairment(content: &str) -> bool {
    content.contains("VISUAL_IMPAIRMENT")
}

fn is_song_scale(content: &str) -> bool {
    let re = regex!(r"SONG[0-9]+_SCALE[0-9]+");
    re.is_match(content)
}

fn is_most_enjoyed_engaged(content: &str) -> bool {
    content.contains("FINALQ_MOST")
}

fn is_emotion_index(content: &str) -> bool {
    content.contains("EMOTIONINDEX")
}

fn is_music_style(content: &str) -> bool {
    let re = regex!(r"MUSIC_?STYLE");
    re.is_match(content)
}

fn is_song_list(token: &str) -> bool {
    token == "SONGS"
}

fn is_date(token: &str) -> bool {
    token == "DATE"
}

fn is_start(token: &str) -> bool {
    token == "START"
}

fn is_test(token: &str) -> bool {
    token == "TEST"
}

fn is_end(token: &str) -> bool {
    token == "END"
}

// Either an ordinal like "song2" or a bare song code like "H015". Whether a
// code really names one of this session's songs is decided when extracting.
fn is_song_timestamp(token: &str) -> bool {
    let re = regex!(r"^(?:SONG[0-9]+|[HRST][0-9]{3})$");
    re.is_match(token)
}

fn is_reset_marker(line: &str) -> bool {
    line.trim_start()
        .starts_with("Slide")
}
