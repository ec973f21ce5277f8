//! Types representing a parsed experiment-log file

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// Experiment locations. The order here is the order in which the site
/// tokens are matched against a file's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Dublin,
    Nyc,
    Bergen,
    Singapore,
    Manila,
}

impl Site {
    pub const ALL: [Site; 5] = [
        Site::Dublin,
        Site::Nyc,
        Site::Bergen,
        Site::Singapore,
        Site::Manila,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Site::Dublin => "dublin",
            Site::Nyc => "nyc",
            Site::Bergen => "bergen",
            Site::Singapore => "singapore",
            Site::Manila => "manila",
        }
    }
}

/// Facts about a session derived purely from the path of one of its files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub location: Site,
    pub terminal: u8,
    pub session_number: u32,
}

/// The kind of file, as given by the suffix of its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileKind {
    Info,
    Answers,
    Test,
    Song(String),
    Debug,
    Reset,
}

impl FileKind {
    pub fn name(&self) -> &'static str {
        match self {
            FileKind::Info => "info",
            FileKind::Answers => "answers",
            FileKind::Test => "test",
            FileKind::Song(_) => "song",
            FileKind::Debug => "debug",
            FileKind::Reset => "reset",
        }
    }
}

/// Semantic families a single raw line can belong to. Classification picks
/// exactly one of these per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Sex,
    Dob,
    Nationality,
    MusicalBackground,
    MusicalExpertise,
    HearingImpairment,
    VisualImpairment,
    SongScale,
    MostEnjoyedEngaged,
    EmotionIndex,
    MusicStyle,
    Date,
    StartTimestamp,
    TestTimestamp,
    EndTimestamp,
    SongList,
    SongTimestamp,
    ResetMarker,
    SignalSampleRow,
    Unclassified,
}

impl Tag {
    /// Human readable name of the field family, used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Tag::Sex => "sex",
            Tag::Dob => "DOB",
            Tag::Nationality => "nationality",
            Tag::MusicalBackground => "musical background",
            Tag::MusicalExpertise => "musical expertise",
            Tag::HearingImpairment => "hearing impairments",
            Tag::VisualImpairment => "visual impairments",
            Tag::SongScale => "song scale",
            Tag::MostEnjoyedEngaged => "most enjoyed / engaged",
            Tag::EmotionIndex => "emotion index",
            Tag::MusicStyle => "music style",
            Tag::Date => "date",
            Tag::StartTimestamp => "start timestamp",
            Tag::TestTimestamp => "test timestamp",
            Tag::EndTimestamp => "end timestamp",
            Tag::SongList => "song list",
            Tag::SongTimestamp => "song timestamp",
            Tag::ResetMarker => "reset marker",
            Tag::SignalSampleRow => "signal sample",
            Tag::Unclassified => "unclassified",
        }
    }
}

/// The rating scales subjects answered for every song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Scale {
    Engagement,
    Positivity,
    Activity,
    Power,
    Chills,
    LikeDislike,
    Familiarity,
}

impl Scale {
    pub fn name(&self) -> &'static str {
        match self {
            Scale::Engagement => "engagement",
            Scale::Positivity => "positivity",
            Scale::Activity => "activity",
            Scale::Power => "power",
            Scale::Chills => "chills",
            Scale::LikeDislike => "like_dislike",
            Scale::Familiarity => "familiarity",
        }
    }

    /// Case-insensitive lookup by the name used in answers files.
    pub fn from_name(name: &str) -> Option<Scale> {
        match name
            .to_lowercase()
            .as_str()
        {
            "engagement" => Some(Scale::Engagement),
            "positivity" => Some(Scale::Positivity),
            "activity" => Some(Scale::Activity),
            "power" => Some(Scale::Power),
            "chills" => Some(Scale::Chills),
            "like_dislike" => Some(Scale::LikeDislike),
            "familiarity" => Some(Scale::Familiarity),
            _ => None,
        }
    }
}

/// One parsed file: metadata plus the payload specific to its kind. The
/// payload serializes under a key unique to the kind so that documents for
/// the same session can be deep-merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub metadata: Metadata,
    #[serde(flatten)]
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    Answers(Answers),
    Info(Info),
    Signals(BTreeMap<String, SignalTrace>),
    Debug(Vec<DebugBlock>),
    Reset(ResetMarker),
}

/// Questionnaire answers. `None` means the question was unanswered or the
/// line carrying it could not be read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Answers {
    pub sex: Option<String>,
    pub dob: Option<u16>,
    pub nationality: Option<String>,
    pub musical_background: Option<bool>,
    pub musical_expertise: Option<u32>,
    pub hearing_impairments: Option<bool>,
    pub visual_impairments: Option<bool>,
    pub most_enjoyed: Option<u32>,
    pub most_engaged: Option<u32>,
    pub music_styles: Vec<String>,
    pub emotion_indices: Vec<Option<f64>>,
    pub song_ratings: BTreeMap<String, Vec<Option<u32>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Info {
    pub date: Option<String>,
    pub media: Vec<String>,
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timestamps {
    pub start: Option<String>,
    pub test: Option<String>,
    pub end: Option<String>,
    pub media: Vec<Option<String>>,
}

/// Parallel sequences of sensor samples, one entry per row of the source
/// file. Legacy three-column files only fill `timestamps`, `eda_raw` and
/// `pox_raw`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignalTrace {
    pub timestamps: Vec<u64>,
    pub eda_raw: Vec<f64>,
    pub eda_filtered: Vec<f64>,
    pub eda_status: Vec<i32>,
    pub pox_raw: Vec<f64>,
    pub hr: Vec<f64>,
    pub hr_status: Vec<i32>,
}

impl SignalTrace {
    pub fn len(&self) -> usize {
        self.timestamps
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps
            .is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugBlock {
    pub start: String,
    pub end: String,
    pub length: f64,
}

/// Where a session was reset. An empty reset file carries no slide label
/// and is recorded as `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetMarker {
    Slide(String),
    Blank,
}

impl Serialize for ResetMarker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResetMarker::Slide(label) => serializer.serialize_str(label),
            ResetMarker::Blank => serializer.serialize_bool(true),
        }
    }
}
