use eim::language::{FileError, LineError, Tag};

/// Generate problem and detail messages for a skipped line.
pub fn generate_error_message(error: &LineError) -> (String, String) {
    match error {
        LineError::Unprocessed { .. } => (
            "Unprocessed line".to_string(),
            r#"
This line did not match any field the parser knows about for this kind of
file. It has been skipped; the rest of the file was still read.
            "#
            .trim_ascii()
            .to_string(),
        ),
        LineError::Invalid { tag, .. } => (
            format!("Invalid {} line", tag.describe()),
            expected_form(*tag),
        ),
    }
}

fn expected_form(tag: Tag) -> String {
    match tag {
        Tag::Sex => r#"
A sex line names either Male or Female after the field tag, for example

    "01a_Sex" , symbol Female ;
        "#
        .trim_ascii()
        .to_string(),
        Tag::Dob => r#"
A date of birth line gives the year after the field tag, for example

    "01b_DOB" , 1983 ;

A year of 0 is recorded as no answer.
        "#
        .trim_ascii()
        .to_string(),
        Tag::MusicalBackground | Tag::HearingImpairment | Tag::VisualImpairment => format!(
            "The answer to the {} question must be Yes or No.",
            tag.describe()
        ),
        Tag::MusicalExpertise | Tag::MostEnjoyedEngaged => {
            format!("The {} answer must be a whole number.", tag.describe())
        }
        Tag::SongScale => r#"
A rating line names the song and the scale, then gives a whole number, for
example

    "Song2_Scale4_Power" , 5 ;

The scale must be one of engagement, positivity, activity, power, chills,
like_dislike, or familiarity.
        "#
        .trim_ascii()
        .to_string(),
        Tag::EmotionIndex => r#"
An emotion index line must carry a number; unlike the questionnaire fields
there is no unanswered form. For example

    "EmotionIndex2" , 36.4641 ;
        "#
        .trim_ascii()
        .to_string(),
        Tag::MusicStyle => {
            "A music style is ticked with 1 or Yes and left unticked with 0 or No.".to_string()
        }
        Tag::Date => "Session dates are written month first, as MM-DD-YYYY.".to_string(),
        Tag::StartTimestamp | Tag::TestTimestamp | Tag::EndTimestamp | Tag::SongTimestamp => {
            format!(
                r#"
A {} needs a time of day written HH:MM:SS, and a DATE line somewhere in the
file to combine it with.
                "#,
                tag.describe()
            )
            .trim_ascii()
            .to_string()
        }
        Tag::SongList => r#"
The SONGS line lists the song codes played, joined by hyphens, for example

    SONGS , symbol "R014.wav-S001.wav-S012.wav" ;
        "#
        .trim_ascii()
        .to_string(),
        Tag::SignalSampleRow => r#"
Sensor rows are whitespace separated. Files from before March 2012 have three
columns (elapsed time, EDA, pulse oximeter); later files have seven (elapsed
time, EDA raw, EDA filtered, EDA status, pulse oximeter, heart rate, heart
rate status). Elapsed time is written MM:SS.mmm.
        "#
        .trim_ascii()
        .to_string(),
        Tag::Nationality => "A nationality must be given as text.".to_string(),
        Tag::ResetMarker | Tag::Unclassified => String::new(),
    }
}

/// Generate problem and detail messages for a file that could not be parsed.
pub fn generate_file_message(error: &FileError) -> (String, String) {
    let details = match error {
        FileError::NoLocation(_) => {
            "The path must include a directory named for the site: Dublin, NYC, Bergen, Singapore, or Manila."
                .to_string()
        }
        FileError::NoTerminal(_) | FileError::NoSessionId(_) | FileError::UnknownKind(_) => {
            r#"
Experiment files are named T<terminal>_S<session>_<kind>.txt, where the
session number has at least four digits and the kind is one of 1nfo, TEST,
answers, debug, RESET, or a song code such as R014.
            "#
            .trim_ascii()
            .to_string()
        }
        FileError::Unreadable { .. } => String::new(),
        FileError::VersionResolution { .. } => {
            "Files last modified before June 2010 predate every known format.".to_string()
        }
        FileError::NoResetMarker(_) => {
            "A reset file must either be empty or name the slide the session was reset at.".to_string()
        }
    };

    (error.message(), details)
}
