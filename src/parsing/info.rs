//! Accumulator for session info files: the date, the songs played, and when
//! each part of the session began.

use chrono::{NaiveDate, NaiveDateTime};

use crate::language::{Info, SparseLog, Tag, Timestamps};
use crate::parsing::fields;

const TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Default)]
pub struct InfoState {
    date: Option<NaiveDate>,
    songs: Vec<String>,
    start: Option<NaiveDateTime>,
    test: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    indexed: SparseLog<NaiveDateTime>,
    discovered: Vec<NaiveDateTime>,
}

impl InfoState {
    pub fn new() -> InfoState {
        InfoState::default()
    }

    pub fn apply(&mut self, tag: Tag, line: &str) -> Result<(), Tag> {
        match tag {
            Tag::Date => {
                self.date = Some(fields::date(line)?);
            }
            Tag::SongList => {
                self.songs = fields::song_list(line)?;
            }
            Tag::StartTimestamp => {
                self.start = Some(self.moment(tag, line)?);
            }
            Tag::TestTimestamp => {
                self.test = Some(self.moment(tag, line)?);
            }
            Tag::EndTimestamp => {
                self.end = Some(self.moment(tag, line)?);
            }
            Tag::SongTimestamp => {
                if let Some(ordinal) = fields::song_ordinal(line) {
                    let moment = self.moment(tag, line)?;
                    self.indexed
                        .insert(ordinal, Some(moment));
                } else if let Some(code) = fields::song_code(line) {
                    // a code only counts once the SONGS line has named it
                    if !self
                        .songs
                        .iter()
                        .any(|song| song == code)
                    {
                        return Ok(());
                    }
                    let moment = self.moment(tag, line)?;
                    self.discovered
                        .push(moment);
                } else {
                    return Err(tag);
                }
            }
            _ => return Err(tag),
        }
        Ok(())
    }

    // Combine the wall clock time on the line with the session date.
    fn moment(&self, tag: Tag, line: &str) -> Result<NaiveDateTime, Tag> {
        let date = self
            .date
            .ok_or(tag)?;
        let time = fields::clock(line).ok_or(tag)?;
        Ok(date.and_time(time))
    }

    pub fn into_info(self) -> Info {
        let format = |moment: NaiveDateTime| {
            moment
                .format(TIMESTAMP)
                .to_string()
        };

        let mut discovered = self.discovered;
        discovered.sort();

        let mut media: Vec<Option<String>> = self
            .indexed
            .dense()
            .iter()
            .map(|slot| slot.map(format))
            .collect();
        media.extend(
            discovered
                .into_iter()
                .map(|moment| Some(format(moment))),
        );

        Info {
            date: self
                .date
                .map(|date| {
                    date.format("%Y-%m-%d")
                        .to_string()
                }),
            media: self.songs,
            timestamps: Timestamps {
                start: self
                    .start
                    .map(format),
                test: self
                    .test
                    .map(format),
                end: self
                    .end
                    .map(format),
                media,
            },
        }
    }
}
