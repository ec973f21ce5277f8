//! Accumulator for questionnaire answers files.

use std::collections::BTreeMap;

use crate::language::{Answers, Scale, SparseLog, Tag};
use crate::parsing::fields::{self, Most};

#[derive(Debug, Default)]
pub struct AnswersState {
    current: Answers,
    ratings: BTreeMap<Scale, SparseLog<u32>>,
    emotions: SparseLog<f64>,
}

impl AnswersState {
    pub fn new() -> AnswersState {
        AnswersState::default()
    }

    /// Apply one classified line. On failure nothing is changed and the tag
    /// of the offending family is returned.
    pub fn apply(&mut self, tag: Tag, line: &str) -> Result<(), Tag> {
        match tag {
            Tag::Sex => {
                if let Some(sex) = fields::sex(line)? {
                    self.current
                        .sex = Some(sex);
                }
            }
            Tag::Dob => {
                if let Some(year) = fields::dob(line)? {
                    self.current
                        .dob = if year == 0 { None } else { Some(year) };
                }
            }
            Tag::Nationality => {
                if let Some(nationality) = fields::nationality(line)? {
                    self.current
                        .nationality = Some(nationality);
                }
            }
            Tag::MusicalBackground => {
                if let Some(flag) = fields::yes_no(line, tag)? {
                    self.current
                        .musical_background = Some(flag);
                }
            }
            Tag::HearingImpairment => {
                if let Some(flag) = fields::yes_no(line, tag)? {
                    self.current
                        .hearing_impairments = Some(flag);
                }
            }
            Tag::VisualImpairment => {
                if let Some(flag) = fields::yes_no(line, tag)? {
                    self.current
                        .visual_impairments = Some(flag);
                }
            }
            Tag::MusicalExpertise => {
                if let Some(level) = fields::musical_expertise(line)? {
                    self.current
                        .musical_expertise = Some(level);
                }
            }
            Tag::SongScale => {
                if let Some(rating) = fields::song_scale(line)? {
                    let log = self
                        .ratings
                        .entry(rating.scale)
                        .or_default();
                    log.insert(rating.song, rating.value);

                    self.current
                        .song_ratings
                        .insert(
                            rating
                                .scale
                                .name()
                                .to_string(),
                            log.dense()
                                .to_vec(),
                        );
                }
            }
            Tag::MostEnjoyedEngaged => {
                if let Some((which, song)) = fields::most_enjoyed_engaged(line)? {
                    match which {
                        Most::Enjoyed => {
                            self.current
                                .most_enjoyed = Some(song)
                        }
                        Most::Engaged => {
                            self.current
                                .most_engaged = Some(song)
                        }
                    }
                }
            }
            Tag::EmotionIndex => {
                let (index, value) = fields::emotion_index(line)?;
                self.emotions
                    .insert(index, Some(value));
                self.current
                    .emotion_indices = self
                    .emotions
                    .dense()
                    .to_vec();
            }
            Tag::MusicStyle => {
                if let Some((style, true)) = fields::music_style(line)? {
                    let styles = &mut self
                        .current
                        .music_styles;
                    if !styles.contains(&style) {
                        styles.push(style);
                    }
                }
            }
            _ => return Err(tag),
        }
        Ok(())
    }

    /// The answers as they stand, including reassembled arrays.
    pub fn current(&self) -> &Answers {
        &self.current
    }

    pub fn into_answers(self) -> Answers {
        self.current
    }
}
