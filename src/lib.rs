//! Parsing and normalization of Emotion in Motion experiment logs.
//!
//! Each raw text file produced at a terminal (questionnaire answers, session
//! info, sensor traces, debug timings, reset markers) is turned into one
//! [`language::Document`] keyed by its session number.

#[macro_use]
mod regex;

pub mod batch;
pub mod language;
pub mod output;
pub mod parsing;
