//! Cached regular expressions shared by the extractors

#[macro_use]
mod cache;
