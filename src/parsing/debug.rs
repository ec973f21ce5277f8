//! Timing blocks written by the playback software.
//!
//! A debug file is a sequence of four-line blocks:
//!
//! ```text
//! Song 1
//! Start 12:58:30
//! End 13:01:04
//! Length 154213.0
//! ```
//!
//! Blocks are recognized over the whole body rather than line by line.

use crate::language::DebugBlock;

#[derive(Debug, Default)]
pub struct DebugState {
    blocks: Vec<DebugBlock>,
}

impl DebugState {
    pub fn new() -> DebugState {
        DebugState::default()
    }

    pub fn scan(&mut self, body: &str) {
        let re = regex!(
            r"Song [0-9]+[ \t]*\r?\n[ \t]*Start ([0-9]+:[0-9]+:[0-9]+)[ \t]*\r?\n[ \t]*End ([0-9]+:[0-9]+:[0-9]+)[ \t]*\r?\n[ \t]*Length ([0-9]+(?:\.[0-9]+)?)"
        );

        for cap in re.captures_iter(body) {
            let Ok(length) = cap[3].parse::<f64>() else {
                continue;
            };
            self.blocks
                .push(DebugBlock {
                    start: cap[1].to_string(),
                    end: cap[2].to_string(),
                    length,
                });
        }
    }

    pub fn into_blocks(self) -> Vec<DebugBlock> {
        self.blocks
    }
}
