//! Accumulator for sensor trace files, both the baseline test recording
//! and the per-song recordings.

use crate::language::{Layout, SignalTrace, Tag};
use crate::parsing::fields;

#[derive(Debug)]
pub struct SignalState {
    label: String,
    layout: Layout,
    trace: SignalTrace,
}

impl SignalState {
    pub fn new(label: &str, layout: Layout) -> SignalState {
        SignalState {
            label: label.to_string(),
            layout,
            trace: SignalTrace::default(),
        }
    }

    pub fn apply(&mut self, tag: Tag, line: &str) -> Result<(), Tag> {
        if tag != Tag::SignalSampleRow {
            return Err(tag);
        }

        let sample = fields::signal_row(line, self.layout)?;
        let trace = &mut self.trace;

        trace
            .timestamps
            .push(sample.millis);
        trace
            .eda_raw
            .push(sample.eda_raw);
        trace
            .pox_raw
            .push(sample.pox_raw);

        if let Some(extended) = sample.extended {
            trace
                .eda_filtered
                .push(extended.eda_filtered);
            trace
                .eda_status
                .push(extended.eda_status);
            trace
                .hr
                .push(extended.hr);
            trace
                .hr_status
                .push(extended.hr_status);
        }

        Ok(())
    }

    pub fn into_trace(self) -> (String, SignalTrace) {
        (self.label, self.trace)
    }
}
