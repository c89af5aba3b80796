//! Progress reporting
//!
//! The pipeline reports stage and percentage through an injected sink so the
//! host (CLI, tests, an eventual GUI) decides presentation. Within one
//! document, percentages are 0-100 and never decrease.

use std::fmt;

/// Lifecycle stage reported alongside a progress percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStage {
    Loading,
    Processing,
    Saving,
    Skipped,
    Complete,
    Failed,
}

impl fmt::Display for ProgressStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProgressStage::Loading => "loading",
            ProgressStage::Processing => "processing",
            ProgressStage::Saving => "saving",
            ProgressStage::Skipped => "skipped",
            ProgressStage::Complete => "complete",
            ProgressStage::Failed => "error",
        };
        f.write_str(label)
    }
}

/// Receiver for per-document progress updates.
pub trait ProgressSink {
    fn report(&mut self, stage: ProgressStage, percent: u8, message: &str);
}

/// Any `FnMut(stage, percent, message)` closure is a sink.
impl<F> ProgressSink for F
where
    F: FnMut(ProgressStage, u8, &str),
{
    fn report(&mut self, stage: ProgressStage, percent: u8, message: &str) {
        self(stage, percent, message)
    }
}

/// Sink that discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _stage: ProgressStage, _percent: u8, _message: &str) {}
}
