//! The splitting core
//!
//! Word counting, paragraph packing, progress reporting, and output
//! filename resolution. Everything here is pure with respect to the
//! filesystem; reading sources and writing parts lives in
//! [`crate::document`].

pub mod counter;
pub mod naming;
pub mod packer;
pub mod progress;

pub use counter::{count_words, format_word_count};
pub use packer::{split_document, Part, SplitOutcome};
pub use progress::{NoProgress, ProgressSink, ProgressStage};
