//! manusplit: split large documents into word-bounded parts
//!
//! This library splits `.docx` and plain-text documents into a sequence of
//! smaller documents, each capped at a configurable word count. Splitting
//! happens only at paragraph boundaries, so no paragraph is ever divided
//! across two output parts.

pub mod config;
pub mod document;
pub mod error;
pub mod split;
pub mod splitter;

// Re-export commonly used types
pub use config::{Settings, SplitPolicy};
pub use document::{
    load_paragraphs, write_part, FormattedRun, Paragraph, ProcessingResult, SourceFormat,
    TextFormatting,
};
pub use error::SplitError;
pub use split::counter::{count_words, format_word_count};
pub use split::naming::{is_part_file, output_filename, sanitize_filename};
pub use split::packer::{split_document, Part, SplitOutcome};
pub use split::progress::{NoProgress, ProgressSink, ProgressStage};
pub use splitter::DocumentSplitter;
