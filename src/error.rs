//! Error types for document splitting

use thiserror::Error;

/// Errors raised while preparing or splitting a single document.
///
/// Every variant is scoped to one file. The batch driver converts them into
/// a failed [`ProcessingResult`](crate::document::ProcessingResult) and
/// moves on to the next file.
#[derive(Debug, Error)]
pub enum SplitError {
    /// Source file is missing, not a regular file, or unreadable.
    #[error("{0}")]
    Access(String),

    /// File extension is not one of the supported formats.
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// The file has a `.docx` extension but is not a usable Word container.
    #[error("{0}")]
    InvalidDocument(String),

    /// Split policy violates a precondition, such as a zero word limit.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
