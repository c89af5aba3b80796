//! Document reading and writing
//!
//! This module provides extraction of paragraph sequences from `.docx` and
//! plain-text sources, and materialization of finished parts back into the
//! source's format.

pub(crate) mod io;
pub mod loader;
pub mod models;
pub mod writer;

// Re-export the models and the two filesystem entry points
pub use loader::load_paragraphs;
pub use models::*;
pub use writer::write_part;
