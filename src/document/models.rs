//! Core data structures for document splitting
//!
//! This module defines the public types flowing through the split pipeline:
//! paragraphs and their formatted runs on the way in, per-file processing
//! results on the way out.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Character formatting carried by a single run.
///
/// Only the flags that survive a split are tracked; everything else in the
/// source run properties is dropped on purpose.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextFormatting {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TextFormatting {
    /// True when no formatting flag is set.
    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.underline)
    }
}

/// A contiguous span of identically formatted paragraph text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedRun {
    pub text: String,
    pub formatting: TextFormatting,
}

impl FormattedRun {
    /// Consolidate adjacent runs with identical formatting into single runs
    pub fn consolidate_runs(runs: Vec<FormattedRun>) -> Vec<FormattedRun> {
        if runs.is_empty() {
            return runs;
        }

        let mut consolidated = Vec::new();
        let mut current_run = runs[0].clone();

        for run in runs.into_iter().skip(1) {
            if current_run.formatting == run.formatting {
                // Same formatting - merge the text
                current_run.text.push_str(&run.text);
            } else {
                // Different formatting - push current and start new
                consolidated.push(current_run);
                current_run = run;
            }
        }

        // last run
        consolidated.push(current_run);
        consolidated
    }
}

/// The atomic unit of input content. A paragraph is never divided across
/// output parts, whatever its own word count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    /// Full paragraph text, runs concatenated in order.
    pub text: String,
    /// Run structure, present only for `.docx` sources. Empty for plain text.
    pub runs: Vec<FormattedRun>,
}

impl Paragraph {
    /// Plain paragraph with no run structure (text sources).
    pub fn from_text(text: impl Into<String>) -> Self {
        Paragraph {
            text: text.into(),
            runs: Vec::new(),
        }
    }

    /// Paragraph assembled from formatted runs. The paragraph text is the
    /// concatenation of the run texts in order.
    pub fn from_runs(runs: Vec<FormattedRun>) -> Self {
        let text: String = runs.iter().map(|run| run.text.as_str()).collect();
        Paragraph { text, runs }
    }
}

/// Supported source formats, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Docx,
    Text,
}

impl SourceFormat {
    /// Detect the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<SourceFormat> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "docx" => Some(SourceFormat::Docx),
            "txt" => Some(SourceFormat::Text),
            _ => None,
        }
    }
}

/// Summary of one document's processing, produced for every input file
/// whether it was split, skipped, or failed.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingResult {
    /// The input file this result describes.
    pub source: PathBuf,
    pub success: bool,
    /// Human-readable outcome, e.g. `Split into 3 parts (12,345 words)`.
    pub message: String,
    /// Word count of the whole source document.
    pub total_words: usize,
    /// Number of part files written. Zero for skipped or failed documents.
    pub parts_created: usize,
    /// Paths of the written parts, in part order.
    pub output_files: Vec<PathBuf>,
}

impl ProcessingResult {
    pub(crate) fn failure(source: &Path, message: String) -> Self {
        ProcessingResult {
            source: source.to_path_buf(),
            success: false,
            message,
            total_words: 0,
            parts_created: 0,
            output_files: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, bold: bool) -> FormattedRun {
        FormattedRun {
            text: text.to_string(),
            formatting: TextFormatting {
                bold,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_consolidate_merges_adjacent_identical_formatting() {
        let runs = vec![run("Hello ", false), run("wor", false), run("ld", true)];
        let consolidated = FormattedRun::consolidate_runs(runs);
        assert_eq!(consolidated.len(), 2);
        assert_eq!(consolidated[0].text, "Hello wor");
        assert!(!consolidated[0].formatting.bold);
        assert_eq!(consolidated[1].text, "ld");
        assert!(consolidated[1].formatting.bold);
    }

    #[test]
    fn test_consolidate_keeps_empty_input_empty() {
        assert!(FormattedRun::consolidate_runs(Vec::new()).is_empty());
    }

    #[test]
    fn test_paragraph_text_is_run_concatenation() {
        let paragraph = Paragraph::from_runs(vec![run("one ", true), run("two", false)]);
        assert_eq!(paragraph.text, "one two");
        assert_eq!(paragraph.runs.len(), 2);
    }

    #[test]
    fn test_format_detection_is_case_insensitive() {
        assert_eq!(
            SourceFormat::from_path(Path::new("Report.DOCX")),
            Some(SourceFormat::Docx)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("notes.txt")),
            Some(SourceFormat::Text)
        );
        assert_eq!(SourceFormat::from_path(Path::new("slides.pdf")), None);
        assert_eq!(SourceFormat::from_path(Path::new("README")), None);
    }
}
