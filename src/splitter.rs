//! Per-document splitting pipeline
//!
//! [`DocumentSplitter`] drives one document end to end: access checks,
//! paragraph extraction, packing, and part writing. Failures never escape a
//! document boundary; they are captured in that file's
//! [`ProcessingResult`] so the rest of a batch keeps going.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::config::SplitPolicy;
use crate::document::io::check_file_access;
use crate::document::{load_paragraphs, write_part, ProcessingResult, SourceFormat};
use crate::error::SplitError;
use crate::split::counter::format_word_count;
use crate::split::naming::output_filename;
use crate::split::packer::{split_document, SplitOutcome};
use crate::split::progress::{NoProgress, ProgressSink, ProgressStage};

/// Splits documents under one policy snapshot.
pub struct DocumentSplitter {
    policy: SplitPolicy,
    output_folder: PathBuf,
}

impl DocumentSplitter {
    pub fn new(policy: SplitPolicy, output_folder: impl Into<PathBuf>) -> Self {
        DocumentSplitter {
            policy,
            output_folder: output_folder.into(),
        }
    }

    /// Process one file without progress reporting.
    pub fn process_file(&self, path: &Path) -> ProcessingResult {
        self.process_file_with_progress(path, &mut NoProgress)
    }

    /// Process one file, reporting progress through `progress`.
    ///
    /// Never panics or returns an error: every failure lands in the
    /// result's `success` flag and message.
    pub fn process_file_with_progress(
        &self,
        path: &Path,
        progress: &mut dyn ProgressSink,
    ) -> ProcessingResult {
        if let Err(err) = check_file_access(path) {
            error!("cannot access {}: {err}", path.display());
            return ProcessingResult::failure(path, format!("Error accessing file: {err}"));
        }

        let Some(format) = SourceFormat::from_path(path) else {
            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| format!(".{}", ext.to_lowercase()))
                .unwrap_or_default();
            let err = SplitError::UnsupportedFormat(extension);
            warn!("{err}: {}", path.display());
            return ProcessingResult::failure(path, err.to_string());
        };

        match self.split_file(path, format, progress) {
            Ok(result) => result,
            Err(err) => {
                error!("failed to process {}: {err:#}", path.display());
                progress.report(ProgressStage::Failed, 100, &format!("Error: {err:#}"));
                ProcessingResult::failure(path, format!("Error: {err:#}"))
            }
        }
    }

    fn split_file(
        &self,
        path: &Path,
        format: SourceFormat,
        progress: &mut dyn ProgressSink,
    ) -> Result<ProcessingResult> {
        let file_name = display_name(path);
        progress.report(ProgressStage::Loading, 0, &format!("Loading {file_name}..."));

        let paragraphs = load_paragraphs(path, format)?;

        match split_document(paragraphs, &self.policy, progress) {
            SplitOutcome::Skipped { total_words } => {
                let message = format!(
                    "Skipped: {file_name} (only {} words)",
                    format_word_count(total_words)
                );
                info!("{message}");
                progress.report(ProgressStage::Skipped, 100, &message);
                Ok(ProcessingResult {
                    source: path.to_path_buf(),
                    success: true,
                    message,
                    total_words,
                    parts_created: 0,
                    output_files: Vec::new(),
                })
            }
            SplitOutcome::Split { parts, total_words } => {
                std::fs::create_dir_all(&self.output_folder).with_context(|| {
                    format!("cannot create output folder {}", self.output_folder.display())
                })?;

                let mut output_files = Vec::with_capacity(parts.len());
                for part in &parts {
                    progress.report(
                        ProgressStage::Saving,
                        100,
                        &format!("Saving part {}...", part.number),
                    );
                    let output_path = output_filename(path, part.number, &self.output_folder);
                    write_part(part, format, &output_path, self.policy.preserve_formatting)?;
                    output_files.push(output_path);
                }

                let message = format!(
                    "Split into {} parts ({} words)",
                    parts.len(),
                    format_word_count(total_words)
                );
                info!("{file_name}: {message}");
                progress.report(ProgressStage::Complete, 100, &message);
                Ok(ProcessingResult {
                    source: path.to_path_buf(),
                    success: true,
                    message,
                    total_words,
                    parts_created: parts.len(),
                    output_files,
                })
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
