//! Paragraph extraction
//!
//! Turns a source file into the ordered paragraph sequence the packer
//! consumes. Empty paragraphs are dropped here, so the splitting core never
//! sees them and part boundaries depend only on visible content.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::io::validate_docx_file;
use super::models::{FormattedRun, Paragraph, SourceFormat, TextFormatting};

/// Extract the ordered, non-empty paragraphs of `path`.
pub fn load_paragraphs(path: &Path, format: SourceFormat) -> Result<Vec<Paragraph>> {
    let paragraphs = match format {
        SourceFormat::Docx => load_docx_paragraphs(path)?,
        SourceFormat::Text => load_text_paragraphs(path)?,
    };
    debug!(
        paragraphs = paragraphs.len(),
        "extracted content from {}",
        path.display()
    );
    Ok(paragraphs)
}

fn load_docx_paragraphs(path: &Path) -> Result<Vec<Paragraph>> {
    validate_docx_file(path)?;

    let file_data = std::fs::read(path)?;
    let docx = docx_rs::read_docx(&file_data)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let mut paragraphs = Vec::new();

    // Body paragraphs first, then table-cell paragraphs in row/cell order.
    for child in &docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(para) = child {
            if let Some(paragraph) = convert_paragraph(para) {
                paragraphs.push(paragraph);
            }
        }
    }

    for child in &docx.document.children {
        if let docx_rs::DocumentChild::Table(table) = child {
            collect_table_paragraphs(table, &mut paragraphs);
        }
    }

    Ok(paragraphs)
}

/// Convert a docx-rs paragraph into our model, or `None` when it carries no
/// visible text.
fn convert_paragraph(para: &docx_rs::Paragraph) -> Option<Paragraph> {
    let mut runs = Vec::new();

    for child in &para.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            let formatting = extract_run_formatting(run);
            let text = extract_run_text(run);
            if !text.is_empty() {
                runs.push(FormattedRun { text, formatting });
            }
        }
    }

    let paragraph = Paragraph::from_runs(FormattedRun::consolidate_runs(runs));
    if paragraph.text.trim().is_empty() {
        None
    } else {
        Some(paragraph)
    }
}

/// Extract text from a run using docx-rs features
fn extract_run_text(run: &docx_rs::Run) -> String {
    let mut text = String::new();

    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(text_elem) => {
                text.push_str(&text_elem.text);
            }
            docx_rs::RunChild::Tab(_) => {
                text.push('\t');
            }
            docx_rs::RunChild::Break(_) => {
                text.push('\n');
            }
            _ => {
                // Other run children carry no splittable text
            }
        }
    }

    text
}

/// Extract the formatting flags we preserve from a run
fn extract_run_formatting(run: &docx_rs::Run) -> TextFormatting {
    let props = &run.run_property;
    TextFormatting {
        bold: props.bold.is_some(),
        italic: props.italic.is_some(),
        underline: props.underline.is_some(),
    }
}

fn collect_table_paragraphs(table: &docx_rs::Table, out: &mut Vec<Paragraph>) {
    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;

        for row_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = row_child;

            for content in &cell.children {
                if let docx_rs::TableCellContent::Paragraph(para) = content {
                    if let Some(paragraph) = convert_paragraph(para) {
                        out.push(paragraph);
                    }
                }
            }
        }
    }
}

fn load_text_paragraphs(path: &Path) -> Result<Vec<Paragraph>> {
    let bytes = std::fs::read(path)?;
    // Undecodable bytes are replaced, not fatal; line endings are normalized.
    let content = String::from_utf8_lossy(&bytes).replace("\r\n", "\n");
    Ok(split_text_paragraphs(&content))
}

/// Split plain text on blank lines. A file without any blank-line
/// separators falls back to one paragraph per line.
pub(crate) fn split_text_paragraphs(content: &str) -> Vec<Paragraph> {
    let blocks: Vec<&str> = content.split("\n\n").collect();
    let blocks: Vec<&str> = if blocks.len() == 1 {
        content.split('\n').collect()
    } else {
        blocks
    };

    blocks
        .into_iter()
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(Paragraph::from_text)
        .collect()
}
