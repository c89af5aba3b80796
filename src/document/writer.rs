//! Part materialization
//!
//! Writes a finished part back to disk in the source's own format. The
//! `.docx` path rebuilds run-level bold/italic/underline when formatting
//! preservation is on; the text path joins paragraphs with blank lines.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use super::models::{FormattedRun, Paragraph, SourceFormat};
use crate::split::packer::Part;

/// Write `part` to `path` in `format`.
pub fn write_part(
    part: &Part,
    format: SourceFormat,
    path: &Path,
    preserve_formatting: bool,
) -> Result<()> {
    match format {
        SourceFormat::Docx => write_docx_part(part, path, preserve_formatting),
        SourceFormat::Text => write_text_part(part, path),
    }
}

fn write_docx_part(part: &Part, path: &Path, preserve_formatting: bool) -> Result<()> {
    let mut docx = docx_rs::Docx::new();
    for paragraph in &part.paragraphs {
        docx = docx.add_paragraph(build_docx_paragraph(paragraph, preserve_formatting));
    }

    let file =
        File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    docx.build()
        .pack(file)
        .with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}

/// Rebuild one paragraph in the output document.
///
/// With preservation on, each source run becomes one output run with the
/// same text and flags, in order. Paragraphs without run structure, and all
/// paragraphs when preservation is off, become a single plain run.
fn build_docx_paragraph(paragraph: &Paragraph, preserve_formatting: bool) -> docx_rs::Paragraph {
    if preserve_formatting && !paragraph.runs.is_empty() {
        let mut out = docx_rs::Paragraph::new();
        for run in &paragraph.runs {
            out = out.add_run(build_docx_run(run));
        }
        out
    } else {
        docx_rs::Paragraph::new()
            .add_run(docx_rs::Run::new().add_text(paragraph.text.as_str()))
    }
}

fn build_docx_run(run: &FormattedRun) -> docx_rs::Run {
    let mut out = docx_rs::Run::new().add_text(run.text.as_str());
    if run.formatting.bold {
        out = out.bold();
    }
    if run.formatting.italic {
        out = out.italic();
    }
    if run.formatting.underline {
        out = out.underline("single");
    }
    out
}

fn write_text_part(part: &Part, path: &Path) -> Result<()> {
    let blocks: Vec<&str> = part
        .paragraphs
        .iter()
        .map(|paragraph| paragraph.text.as_str())
        .collect();
    std::fs::write(path, blocks.join("\n\n"))
        .with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::models::TextFormatting;
    use tempfile::TempDir;

    fn part_of(paragraphs: Vec<Paragraph>) -> Part {
        let word_count = paragraphs
            .iter()
            .map(|p| crate::split::counter::count_words(&p.text))
            .sum();
        Part {
            number: 1,
            paragraphs,
            word_count,
        }
    }

    #[test]
    fn test_text_parts_join_paragraphs_with_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        let part = part_of(vec![
            Paragraph::from_text("first block"),
            Paragraph::from_text("second block"),
        ]);
        write_part(&part, SourceFormat::Text, &path, false).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "first block\n\nsecond block");
    }

    #[test]
    fn test_docx_parts_survive_a_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.docx");

        let part = part_of(vec![Paragraph::from_runs(vec![
            FormattedRun {
                text: "plain then ".to_string(),
                formatting: TextFormatting::default(),
            },
            FormattedRun {
                text: "bold".to_string(),
                formatting: TextFormatting {
                    bold: true,
                    ..Default::default()
                },
            },
        ])]);
        write_part(&part, SourceFormat::Docx, &path, true).unwrap();

        let reloaded =
            crate::document::loader::load_paragraphs(&path, SourceFormat::Docx).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].text, "plain then bold");
        assert_eq!(reloaded[0].runs.len(), 2);
        assert!(!reloaded[0].runs[0].formatting.bold);
        assert!(reloaded[0].runs[1].formatting.bold);
    }
}
