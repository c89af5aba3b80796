//! Output filename resolution
//!
//! Parts are named `{base} - Part {N}{ext}` next to each other in the
//! output folder. A source that is itself a previously written part
//! re-derives its base name first, so re-splitting never stacks markers.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Longest filename (without directory) this module will produce.
const MAX_FILENAME_LEN: usize = 200;

/// Room reserved for ` - Part N` and the extension when truncating.
const PART_SUFFIX_ROOM: usize = 15;

static PART_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"- Part \d+\.\w+$").unwrap());

static PART_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r" ?- Part \d+(\.\w+)$").unwrap());

/// Characters that are invalid in filenames on at least one platform.
static INVALID_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\\/*?:"<>|]"#).unwrap());

/// True when `filename` already carries a `- Part N` marker before its
/// extension.
pub fn is_part_file(filename: &str) -> bool {
    PART_MARKER.is_match(filename)
}

/// Strip characters that would make the name invalid somewhere, then
/// trailing whitespace and periods. An empty result becomes `untitled`.
pub fn sanitize_filename(filename: &str) -> String {
    let sanitized = INVALID_CHARS.replace_all(filename, "");
    let sanitized = sanitized.trim().trim_end_matches('.');
    if sanitized.is_empty() {
        "untitled".to_string()
    } else {
        sanitized.to_string()
    }
}

/// Build the output path for part `part_num` of `original` inside
/// `output_folder`.
pub fn output_filename(original: &Path, part_num: usize, output_folder: &Path) -> PathBuf {
    let original_name = original
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("untitled");

    // Re-splitting one of our own parts must not nest markers:
    // `Report - Part 2.docx` re-derives the base `Report`.
    let original_name = if is_part_file(original_name) {
        PART_SUFFIX.replace(original_name, "${1}")
    } else {
        original_name.into()
    };

    let (base, extension) = split_extension(&original_name);
    let base = truncate_base(base);

    let filename = sanitize_filename(&format!("{base} - Part {part_num}{extension}"));
    output_folder.join(filename)
}

/// Split `name` into (stem, extension-with-dot). A leading dot is part of
/// the stem, so `.gitignore` has no extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

fn truncate_base(base: &str) -> String {
    let limit = MAX_FILENAME_LEN - PART_SUFFIX_ROOM;
    if base.graphemes(true).count() <= limit {
        return base.to_string();
    }
    let mut truncated: String = base.graphemes(true).take(limit - 3).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_are_numbered_next_to_the_base_name() {
        let path = output_filename(Path::new("Report.docx"), 3, Path::new("out"));
        assert_eq!(path, Path::new("out").join("Report - Part 3.docx"));
    }

    #[test]
    fn test_text_sources_keep_their_extension() {
        let path = output_filename(Path::new("notes.txt"), 1, Path::new("parts"));
        assert_eq!(path, Path::new("parts").join("notes - Part 1.txt"));
    }

    #[test]
    fn test_resplitting_a_part_does_not_nest_markers() {
        let path = output_filename(Path::new("Report - Part 2.docx"), 1, Path::new("out"));
        assert_eq!(path, Path::new("out").join("Report - Part 1.docx"));
    }

    #[test]
    fn test_source_directory_does_not_leak_into_output() {
        let path = output_filename(Path::new("/data/in/Report.docx"), 1, Path::new("/data/out"));
        assert_eq!(path, Path::new("/data/out").join("Report - Part 1.docx"));
    }

    #[test]
    fn test_extensionless_sources_get_a_bare_marker() {
        let path = output_filename(Path::new("README"), 2, Path::new("out"));
        assert_eq!(path, Path::new("out").join("README - Part 2"));
    }

    #[test]
    fn test_part_marker_detection() {
        assert!(is_part_file("Report - Part 2.docx"));
        assert!(is_part_file("thesis - Part 10.txt"));
        assert!(!is_part_file("Report.docx"));
        assert!(!is_part_file("Part 2 of the saga.docx"));
        assert!(!is_part_file("Report - Part 2"));
    }

    #[test]
    fn test_invalid_characters_are_removed() {
        assert_eq!(sanitize_filename("bad:name?.txt"), "badname.txt");
        assert_eq!(sanitize_filename("a/b\\c|d"), "abcd");
    }

    #[test]
    fn test_trailing_periods_and_whitespace_are_trimmed() {
        assert_eq!(sanitize_filename("  name... "), "name");
    }

    #[test]
    fn test_fully_invalid_names_fall_back_to_untitled() {
        assert_eq!(sanitize_filename("???"), "untitled");
        assert_eq!(sanitize_filename("   "), "untitled");
    }

    #[test]
    fn test_long_base_names_are_truncated() {
        let long_name = format!("{}.txt", "x".repeat(400));
        let path = output_filename(Path::new(&long_name), 1, Path::new("out"));
        let filename = path.file_name().unwrap().to_str().unwrap();
        assert!(filename.len() <= MAX_FILENAME_LEN);
        assert!(filename.contains("..."));
        assert!(filename.ends_with(" - Part 1.txt"));
    }

    #[test]
    fn test_multi_dot_names_split_on_the_last_dot() {
        let path = output_filename(Path::new("archive.tar.gz"), 1, Path::new("out"));
        assert_eq!(path, Path::new("out").join("archive.tar - Part 1.gz"));
    }
}
