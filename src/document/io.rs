//! File access checks and container validation
//!
//! Both checks run before any extraction work, so the common failure modes
//! (missing file, wrong format, renamed spreadsheet) surface as one clear
//! message instead of a parser error deep in the pipeline.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use zip::ZipArchive;

use crate::error::SplitError;

/// Check that `path` is a readable regular file.
///
/// The message strings are stable; they appear verbatim in per-document
/// results as `Error accessing file: {message}`.
pub(crate) fn check_file_access(path: &Path) -> Result<(), SplitError> {
    if !path.exists() {
        return Err(SplitError::Access("File not found".to_string()));
    }

    if !path.is_file() {
        return Err(SplitError::Access("Not a file".to_string()));
    }

    match File::open(path) {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == ErrorKind::PermissionDenied => {
            Err(SplitError::Access("Permission denied".to_string()))
        }
        Err(_) => Err(SplitError::Access(
            "I/O error (file may be locked)".to_string(),
        )),
    }
}

/// Validates that a `.docx` file is a ZIP container holding a Word document.
pub(crate) fn validate_docx_file(file_path: &Path) -> Result<(), SplitError> {
    // Check ZIP structure contains word/document.xml
    let file = File::open(file_path)?;
    let mut archive = ZipArchive::new(file).map_err(|err| {
        SplitError::InvalidDocument(format!("not a valid .docx container: {err}"))
    })?;

    if archive.by_name("word/document.xml").is_err() {
        // Check if it might be an Excel file
        if archive.by_name("xl/workbook.xml").is_ok() {
            return Err(SplitError::InvalidDocument(
                "this appears to be an Excel file (.xlsx); only Word documents (.docx) can be split"
                    .to_string(),
            ));
        }

        return Err(SplitError::InvalidDocument(
            "missing word/document.xml; the file may be corrupted or is not a Word document"
                .to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_reported_as_not_found() {
        let err = check_file_access(Path::new("/no/such/file.docx")).unwrap_err();
        assert_eq!(err.to_string(), "File not found");
    }

    #[test]
    fn test_directories_are_not_files() {
        let dir = TempDir::new().unwrap();
        let err = check_file_access(dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "Not a file");
    }

    #[test]
    fn test_readable_file_passes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ok.txt");
        std::fs::write(&path, "hello").unwrap();
        assert!(check_file_access(&path).is_ok());
    }

    #[test]
    fn test_renamed_text_file_is_not_a_docx() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake.docx");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"this is not a zip archive").unwrap();
        drop(file);

        let err = validate_docx_file(&path).unwrap_err();
        assert!(matches!(err, SplitError::InvalidDocument(_)));
        assert!(err.to_string().contains("not a valid .docx container"));
    }

    #[test]
    fn test_xlsx_container_is_reported_as_excel() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sheet.docx");
        let mut archive = zip::ZipWriter::new(File::create(&path).unwrap());
        archive
            .start_file("xl/workbook.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        archive.write_all(b"<workbook/>").unwrap();
        archive.finish().unwrap();

        let err = validate_docx_file(&path).unwrap_err();
        assert!(matches!(err, SplitError::InvalidDocument(_)));
        assert!(err.to_string().contains("appears to be an Excel file"));
        assert!(err.to_string().contains("only Word documents"));
    }

    #[test]
    fn test_zip_without_document_xml_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("odd.docx");
        let mut archive = zip::ZipWriter::new(File::create(&path).unwrap());
        archive
            .start_file("mimetype", zip::write::SimpleFileOptions::default())
            .unwrap();
        archive.write_all(b"application/epub+zip").unwrap();
        archive.finish().unwrap();

        let err = validate_docx_file(&path).unwrap_err();
        assert!(err.to_string().contains("missing word/document.xml"));
    }
}
