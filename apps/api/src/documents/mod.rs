//! Plain-text extraction from uploaded résumé files.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use zip::ZipArchive;

/// Main body part of a WordprocessingML package.
const DOCX_BODY_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported file format: '{0}'")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Resolves the kind from the file extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self, DocumentError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            "txt" => Ok(DocumentKind::PlainText),
            _ => Err(DocumentError::UnsupportedFormat(ext)),
        }
    }
}

/// Extracts trimmed plain text from a PDF, DOCX or `.txt` upload.
/// Blocking; call from `spawn_blocking` inside async handlers.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, DocumentError> {
    let text = match DocumentKind::from_file_name(file_name)? {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| DocumentError::Pdf(e.to_string()))?,
        DocumentKind::Docx => extract_docx_text(bytes)?,
        DocumentKind::PlainText => String::from_utf8_lossy(bytes).into_owned(),
    };
    Ok(text.trim().to_string())
}

/// Paragraph text of `word/document.xml`, one paragraph per line.
fn extract_docx_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(docx_err)?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(docx_err)?
        .read_to_string(&mut xml)
        .map_err(docx_err)?;

    let mut reader = Reader::from_str(&xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event().map_err(docx_err)? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                b"w:p" => paragraphs.push(String::new()),
                _ => {}
            },
            Event::Text(t) if in_text_run => {
                current.push_str(&t.unescape().map_err(docx_err)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}

fn docx_err(e: impl std::fmt::Display) -> DocumentError {
    DocumentError::Docx(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(
            DocumentKind::from_file_name("cv.PDF").unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::from_file_name("notes.txt").unwrap(),
            DocumentKind::PlainText
        );
    }

    fn docx_with_body(body: &str) -> Vec<u8> {
        use std::io::Write;

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file(DOCX_BODY_PART, options).unwrap();
        write!(
            writer,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
        .unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_docx_kind() {
        assert_eq!(
            DocumentKind::from_file_name("Resume.DOCX").unwrap(),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_other_formats_are_unsupported() {
        match DocumentKind::from_file_name("resume.rtf") {
            Err(DocumentError::UnsupportedFormat(ext)) => assert_eq!(ext, "rtf"),
            other => panic!("Expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_docx_paragraphs_joined_by_newline() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>\
             <w:p><w:r><w:t xml:space=\"preserve\">Python </w:t></w:r><w:r><w:t>&amp; SQL</w:t></w:r></w:p>\
             <w:p/>\
             <w:p><w:r><w:t>Docker</w:t><w:tab/><w:t>Kubernetes</w:t></w:r></w:p>",
        );
        let text = extract_text("jane.docx", &bytes).unwrap();
        assert_eq!(text, "Jane Doe\nPython & SQL\n\nDocker\tKubernetes");
    }

    #[test]
    fn test_docx_output_is_trimmed() {
        let bytes = docx_with_body("<w:p/><w:p><w:r><w:t>  Rust  </w:t></w:r></w:p><w:p/>");
        assert_eq!(extract_text("cv.docx", &bytes).unwrap(), "Rust");
    }

    #[test]
    fn test_corrupt_docx_is_an_error() {
        assert!(matches!(
            extract_text("cv.docx", b"PK\x03\x04 not a zip"),
            Err(DocumentError::Docx(_))
        ));
    }

    #[test]
    fn test_zip_without_document_part_is_an_error() {
        let options = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("notes.txt", options).unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(matches!(
            extract_text("cv.docx", &bytes),
            Err(DocumentError::Docx(_))
        ));
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        assert!(matches!(
            DocumentKind::from_file_name("resume"),
            Err(DocumentError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_plain_text_is_trimmed() {
        let text = extract_text("jane.txt", b"\n  Python, SQL  \n").unwrap();
        assert_eq!(text, "Python, SQL");
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let text = extract_text("jane.txt", &[b'R', b'u', 0xFF, b's', b't']).unwrap();
        assert!(text.starts_with("Ru"));
        assert!(text.ends_with("st"));
    }
}
