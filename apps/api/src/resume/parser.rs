//! Uploaded resume → plain text. Format is chosen by file extension.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::errors::AppError;

const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
    Text,
}

impl ResumeFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(ResumeFormat::Pdf),
            "docx" => Some(ResumeFormat::Docx),
            "txt" => Some(ResumeFormat::Text),
            _ => None,
        }
    }
}

/// Extracts text from an uploaded file. Blocking and CPU-bound for PDFs and
/// DOCX; call it from `spawn_blocking`.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    match ResumeFormat::from_filename(filename) {
        Some(ResumeFormat::Pdf) => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::ResumeParse(format!("Error parsing PDF: {e}"))),
        Some(ResumeFormat::Text) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        Some(ResumeFormat::Docx) => extract_docx(bytes)
            .map_err(|e| AppError::ResumeParse(format!("Error parsing DOCX: {e}"))),
        None => Err(AppError::UnsupportedMedia(
            "Unsupported file format. Please upload a PDF, DOCX or TXT file.".to_string(),
        )),
    }
}

#[derive(Debug, thiserror::Error)]
enum DocxError {
    #[error("not a DOCX archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("unreadable document body: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Text runs of `word/document.xml`, one line per paragraph.
fn extract_docx(bytes: &[u8]) -> Result<String, DocxError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY)?.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_run_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_run_text => text.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text.trim_end().to_string())
}

/// First 500 characters, with "..." appended when the text was cut.
pub fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 500;
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_filename() {
        assert_eq!(ResumeFormat::from_filename("cv.PDF"), Some(ResumeFormat::Pdf));
        assert_eq!(ResumeFormat::from_filename("my resume.docx"), Some(ResumeFormat::Docx));
        assert_eq!(ResumeFormat::from_filename("notes.txt"), Some(ResumeFormat::Text));
        assert_eq!(ResumeFormat::from_filename("photo.png"), None);
        assert_eq!(ResumeFormat::from_filename("README"), None);
    }

    #[test]
    fn test_extract_plain_text() {
        let text = extract_text("cv.txt", b"Skills: Rust, Python").unwrap();
        assert_eq!(text, "Skills: Rust, Python");
    }

    #[test]
    fn test_extract_rejects_empty() {
        assert!(matches!(extract_text("cv.txt", b""), Err(AppError::Validation(_))));
    }

    fn zipped(entry: &str, content: &str) -> Vec<u8> {
        use std::io::Write;
        use zip::write::{FileOptions, ZipWriter};

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file(entry, FileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_docx_paragraphs() {
        let docx = zipped(
            DOCX_BODY,
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
                r#"<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>"#,
                r#"<w:p><w:r><w:t xml:space="preserve">Skills: </w:t></w:r><w:r><w:t>Rust, C++ &amp; SQL</w:t></w:r></w:p>"#,
                r#"<w:p><w:r><w:t>Go</w:t><w:tab/><w:t>Docker</w:t></w:r></w:p>"#,
                r#"</w:body></w:document>"#,
            ),
        );
        let text = extract_text("resume.DOCX", &docx).unwrap();
        assert_eq!(text, "Jane Doe\nSkills: Rust, C++ & SQL\nGo\tDocker");
    }

    #[test]
    fn test_extract_docx_without_body_is_parse_error() {
        let docx = zipped("word/styles.xml", "<w:styles/>");
        assert!(matches!(extract_text("cv.docx", &docx), Err(AppError::ResumeParse(_))));
        assert!(matches!(extract_text("cv.docx", b"PK.."), Err(AppError::ResumeParse(_))));
    }

    #[test]
    fn test_extract_rejects_unknown_extension() {
        assert!(matches!(extract_text("cv.odt", b"x"), Err(AppError::UnsupportedMedia(_))));
    }

    #[test]
    fn test_extract_bad_pdf_is_parse_error() {
        assert!(matches!(
            extract_text("cv.pdf", b"definitely not a pdf"),
            Err(AppError::ResumeParse(_))
        ));
    }

    #[test]
    fn test_preview_short_text_untouched() {
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_preview_cuts_on_char_boundary() {
        let text = "é".repeat(600);
        let p = preview(&text);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), 503);
    }
}
