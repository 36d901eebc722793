//! Text extraction from uploaded document bytes
//!
//! Uploads are extracted in memory; nothing is staged on disk, so there is
//! no cleanup obligation on any exit path.

use crate::error::{MatcherError, Result};
use crate::input::file_detector::DocumentKind;
use std::io::Read;

/// Cap on the decompressed size of word/document.xml (zip-bomb protection).
const MAX_DOC_XML_BYTES: u64 = 50 * 1024 * 1024;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| MatcherError::PdfExtraction(format!("Failed to extract text: {}", e)))
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
            .map_err(|e| MatcherError::DocxExtraction(e.to_string()))?;

        let mut doc_xml = Vec::new();
        {
            let entry = archive
                .by_name("word/document.xml")
                .map_err(|_| MatcherError::DocxExtraction("word/document.xml not found".to_string()))?;
            entry
                .take(MAX_DOC_XML_BYTES)
                .read_to_end(&mut doc_xml)
                .map_err(|e| MatcherError::DocxExtraction(e.to_string()))?;
        }
        if doc_xml.len() as u64 >= MAX_DOC_XML_BYTES {
            return Err(MatcherError::DocxExtraction(
                "word/document.xml exceeds size limit".to_string(),
            ));
        }

        text_runs(&doc_xml)
    }
}

/// Collect the `<w:t>` text runs of a WordprocessingML body.
fn text_runs(xml: &[u8]) -> Result<String> {
    use quick_xml::events::Event;

    let mut reader = quick_xml::Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut out = String::new();
    let mut buf = Vec::new();
    let mut in_text_run = false;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"t" => in_text_run = false,
            Ok(Event::Text(t)) if in_text_run => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(t.unescape().unwrap_or_default().as_ref());
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(MatcherError::DocxExtraction(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| MatcherError::TextDecoding(format!("Not valid UTF-8: {}", e)))
    }
}

/// Route an upload to the extractor for its declared format.
pub fn extract_document(kind: DocumentKind, bytes: &[u8]) -> Result<String> {
    match kind {
        DocumentKind::Pdf => PdfExtractor.extract(bytes),
        DocumentKind::Docx => DocxExtractor.extract(bytes),
        DocumentKind::Text => PlainTextExtractor.extract(bytes),
        DocumentKind::Unsupported => Err(MatcherError::UnsupportedFormat(
            "no extractor for this file suffix".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("word/document.xml", options).unwrap();
            let body: String = paragraphs
                .iter()
                .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
                .collect();
            write!(
                writer,
                "<?xml version=\"1.0\"?><w:document \
                 xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
                 <w:body>{}</w:body></w:document>",
                body
            )
            .unwrap();
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn plain_text_decodes_utf8() {
        let text = PlainTextExtractor.extract("Rust engineer".as_bytes()).unwrap();
        assert_eq!(text, "Rust engineer");
    }

    #[test]
    fn plain_text_rejects_invalid_utf8() {
        let err = PlainTextExtractor.extract(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, MatcherError::TextDecoding(_)));
    }

    #[test]
    fn docx_text_runs_are_collected_in_order() {
        let bytes = docx_bytes(&["Senior Rust developer", "Five years experience"]);
        let text = DocxExtractor.extract(&bytes).unwrap();
        assert_eq!(text, "Senior Rust developer Five years experience");
    }

    #[test]
    fn invalid_zip_is_a_docx_error() {
        let err = DocxExtractor.extract(b"not a zip archive").unwrap_err();
        assert!(matches!(err, MatcherError::DocxExtraction(_)));
    }

    #[test]
    fn zip_without_document_xml_is_a_docx_error() {
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("other.xml", options).unwrap();
            write!(writer, "<x/>").unwrap();
            writer.finish().unwrap();
        }
        let err = DocxExtractor.extract(&cursor.into_inner()).unwrap_err();
        assert!(matches!(err, MatcherError::DocxExtraction(_)));
    }

    #[test]
    fn invalid_pdf_is_a_pdf_error() {
        let err = PdfExtractor.extract(b"not a pdf").unwrap_err();
        assert!(matches!(err, MatcherError::PdfExtraction(_)));
    }

    #[test]
    fn unsupported_kind_is_rejected() {
        let err = extract_document(DocumentKind::Unsupported, b"bytes").unwrap_err();
        assert!(matches!(err, MatcherError::UnsupportedFormat(_)));
    }
}
