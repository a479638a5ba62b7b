//! Text extraction from various file formats

use crate::error::{Result, ScreenerError};
use crate::input::document::{ExtractedText, RawDocument};
use crate::input::file_detector::FileType;
use log::{debug, warn};
use regex::Regex;
use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

static DOCX_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:p(?:\s[^>]*)?/>|<w:p(?:\s[^>]*)?>.*?</w:p>").expect("Invalid paragraph regex")
});

static DOCX_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab/>|<w:br(?:\s[^>]*)?/>|<w:cr/>")
        .expect("Invalid run regex")
});

pub trait TextExtractor {
    /// Turn raw bytes into text. Errors only when the whole document is
    /// structurally unreadable; damaged pages or paragraphs degrade to "".
    fn extract(&self, document: &RawDocument) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, document: &RawDocument) -> Result<String> {
        let bytes = document.bytes.as_slice();

        // pdf-extract panics on some malformed content streams
        let pages = match panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes)) {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => {
                debug!("{}: whole-document extraction failed ({}), retrying per page", document.file_name, e);
                self.extract_pages_individually(document)?
            }
            Err(_) => {
                debug!("{}: whole-document extraction aborted, retrying per page", document.file_name);
                self.extract_pages_individually(document)?
            }
        };

        let empty_pages = pages.iter().filter(|p| p.trim().is_empty()).count();
        if empty_pages > 0 {
            warn!(
                "{}: {} of {} pages had no extractable text",
                document.file_name,
                empty_pages,
                pages.len()
            );
        }

        Ok(pages.join("\n"))
    }
}

impl PdfExtractor {
    /// One page at a time, so a broken content stream only costs its own page.
    /// Fails only when the file does not parse as a PDF at all.
    pub fn extract_pages_individually(&self, document: &RawDocument) -> Result<Vec<String>> {
        let pdf = lopdf::Document::load_mem(&document.bytes).map_err(|e| ScreenerError::MalformedDocument {
            file: document.file_name.clone(),
            reason: format!("not a readable PDF: {}", e),
        })?;

        let pages = pdf
            .get_pages()
            .keys()
            .map(|&page| match panic::catch_unwind(AssertUnwindSafe(|| pdf.extract_text(&[page]))) {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => {
                    warn!("{}: page {} unreadable: {}", document.file_name, page, e);
                    String::new()
                }
                Err(_) => {
                    warn!("{}: page {} aborted the parser", document.file_name, page);
                    String::new()
                }
            })
            .collect();

        Ok(pages)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, document: &RawDocument) -> Result<String> {
        let malformed = |reason: String| ScreenerError::MalformedDocument {
            file: document.file_name.clone(),
            reason,
        };

        let mut archive = zip::ZipArchive::new(Cursor::new(document.bytes.as_slice()))
            .map_err(|e| malformed(format!("not a DOCX archive: {}", e)))?;

        let mut raw_xml = Vec::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| malformed(format!("missing word/document.xml: {}", e)))?
            .read_to_end(&mut raw_xml)?;
        let xml = String::from_utf8_lossy(&raw_xml);

        let paragraphs: Vec<String> = DOCX_PARAGRAPH
            .find_iter(&xml)
            .map(|m| self.paragraph_text(m.as_str()))
            .collect();

        debug!("{}: {} paragraphs", document.file_name, paragraphs.len());
        Ok(paragraphs.join("\n"))
    }
}

impl DocxExtractor {
    fn paragraph_text(&self, paragraph_xml: &str) -> String {
        let mut text = String::new();
        for cap in DOCX_RUN.captures_iter(paragraph_xml) {
            match cap.get(1) {
                Some(run) => text.push_str(&Self::unescape_xml(run.as_str())),
                None if cap[0].starts_with("<w:tab") => text.push('\t'),
                None => text.push('\n'),
            }
        }
        text
    }

    /// Named and numeric character references. A run with a broken reference is kept as written.
    fn unescape_xml(text: &str) -> String {
        match quick_xml::escape::unescape(text) {
            Ok(unescaped) => unescaped.into_owned(),
            Err(e) => {
                debug!("Leaving run with bad character reference as-is: {}", e);
                text.to_string()
            }
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, document: &RawDocument) -> Result<String> {
        let text = String::from_utf8_lossy(&document.bytes);
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}

/// Route a document to the extractor for its declared type and normalize the result.
pub fn extract_document(document: &RawDocument) -> Result<ExtractedText> {
    let raw = match document.file_type() {
        FileType::Pdf => PdfExtractor.extract(document)?,
        FileType::Docx => DocxExtractor.extract(document)?,
        FileType::Text => PlainTextExtractor.extract(document)?,
    };
    Ok(ExtractedText::new(document.file_name.clone(), normalize_text(&raw)))
}

/// Unify line endings and typographic characters, trim trailing whitespace per line.
pub fn normalize_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let mapped: String = unified
        .chars()
        .filter(|c| *c != '\0')
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{00A0}' | '\u{2007}' | '\u{202F}' => ' ',
            '\u{000C}' => '\n',
            _ => c,
        })
        .collect();

    mapped
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}
