//! Document metadata

use crate::document::SourceDocument;
use chrono::{NaiveDate, NaiveDateTime};
use lopdf::{Document, Object};
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Basic facts about a PDF
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PdfInfo {
    pub pages: u32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub creation_date: Option<NaiveDateTime>,
    pub file_size: Option<u64>,
    pub file_path: PathBuf,
}

/// Read page count and `/Info` metadata from an opened document
pub fn read_info(source: &SourceDocument) -> PdfInfo {
    let doc = source.document();
    let file_size = std::fs::metadata(source.path()).ok().map(|m| m.len());

    PdfInfo {
        pages: source.page_count(),
        title: info_string(doc, b"Title"),
        author: info_string(doc, b"Author"),
        creation_date: info_string(doc, b"CreationDate").and_then(|d| parse_pdf_date(&d)),
        file_size,
        file_path: source.path().to_path_buf(),
    }
}

/// A text entry of the trailer's `/Info` dictionary
fn info_string(doc: &Document, key: &[u8]) -> Option<String> {
    let info = match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok()?,
        Object::Dictionary(dict) => dict,
        _ => return None,
    };

    // UTF-16BE or UTF-8 with a BOM, otherwise PDFDocEncoding
    let text = lopdf::decode_text_string(info.get(key).ok()?).ok()?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    Some(text.to_string()).filter(|s| !s.is_empty())
}

/// Parse a PDF date (`D:YYYYMMDDHHmmSS` followed by an optional zone).
///
/// Missing trailing fields default to their minimum; the zone is ignored.
pub fn parse_pdf_date(raw: &str) -> Option<NaiveDateTime> {
    let digits: String = raw
        .trim()
        .trim_start_matches("D:")
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.len() < 4 {
        return None;
    }

    // Pad to YYYYMMDDHHmmSS with month/day defaulting to 01
    const DEFAULTS: &str = "00000101000000";
    let padded: String = digits
        .chars()
        .chain(DEFAULTS.chars().skip(digits.len()))
        .take(14)
        .collect();

    let field = |range: std::ops::Range<usize>| padded.get(range)?.parse::<u32>().ok();
    NaiveDate::from_ymd_opt(field(0..4)? as i32, field(4..6)?, field(6..8)?)?.and_hms_opt(
        field(8..10)?,
        field(10..12)?,
        field(12..14)?,
    )
}
