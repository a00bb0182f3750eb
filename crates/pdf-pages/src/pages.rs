use crate::constants::MAX_PAGE_NUMBER;
use crate::types::*;
use std::collections::BTreeSet;

/// Parse a page list such as `"1,3,5-8"` into sorted, unique page numbers.
///
/// Ranges are inclusive. Page numbers above [`MAX_PAGE_NUMBER`] are rejected
/// before any range is expanded; checks against a document's page count
/// happen later, when the list is resolved.
pub fn parse_page_list(input: &str) -> Result<Vec<u32>> {
    let mut pages = BTreeSet::new();

    for part in input.split(',').map(str::trim) {
        if part.is_empty() {
            continue;
        }

        match part.split_once('-') {
            Some((start, end)) => {
                let start = parse_page_number(start)?;
                let end = parse_page_number(end)?;
                if start > end {
                    return Err(PdfToolError::validation(format!(
                        "Invalid page range {}-{}: start is greater than end",
                        start, end
                    )));
                }
                pages.extend(start..=end);
            }
            None => {
                pages.insert(parse_page_number(part)?);
            }
        }
    }

    if pages.is_empty() {
        return Err(PdfToolError::validation(format!(
            "No pages given in '{}'",
            input
        )));
    }

    Ok(pages.into_iter().collect())
}

fn parse_page_number(s: &str) -> Result<u32> {
    let page: u32 = s
        .trim()
        .parse()
        .map_err(|_| PdfToolError::validation(format!("Invalid page number: '{}'", s.trim())))?;
    if page > MAX_PAGE_NUMBER {
        return Err(PdfToolError::validation(format!(
            "Page number {} exceeds the maximum of {}",
            page, MAX_PAGE_NUMBER
        )));
    }
    Ok(page)
}
