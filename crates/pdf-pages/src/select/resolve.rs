//! Turning a selection mode into concrete target pages

use crate::types::*;

/// Resolve the 1-based target pages of a selection.
///
/// `AllPages` ignores `pages` and yields every page. The explicit modes
/// require a non-empty list whose entries all lie in `1..=total_pages`; the
/// result is de-duplicated and sorted ascending.
pub fn resolve(mode: PageSelectionMode, total_pages: u32, pages: Option<&[u32]>) -> Result<Vec<u32>> {
    if total_pages == 0 {
        return Err(PdfToolError::validation("document has no pages"));
    }

    match mode {
        PageSelectionMode::AllPages => Ok((1..=total_pages).collect()),
        PageSelectionMode::SpecificPages | PageSelectionMode::SingleFile => {
            let pages = match pages {
                Some(pages) if !pages.is_empty() => pages,
                _ => {
                    return Err(PdfToolError::validation(format!(
                        "mode '{}' requires a page list",
                        mode
                    )));
                }
            };

            if let Some(&bad) = pages.iter().find(|&&p| p < 1 || p > total_pages) {
                return Err(PdfToolError::validation(format!(
                    "Page {} is out of range (1-{})",
                    bad, total_pages
                )));
            }

            let mut targets = pages.to_vec();
            targets.sort_unstable();
            targets.dedup();
            Ok(targets)
        }
    }
}

/// Short human description of a page list: `"4"` or `"2-6"`
pub fn describe_pages(pages: &[u32]) -> String {
    match (pages.iter().min(), pages.iter().max()) {
        (Some(min), Some(max)) if min != max => format!("{}-{}", min, max),
        (Some(only), _) => only.to_string(),
        _ => String::new(),
    }
}
