//! Deciding how many output files a selection produces and what they're called

use crate::types::PageSelectionMode;

/// One output file of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    /// 1-based source pages, in output order
    pub pages: Vec<u32>,
    /// File name including the `.pdf` extension
    pub filename: String,
}

/// Plan the output files for resolved target pages.
///
/// `SingleFile` yields one file holding every target; the other modes yield
/// one file per page. A missing or blank `prefix` falls back to `source_stem`.
pub fn plan(
    mode: PageSelectionMode,
    targets: &[u32],
    prefix: Option<&str>,
    source_stem: &str,
) -> Vec<PlannedOutput> {
    let prefix = prefix
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(source_stem);

    match mode {
        PageSelectionMode::SingleFile => {
            let filename = match targets {
                [] => return Vec::new(),
                [only] => page_filename(prefix, *only),
                _ => {
                    let min = targets.iter().min().copied().unwrap_or_default();
                    let max = targets.iter().max().copied().unwrap_or_default();
                    format!("{}_pages_{}-{}.pdf", prefix, min, max)
                }
            };
            vec![PlannedOutput {
                pages: targets.to_vec(),
                filename,
            }]
        }
        PageSelectionMode::AllPages | PageSelectionMode::SpecificPages => targets
            .iter()
            .map(|&page| PlannedOutput {
                pages: vec![page],
                filename: page_filename(prefix, page),
            })
            .collect(),
    }
}

fn page_filename(prefix: &str, page: u32) -> String {
    format!("{}_page_{}.pdf", prefix, page)
}
