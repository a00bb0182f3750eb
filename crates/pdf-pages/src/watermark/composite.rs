//! Compositing a stamp onto the target pages of a document

use super::stamp::Stamp;
use crate::document::SourceDocument;
use crate::options::WatermarkOptions;
use crate::render::{
    DocumentBuilder, ObjectCache, add_page_resource, append_content, unused_resource_name,
    write_pdf,
};
use crate::types::*;
use lopdf::Document;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Resource name stem for stamps drawn on a page
const STAMP_NAME_STEM: &str = "Wm";

/// Which pages a watermark lands on
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatermarkTargets {
    /// 0-based page indices, ascending
    pub pages: BTreeSet<usize>,
    /// Requested 1-based pages that fell outside the document
    pub dropped: Vec<u32>,
}

impl WatermarkTargets {
    /// Resolve the target pages of a watermark.
    ///
    /// Unlike page selection, specific pages outside `1..=total_pages` are
    /// skipped rather than rejected; they're reported in `dropped`.
    pub fn resolve(options: &WatermarkOptions, total_pages: u32) -> Result<Self> {
        match options.page_selection {
            PageSelectionMode::AllPages => Ok(Self {
                pages: (0..total_pages as usize).collect(),
                dropped: Vec::new(),
            }),
            PageSelectionMode::SpecificPages => {
                let requested = options
                    .specific_pages
                    .as_deref()
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| {
                        PdfToolError::validation("specific page selection requires a page list")
                    })?;

                let (valid, dropped): (Vec<u32>, Vec<u32>) = requested
                    .iter()
                    .copied()
                    .partition(|&p| p >= 1 && p <= total_pages);

                Ok(Self {
                    pages: valid.into_iter().map(|p| p as usize - 1).collect(),
                    dropped,
                })
            }
            PageSelectionMode::SingleFile => Err(PdfToolError::validation(
                "watermark page selection must be 'all' or 'pages'",
            )),
        }
    }

    /// Target pages as sorted 1-based numbers
    pub fn page_numbers(&self) -> Vec<u32> {
        self.pages.iter().map(|&idx| idx as u32 + 1).collect()
    }
}

/// Result of a written watermark operation
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkOutcome {
    pub output_path: PathBuf,
    pub targets: WatermarkTargets,
}

/// Build the watermarked document in memory.
///
/// Every source page is copied in order; target pages additionally draw the
/// stamp on top of their content. Applying a watermark to an already
/// watermarked document draws a second stamp.
pub fn watermark_document(
    source: &SourceDocument,
    options: &WatermarkOptions,
) -> Result<(Document, WatermarkTargets)> {
    let stamp = Stamp::from_options(options)?;
    let targets = WatermarkTargets::resolve(options, source.page_count())?;

    if !targets.dropped.is_empty() {
        log::warn!(
            "Skipping watermark pages outside 1-{}: {:?}",
            source.page_count(),
            targets.dropped
        );
    }

    let mut builder = DocumentBuilder::new();
    let mut cache = ObjectCache::new();
    let stamp_id = stamp.embed(builder.document_mut())?;

    for (idx, &page_id) in source.page_ids().iter().enumerate() {
        let new_id = builder.push_page(source.document(), page_id, &mut cache)?;
        if !targets.pages.contains(&idx) {
            continue;
        }

        let doc = builder.document_mut();
        let name = unused_resource_name(doc, new_id, b"XObject", STAMP_NAME_STEM)?;
        add_page_resource(doc, new_id, b"XObject", &name, stamp_id)?;
        append_content(
            doc,
            new_id,
            b"q\n",
            format!("\nQ\nq /{} Do Q\n", name).as_bytes(),
        )?;
    }

    Ok((builder.finish(), targets))
}

/// Watermark `source` and write the result to `output_path`.
///
/// Option problems surface as validation errors before anything is written;
/// failures while drawing or writing become processing errors.
pub fn apply(
    source: &SourceDocument,
    options: &WatermarkOptions,
    output_path: &Path,
) -> Result<WatermarkOutcome> {
    options.validate()?;

    let (mut doc, targets) =
        watermark_document(source, options).map_err(|e| e.during("add watermark"))?;
    write_pdf(&mut doc, output_path).map_err(|e| e.during("add watermark"))?;

    log::info!(
        "Watermarked {} of {} pages -> {}",
        targets.pages.len(),
        source.page_count(),
        output_path.display()
    );

    Ok(WatermarkOutcome {
        output_path: output_path.to_path_buf(),
        targets,
    })
}
