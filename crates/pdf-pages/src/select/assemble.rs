//! Copying selected pages into new output documents

use super::plan::PlannedOutput;
use crate::document::SourceDocument;
use crate::render::{DocumentBuilder, ObjectCache, write_pdf};
use crate::types::*;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// Build an in-memory document holding `pages` (1-based) of `source`, in the
/// order given.
pub fn assemble_document(source: &SourceDocument, pages: &[u32]) -> Result<Document> {
    let mut builder = DocumentBuilder::new();
    let mut cache = ObjectCache::new();

    for &page in pages {
        let page_id = source.page_id(page)?;
        builder.push_page(source.document(), page_id, &mut cache)?;
    }

    Ok(builder.finish())
}

/// Write every planned output under `output_dir`.
///
/// Returns the written paths in plan order. A failure part-way leaves the
/// files already written in place; removing them is up to the caller.
pub fn assemble(
    source: &SourceDocument,
    plan: &[PlannedOutput],
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(plan.len());

    for entry in plan {
        let mut doc = assemble_document(source, &entry.pages)?;
        let path = output_dir.join(&entry.filename);
        write_pdf(&mut doc, &path)?;
        log::debug!(
            "Wrote {} ({} page(s))",
            path.display(),
            entry.pages.len()
        );
        written.push(path);
    }

    Ok(written)
}
