//! Concatenating documents

use crate::document::SourceDocument;
use crate::render::{DocumentBuilder, ObjectCache};
use crate::types::*;
use lopdf::Document;

/// Merge every page of `sources`, in order, into one new document.
///
/// At least two sources are required.
pub fn merge_documents(sources: &[SourceDocument]) -> Result<Document> {
    if sources.len() < 2 {
        return Err(PdfToolError::validation(
            "At least 2 PDF files are required for merging",
        ));
    }

    let mut builder = DocumentBuilder::new();
    for source in sources {
        // Object ids are only meaningful within one source
        let mut cache = ObjectCache::new();
        for &page_id in source.page_ids() {
            builder.push_page(source.document(), page_id, &mut cache)?;
        }
    }

    log::debug!(
        "Merged {} documents into {} pages",
        sources.len(),
        builder.page_count()
    );

    Ok(builder.finish())
}
