//! Assembling new output documents

use super::copy::{ObjectCache, copy_page};
use crate::constants::OUTPUT_PDF_VERSION;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::Path;

/// Builds a fresh single-level page tree out of copied pages.
pub struct DocumentBuilder {
    output: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        let mut output = Document::with_version(OUTPUT_PDF_VERSION);
        let pages_id = output.new_object_id();
        Self {
            output,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// Append a copy of `page_id` from `source`. Returns the id of the copy.
    pub fn push_page(
        &mut self,
        source: &Document,
        page_id: ObjectId,
        cache: &mut ObjectCache,
    ) -> Result<ObjectId> {
        let new_id = copy_page(&mut self.output, source, page_id, self.pages_id, cache)?;
        self.kids.push(Object::Reference(new_id));
        Ok(new_id)
    }

    /// The document under construction, for adding shared objects
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.output
    }

    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Close the page tree and catalog
    pub fn finish(mut self) -> Document {
        let count = self.kids.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.kids)),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.output.trailer.set("Root", catalog_id);

        self.output
    }
}

/// Compress, serialize and write `doc` to `path`.
///
/// Encrypted documents are written as they are: their streams already hold
/// ciphertext.
pub fn write_pdf(doc: &mut Document, path: impl AsRef<Path>) -> Result<()> {
    if !doc.is_encrypted() {
        doc.compress();
    }
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
