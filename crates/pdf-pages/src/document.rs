//! Read-only handle over a source PDF

use crate::settings::Settings;
use crate::types::*;
use lopdf::{Document, ObjectId};
use std::path::{Path, PathBuf};

/// A parsed source document.
///
/// Operations only ever borrow it: nothing in the crate mutates the
/// underlying [`Document`] or touches the file it was read from.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    path: PathBuf,
    document: Document,
    page_ids: Vec<ObjectId>,
}

impl SourceDocument {
    /// Open and validate a source PDF.
    ///
    /// Fails with `NotFound` when the file is missing and with `Validation`
    /// when it has the wrong extension, is too large, can't be parsed, is
    /// encrypted or has no pages.
    pub fn open(path: impl AsRef<Path>, settings: &Settings) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(PdfToolError::NotFound(path.to_path_buf()));
        }

        if !settings.is_allowed_extension(path) {
            return Err(PdfToolError::validation(format!(
                "File is not a PDF: {}",
                path.display()
            )));
        }

        let size = std::fs::metadata(path)?.len();
        if size > settings.max_file_size {
            return Err(PdfToolError::validation(format!(
                "File size ({} bytes) exceeds maximum allowed size ({} bytes)",
                size, settings.max_file_size
            )));
        }

        let bytes = std::fs::read(path)?;
        let document = Document::load_mem(&bytes).map_err(|e| {
            PdfToolError::validation(format!("Invalid PDF file: {}. Error: {}", path.display(), e))
        })?;

        Self::from_document(path, document)
    }

    /// Wrap an already-parsed document. `path` is only used for naming outputs.
    pub fn from_document(path: impl Into<PathBuf>, document: Document) -> Result<Self> {
        let path = path.into();

        if document.trailer.get(b"Encrypt").is_ok() {
            return Err(PdfToolError::validation(format!(
                "Encrypted PDF files are not supported: {}",
                path.display()
            )));
        }

        let page_ids: Vec<ObjectId> = document.get_pages().values().copied().collect();
        if page_ids.is_empty() {
            return Err(PdfToolError::validation(format!(
                "PDF file has no pages: {}",
                path.display()
            )));
        }

        Ok(Self {
            path,
            document,
            page_ids,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File stem of the source, used as the default output prefix
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document")
    }

    pub fn page_count(&self) -> u32 {
        self.page_ids.len() as u32
    }

    /// Object id of a 1-based page number
    pub fn page_id(&self, page: u32) -> Result<ObjectId> {
        (page as usize)
            .checked_sub(1)
            .and_then(|idx| self.page_ids.get(idx))
            .copied()
            .ok_or_else(|| {
                PdfToolError::validation(format!(
                    "Page {} is out of range (1-{})",
                    page,
                    self.page_count()
                ))
            })
    }

    /// Object ids of every page, in document order
    pub fn page_ids(&self) -> &[ObjectId] {
        &self.page_ids
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}
