//! Page selection, watermarking, merging and password protection for PDF files

pub mod constants;
mod document;
mod info;
mod merge;
mod operations;
mod options;
mod pages;
mod protect;
pub mod render;
mod result;
pub mod select;
mod settings;
mod types;
pub mod watermark;

pub use document::SourceDocument;
pub use info::{PdfInfo, parse_pdf_date, read_info};
pub use merge::merge_documents;
pub use operations::{
    PdfOperations, add_watermark, merge_pdfs, pdf_info, protect_pdf, select_pages,
};
pub use options::*;
pub use pages::parse_page_list;
pub use protect::protect_document;
pub use result::OperationResult;
pub use settings::{ENV_MAX_FILE_SIZE, ENV_TEMP_DIR, Settings};
pub use types::*;
