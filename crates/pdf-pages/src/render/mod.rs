//! PDF object plumbing shared by the assembler, compositor and merge
//!
//! - Deep copying pages and the objects they reference
//! - Building output documents with a fresh page tree
//! - Reading and extending page content streams

mod builder;
mod content;
mod copy;

pub use builder::{DocumentBuilder, write_pdf};
pub use content::{add_page_resource, append_content, content_refs, unused_resource_name};
pub use copy::{ObjectCache, copy_object_deep, copy_page, default_media_box};
