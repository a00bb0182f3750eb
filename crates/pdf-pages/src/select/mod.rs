//! Page selection - splitting a document into per-page or merged outputs
//!
//! 1. Resolve the selection against the page count
//! 2. Plan output files and their names
//! 3. Copy the pages into new documents and write them

mod assemble;
mod plan;
mod resolve;

pub use assemble::{assemble, assemble_document};
pub use plan::{PlannedOutput, plan};
pub use resolve::{describe_pages, resolve};
