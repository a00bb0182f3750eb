//! Watermarking - compositing a text or image stamp onto pages
//!
//! 1. Build one stamp on the reference canvas (text or image, with opacity)
//! 2. Anchor it at one of nine grid positions
//! 3. Copy the document, drawing the stamp on each target page

mod composite;
mod position;
mod stamp;

pub use composite::{WatermarkOutcome, WatermarkTargets, apply, watermark_document};
pub use position::calculate_position;
pub use stamp::{Stamp, encode_text, text_width};
