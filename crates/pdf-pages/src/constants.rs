//! Shared constants for page selection and watermarking

// =============================================================================
// Reference Page Geometry
// =============================================================================

/// Width of the stamp reference canvas in points (US Letter: 8.5" × 11")
pub const REFERENCE_PAGE_WIDTH_PT: f32 = 612.0;

/// Height of the stamp reference canvas in points (US Letter)
pub const REFERENCE_PAGE_HEIGHT_PT: f32 = 792.0;

/// Reference canvas dimensions as tuple (width, height)
pub const REFERENCE_PAGE_DIMENSIONS: (f32, f32) = (REFERENCE_PAGE_WIDTH_PT, REFERENCE_PAGE_HEIGHT_PT);

// =============================================================================
// Watermark Defaults
// =============================================================================

/// Distance between a watermark and the page edge it is anchored to (points)
pub const WATERMARK_MARGIN: f32 = 50.0;

/// Default font size for text watermarks (points)
pub const DEFAULT_FONT_SIZE: f32 = 36.0;

/// Default image scale for image watermarks (percent)
pub const DEFAULT_IMAGE_SCALE: f32 = 100.0;

/// Standard font used for text watermarks
pub const WATERMARK_FONT: &str = "Helvetica";

/// Advance widths of Helvetica for the printable ASCII range 32..=126,
/// in 1/1000 em.
pub const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, //
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, //
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, //
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Width used for glyphs outside the table
pub const HELVETICA_FALLBACK_WIDTH: u16 = 556;

// =============================================================================
// Output Files
// =============================================================================

/// The only output format page selection writes
pub const PDF_FORMAT: &str = "pdf";

/// PDF version used for every document the crate creates
pub const OUTPUT_PDF_VERSION: &str = "1.7";

// =============================================================================
// Limits
// =============================================================================

/// Largest page number accepted in a page list
pub const MAX_PAGE_NUMBER: u32 = 100_000;

/// Shortest accepted user or owner password, in characters
pub const MIN_PASSWORD_LEN: usize = 4;

/// Longest accepted user or owner password, in characters
pub const MAX_PASSWORD_LEN: usize = 50;
