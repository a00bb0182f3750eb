//! Stamp construction
//!
//! A stamp is a single Form XObject covering the reference canvas. It holds
//! the text or image at its computed position, drawn through an ExtGState
//! carrying the watermark opacity. The same XObject is drawn on every
//! target page.

use super::position::calculate_position;
use crate::constants::{
    HELVETICA_FALLBACK_WIDTH, HELVETICA_WIDTHS, REFERENCE_PAGE_DIMENSIONS, WATERMARK_FONT,
};
use crate::options::WatermarkOptions;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

const GSTATE_NAME: &str = "GS0";
const FONT_NAME: &str = "F1";
const IMAGE_NAME: &str = "Im0";

/// What a stamp draws
#[derive(Debug, Clone)]
enum StampContent {
    Text {
        text: String,
        font_size: f32,
        color: [f32; 3],
    },
    Image {
        width_px: u32,
        height_px: u32,
        rgb: Vec<u8>,
        /// Only present when the image has transparent pixels
        alpha: Option<Vec<u8>>,
        scale: f32,
    },
}

/// A watermark ready to be embedded into an output document
#[derive(Debug, Clone)]
pub struct Stamp {
    content: StampContent,
    opacity: f32,
    page_size: (f32, f32),
    origin: (f32, f32),
}

impl Stamp {
    /// Build the stamp for validated `options`, loading the image if any.
    pub fn from_options(options: &WatermarkOptions) -> Result<Self> {
        options.validate()?;

        let content = match options.watermark_type {
            WatermarkType::Text => StampContent::Text {
                text: options.text.clone().unwrap_or_default(),
                font_size: options.font_size_or_default(),
                color: options.fill_color()?,
            },
            WatermarkType::Image => {
                let path = options
                    .image_path
                    .as_ref()
                    .ok_or_else(|| PdfToolError::validation("image watermark requires an image file"))?;
                let rgba = image::open(path)
                    .map_err(|e| {
                        PdfToolError::processing(format!("Failed to process watermark image: {}", e))
                    })?
                    .to_rgba8();
                let (width_px, height_px) = rgba.dimensions();

                let mut rgb = Vec::with_capacity((width_px * height_px * 3) as usize);
                let mut alpha = Vec::with_capacity((width_px * height_px) as usize);
                for pixel in rgba.pixels() {
                    rgb.extend_from_slice(&pixel.0[..3]);
                    alpha.push(pixel.0[3]);
                }
                let alpha = alpha.iter().any(|&a| a < u8::MAX).then_some(alpha);

                StampContent::Image {
                    width_px,
                    height_px,
                    rgb,
                    alpha,
                    scale: options.image_scale_or_default() / 100.0,
                }
            }
        };

        let mut stamp = Self {
            content,
            opacity: options.opacity,
            page_size: REFERENCE_PAGE_DIMENSIONS,
            origin: (0.0, 0.0),
        };
        stamp.origin = calculate_position(options.position, stamp.page_size, stamp.element_size());
        Ok(stamp)
    }

    /// (width, height) of the drawn element in points.
    ///
    /// Text uses its rendered width and the font size as height; images use
    /// their pixel size times the scale factor.
    pub fn element_size(&self) -> (f32, f32) {
        match &self.content {
            StampContent::Text {
                text, font_size, ..
            } => (text_width(text, *font_size), *font_size),
            StampContent::Image {
                width_px,
                height_px,
                scale,
                ..
            } => (*width_px as f32 * scale, *height_px as f32 * scale),
        }
    }

    /// Lower-left corner of the element on the reference canvas
    pub fn origin(&self) -> (f32, f32) {
        self.origin
    }

    /// Add the stamp's Form XObject (and everything it uses) to `doc`.
    pub fn embed(&self, doc: &mut Document) -> Result<ObjectId> {
        let gstate_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"ExtGState".to_vec())),
            ("ca", Object::Real(self.opacity)),
            ("CA", Object::Real(self.opacity)),
        ]));

        let mut resources = Dictionary::new();
        resources.set(
            "ExtGState",
            Object::Dictionary(Dictionary::from_iter(vec![(
                GSTATE_NAME,
                Object::Reference(gstate_id),
            )])),
        );

        let (x, y) = self.origin;
        let content = match &self.content {
            StampContent::Text {
                text,
                font_size,
                color,
            } => {
                let font_id = doc.add_object(Dictionary::from_iter(vec![
                    ("Type", Object::Name(b"Font".to_vec())),
                    ("Subtype", Object::Name(b"Type1".to_vec())),
                    ("BaseFont", Object::Name(WATERMARK_FONT.as_bytes().to_vec())),
                    ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
                ]));
                resources.set(
                    "Font",
                    Object::Dictionary(Dictionary::from_iter(vec![(
                        FONT_NAME,
                        Object::Reference(font_id),
                    )])),
                );

                let mut ops = format!(
                    "q /{} gs {} {} {} rg BT /{} {} Tf {} {} Td (",
                    GSTATE_NAME, color[0], color[1], color[2], FONT_NAME, font_size, x, y
                )
                .into_bytes();
                ops.extend(encode_text(text));
                ops.extend_from_slice(b") Tj ET Q\n");
                ops
            }
            StampContent::Image {
                width_px,
                height_px,
                rgb,
                alpha,
                ..
            } => {
                let image_id = embed_image(doc, *width_px, *height_px, rgb, alpha.as_deref());
                resources.set(
                    "XObject",
                    Object::Dictionary(Dictionary::from_iter(vec![(
                        IMAGE_NAME,
                        Object::Reference(image_id),
                    )])),
                );

                let (w, h) = self.element_size();
                format!(
                    "q /{} gs {} 0 0 {} {} {} cm /{} Do Q\n",
                    GSTATE_NAME, w, h, x, y, IMAGE_NAME
                )
                .into_bytes()
            }
        };

        let (page_width, page_height) = self.page_size;
        let mut form = Dictionary::new();
        form.set("Type", Object::Name(b"XObject".to_vec()));
        form.set("Subtype", Object::Name(b"Form".to_vec()));
        form.set("FormType", Object::Integer(1));
        form.set(
            "BBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page_width),
                Object::Real(page_height),
            ]),
        );
        form.set("Resources", Object::Dictionary(resources));

        Ok(doc.add_object(Stream::new(form, content)))
    }
}

/// Add an RGB image XObject, with a DeviceGray soft mask when `alpha` is given.
fn embed_image(
    doc: &mut Document,
    width: u32,
    height: u32,
    rgb: &[u8],
    alpha: Option<&[u8]>,
) -> ObjectId {
    let image_dict = |color_space: &str| {
        Dictionary::from_iter(vec![
            ("Type", Object::Name(b"XObject".to_vec())),
            ("Subtype", Object::Name(b"Image".to_vec())),
            ("Width", Object::Integer(width as i64)),
            ("Height", Object::Integer(height as i64)),
            ("ColorSpace", Object::Name(color_space.as_bytes().to_vec())),
            ("BitsPerComponent", Object::Integer(8)),
        ])
    };

    let mut dict = image_dict("DeviceRGB");
    if let Some(alpha) = alpha {
        let smask_id = doc.add_object(Stream::new(image_dict("DeviceGray"), alpha.to_vec()));
        dict.set("SMask", Object::Reference(smask_id));
    }

    doc.add_object(Stream::new(dict, rgb.to_vec()))
}

/// Width of `text` set in Helvetica at `font_size`, in points
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c) as u32).sum();
    units as f32 * font_size / 1000.0
}

fn glyph_width(c: char) -> u16 {
    match c as u32 {
        code @ 32..=126 => HELVETICA_WIDTHS[(code - 32) as usize],
        _ => HELVETICA_FALLBACK_WIDTH,
    }
}

/// Encode text as the body of a PDF literal string in WinAnsi.
///
/// Latin-1 characters are written as octal escapes; anything outside
/// Latin-1 has no glyph in the standard font and becomes `?`.
pub fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            ' '..='~' => out.push(c as u8),
            '\u{a0}'..='\u{ff}' => out.extend(format!("\\{:03o}", c as u32).into_bytes()),
            _ => out.push(b'?'),
        }
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
