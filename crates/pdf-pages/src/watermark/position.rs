//! Anchoring a watermark element on a page

use crate::constants::WATERMARK_MARGIN;
use crate::types::{Column, Row, WatermarkPosition};

/// Lower-left corner, in PDF user space, at which to draw an element of
/// `element` (width, height) so it sits at `position` on a page of `page`
/// (width, height).
///
/// Edge-anchored elements keep [`WATERMARK_MARGIN`] from the edge; centered
/// ones are centered on that axis. PDF y grows upwards, so the top row has
/// the largest y.
pub fn calculate_position(
    position: WatermarkPosition,
    page: (f32, f32),
    element: (f32, f32),
) -> (f32, f32) {
    let (page_width, page_height) = page;
    let (elem_width, elem_height) = element;

    let x = match position.column() {
        Column::Left => WATERMARK_MARGIN,
        Column::Center => (page_width - elem_width) / 2.0,
        Column::Right => page_width - elem_width - WATERMARK_MARGIN,
    };

    let y = match position.row() {
        Row::Top => page_height - elem_height - WATERMARK_MARGIN,
        Row::Center => (page_height - elem_height) / 2.0,
        Row::Bottom => WATERMARK_MARGIN,
    };

    (x, y)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::REFERENCE_PAGE_DIMENSIONS;

    const ELEMENT: (f32, f32) = (200.0, 40.0);

    #[test]
    fn test_corners() {
        let page = REFERENCE_PAGE_DIMENSIONS;

        assert_eq!(
            calculate_position(WatermarkPosition::TopLeft, page, ELEMENT),
            (50.0, 702.0)
        );
        assert_eq!(
            calculate_position(WatermarkPosition::TopRight, page, ELEMENT),
            (362.0, 702.0)
        );
        assert_eq!(
            calculate_position(WatermarkPosition::BottomLeft, page, ELEMENT),
            (50.0, 50.0)
        );
        assert_eq!(
            calculate_position(WatermarkPosition::BottomRight, page, ELEMENT),
            (362.0, 50.0)
        );
    }

    #[test]
    fn test_center() {
        let (x, y) = calculate_position(
            WatermarkPosition::Center,
            REFERENCE_PAGE_DIMENSIONS,
            ELEMENT,
        );
        assert_eq!(x, 206.0);
        assert_eq!(y, 376.0);
    }

    #[test]
    fn test_element_larger_than_page_goes_negative() {
        let (x, _) = calculate_position(WatermarkPosition::Center, (100.0, 100.0), (300.0, 10.0));
        assert_eq!(x, -100.0);
    }
}
