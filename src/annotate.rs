//! Drawing of a located match onto a color image.
//!
//! The box is a red hollow rectangle two pixels thick spanning
//! `(x, y)..=(x + width, y + height)`. The label `Confidence: 0.97` is set in
//! the embedded DejaVu Sans face; it sits above the box, or below it when the
//! box is too close to the top edge.

use crate::search::MatchResult;
use crate::util::{LocateError, LocateResult};
use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

/// Color of the box and label.
pub const MATCH_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
/// Label height in pixels.
const LABEL_SCALE: f32 = 14.0;
/// Gap between the label and the top of the box.
const LABEL_GAP: i32 = 10;

/// Parses the embedded label font.
pub fn label_font() -> LocateResult<FontRef<'static>> {
    FontRef::try_from_slice(FONT_DATA).map_err(|err| LocateError::Font {
        reason: err.to_string(),
    })
}

/// Returns a copy of `image` with the match box and confidence label drawn.
pub fn annotate(image: &RgbImage, m: &MatchResult) -> LocateResult<RgbImage> {
    let mut out = image.clone();
    draw_match_mut(&mut out, m)?;
    Ok(out)
}

/// Draws the match box and confidence label in place.
pub fn draw_match_mut(image: &mut RgbImage, m: &MatchResult) -> LocateResult<()> {
    let font = label_font()?;
    let scale = PxScale::from(LABEL_SCALE);
    let x = m.x as i32;
    let y = m.y as i32;

    draw_hollow_rect_mut(image, Rect::at(x, y).of_size(m.width + 1, m.height + 1), MATCH_COLOR);
    if m.width > 1 && m.height > 1 {
        draw_hollow_rect_mut(
            image,
            Rect::at(x + 1, y + 1).of_size(m.width - 1, m.height - 1),
            MATCH_COLOR,
        );
    }

    let label = format!("Confidence: {:.2}", m.confidence);
    let (_, text_height) = text_size(scale, &font, &label);
    let above = y - LABEL_GAP - text_height as i32;
    let top = if above >= 0 {
        above
    } else {
        y + m.height as i32 + 4
    };
    draw_text_mut(image, MATCH_COLOR, x, top, scale, &font, &label);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{annotate, label_font, MATCH_COLOR};
    use crate::search::MatchResult;
    use image::{Rgb, RgbImage};

    const BACKGROUND: Rgb<u8> = Rgb([40, 40, 40]);

    fn gray_canvas(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, BACKGROUND)
    }

    fn touched_in_rows(img: &RgbImage, rows: std::ops::Range<u32>) -> usize {
        rows.flat_map(|y| (0..img.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| *img.get_pixel(x, y) != BACKGROUND)
            .count()
    }

    #[test]
    fn embedded_font_parses() {
        assert!(label_font().is_ok());
    }

    #[test]
    fn draws_box_edges_and_leaves_input_untouched() {
        let input = gray_canvas(160, 100);
        let m = MatchResult {
            x: 30,
            y: 40,
            width: 20,
            height: 10,
            confidence: 0.93,
        };
        let out = annotate(&input, &m).unwrap();

        assert_eq!(*input.get_pixel(30, 40), BACKGROUND);
        assert_eq!(*out.get_pixel(30, 40), MATCH_COLOR);
        assert_eq!(*out.get_pixel(31, 41), MATCH_COLOR);
        assert_eq!(*out.get_pixel(50, 50), MATCH_COLOR);
        assert_eq!(*out.get_pixel(40, 45), BACKGROUND);

        // The label occupies the band above the box.
        assert!(touched_in_rows(&out, 0..40) > 0);
    }

    #[test]
    fn label_moves_below_box_at_top_edge() {
        let input = gray_canvas(160, 60);
        let m = MatchResult {
            x: 0,
            y: 2,
            width: 10,
            height: 10,
            confidence: 1.0,
        };
        let out = annotate(&input, &m).unwrap();
        assert_eq!(touched_in_rows(&out, 0..2), 0);
        assert!(touched_in_rows(&out, 14..60) > 0);
    }

    #[test]
    fn box_touching_border_is_clipped() {
        let input = gray_canvas(20, 20);
        let m = MatchResult {
            x: 10,
            y: 10,
            width: 10,
            height: 10,
            confidence: 0.85,
        };
        let out = annotate(&input, &m).unwrap();
        assert_eq!(*out.get_pixel(19, 10), MATCH_COLOR);
        assert_eq!(*out.get_pixel(10, 19), MATCH_COLOR);
    }
}
