use image::{Rgba, RgbaImage};

use crate::foundation::error::{GlyphsetError, GlyphsetResult};

/// Canvas background: white with zero opacity.
///
/// Only the opacity channel carries signal; the color channels stay fixed so
/// exported PNGs read as white-paper/black-ink when flattened.
pub const CANVAS_CLEAR: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Fully opaque glyph ink (black).
pub const GLYPH_INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Allocate a fully transparent square canvas of the given side length.
pub fn transparent_canvas(side: u32) -> RgbaImage {
    RgbaImage::from_pixel(side, side, CANVAS_CLEAR)
}

/// Return the side length of a square image, or a validation error.
///
/// Every canvas entering or leaving the pipeline must be square; this is the
/// single checkpoint for that invariant.
pub fn square_side(img: &RgbaImage) -> GlyphsetResult<u32> {
    let (w, h) = img.dimensions();
    if w != h {
        return Err(GlyphsetError::validation(format!(
            "canvas must be square, got {w}x{h}"
        )));
    }
    if w == 0 {
        return Err(GlyphsetError::validation("canvas side must be > 0"));
    }
    Ok(w)
}
