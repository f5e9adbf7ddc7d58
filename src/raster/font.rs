use std::path::Path;

use anyhow::Context;
use fontdue::layout::{CoordinateSystem, GlyphPosition, Layout, LayoutSettings, TextStyle};
use image::RgbaImage;

use crate::{
    foundation::core::GLYPH_INK,
    foundation::error::{GlyphsetError, GlyphsetResult},
};

/// Tight bounding box of rendered glyph ink, in canvas pixel coordinates.
///
/// Fonts may report a non-zero top-left origin for their ink extents, so
/// `min_x`/`min_y` are not necessarily zero even for a layout anchored at the
/// origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InkBounds {
    /// Left edge of the ink extents.
    pub min_x: f32,
    /// Top edge of the ink extents.
    pub min_y: f32,
    /// Right edge of the ink extents.
    pub max_x: f32,
    /// Bottom edge of the ink extents.
    pub max_y: f32,
}

impl InkBounds {
    /// Width of the ink box.
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Height of the ink box.
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Measurement seam used by the auto-fit font size search.
///
/// The production implementation is [`LoadedFont`]; tests substitute fakes so
/// the search logic can be exercised without font files on disk.
pub trait MeasureGlyph {
    /// Measure the tight ink bounding box of `text` laid out at `size_px`.
    ///
    /// Returns `Ok(None)` when the laid-out text produces no ink at all
    /// (empty glyphs only).
    fn measure(&self, text: &str, size_px: f32) -> GlyphsetResult<Option<InkBounds>>;
}

/// Rendering seam: measurement plus ink blitting.
///
/// Everything the rasterizer needs from a font, so canvas assembly can be
/// exercised against fakes the same way the fit search is.
pub trait DrawGlyph: MeasureGlyph {
    /// Draw `text` onto `canvas` with its layout origin at `origin`.
    ///
    /// Glyph coverage lands in the opacity channel as black ink; overlapping
    /// glyphs keep the stronger coverage. Pixels outside the canvas are
    /// clipped. Characters the font cannot shape contribute no ink.
    fn blit_line(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        size_px: f32,
        origin: (f32, f32),
    ) -> GlyphsetResult<()>;
}

/// A scalable font loaded into memory, ready for measurement and blitting.
pub struct LoadedFont {
    font: fontdue::Font,
    name: String,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("name", &self.name)
            .field("glyph_count", &self.font.glyph_count())
            .finish()
    }
}

impl LoadedFont {
    /// Load a font from a file path. Missing or unreadable files are fatal.
    pub fn from_file(path: impl AsRef<Path>) -> GlyphsetResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font bytes from '{}'", path.display()))?;
        let label = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("font")
            .to_string();
        Self::from_bytes(&bytes, label)
    }

    /// Parse a font from raw bytes, labeled for diagnostics.
    pub fn from_bytes(bytes: &[u8], label: impl Into<String>) -> GlyphsetResult<Self> {
        let label = label.into();
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| GlyphsetError::validation(format!("parse font '{label}': {e}")))?;
        Ok(Self { font, name: label })
    }

    /// Diagnostic label for this font (file stem or caller-provided).
    pub fn name(&self) -> &str {
        &self.name
    }

    fn layout_line(&self, text: &str, size_px: f32) -> GlyphsetResult<Vec<GlyphPosition>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(GlyphsetError::config(
                "font size must be finite and > 0",
            ));
        }
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.font], &TextStyle::new(text, size_px, 0));
        Ok(layout.glyphs().clone())
    }

}

impl DrawGlyph for LoadedFont {
    fn blit_line(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        size_px: f32,
        origin: (f32, f32),
    ) -> GlyphsetResult<()> {
        let (cw, ch) = canvas.dimensions();
        for g in self.layout_line(text, size_px)? {
            if g.width == 0 || g.height == 0 || !g.char_data.rasterize() {
                continue;
            }
            let (_, coverage) = self.font.rasterize_config(g.key);
            let base_x = (g.x + origin.0).round() as i64;
            let base_y = (g.y + origin.1).round() as i64;
            for row in 0..g.height {
                for col in 0..g.width {
                    let cov = coverage[row * g.width + col];
                    if cov == 0 {
                        continue;
                    }
                    let px = base_x + col as i64;
                    let py = base_y + row as i64;
                    if px < 0 || py < 0 || px >= i64::from(cw) || py >= i64::from(ch) {
                        continue;
                    }
                    let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                    let mut ink = GLYPH_INK;
                    ink.0[3] = pixel.0[3].max(cov);
                    *pixel = ink;
                }
            }
        }
        Ok(())
    }
}

impl MeasureGlyph for LoadedFont {
    fn measure(&self, text: &str, size_px: f32) -> GlyphsetResult<Option<InkBounds>> {
        let mut bounds: Option<InkBounds> = None;
        for g in self.layout_line(text, size_px)? {
            if g.width == 0 || g.height == 0 || !g.char_data.rasterize() {
                continue;
            }
            let (min_x, min_y) = (g.x, g.y);
            let (max_x, max_y) = (g.x + g.width as f32, g.y + g.height as f32);
            bounds = Some(match bounds {
                None => InkBounds {
                    min_x,
                    min_y,
                    max_x,
                    max_y,
                },
                Some(b) => InkBounds {
                    min_x: b.min_x.min(min_x),
                    min_y: b.min_y.min(min_y),
                    max_x: b.max_x.max(max_x),
                    max_y: b.max_y.max(max_y),
                },
            });
        }
        Ok(bounds)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/font.rs"]
mod tests;
