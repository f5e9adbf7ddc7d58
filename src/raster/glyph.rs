use std::path::Path;

use anyhow::Context;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use image::{Rgba, RgbaImage};

use crate::{
    foundation::core::transparent_canvas,
    foundation::error::{GlyphsetError, GlyphsetResult},
    raster::font::{DrawGlyph, MeasureGlyph},
};

/// Default canvas side length in pixels.
pub const DEFAULT_PIC_DIM: u32 = 64;

/// Default fraction of the canvas the glyph ink box may occupy per axis.
pub const DEFAULT_FIT_RATIO: f32 = 0.90;

/// Hard cap on auto-fit growth steps. Degenerate glyphs whose ink box never
/// approaches the target would otherwise grow forever.
pub(crate) const MAX_AUTO_FIT_STEPS: u32 = 4096;

const DEBUG_BOX_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Stop rule for the auto-fit font size search.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FitStrategy {
    /// Stop at the first size whose ink box reaches the fit threshold.
    ///
    /// This is one step *past* the largest size that stays strictly under the
    /// threshold, matching the historical generator this crate replaces. The
    /// default for compatibility with datasets produced by it.
    #[default]
    Overshoot,
    /// Stop at the largest size whose ink box stays strictly under the
    /// threshold.
    LargestThatFits,
}

/// Everything needed to rasterize one text string onto one canvas.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GlyphSpec {
    /// Text to render (one digit in the corpus driver, any string here).
    pub text: String,
    /// Canvas side length in pixels.
    #[serde(default = "default_pic_dim")]
    pub pic_dim: u32,
    /// Fraction of the canvas the ink box may occupy per axis, in (0, 1].
    #[serde(default = "default_fit_ratio")]
    pub fit_ratio: f32,
    /// Search for the font size instead of using `pic_dim` directly.
    #[serde(default = "default_true")]
    pub auto_fit: bool,
    /// Stop rule for the auto-fit search.
    #[serde(default)]
    pub fit_strategy: FitStrategy,
    /// Draw an unfilled outline around the measured ink box. Visual
    /// verification only, never part of the training signal.
    #[serde(default)]
    pub debug_box: bool,
}

fn default_pic_dim() -> u32 {
    DEFAULT_PIC_DIM
}

fn default_fit_ratio() -> f32 {
    DEFAULT_FIT_RATIO
}

fn default_true() -> bool {
    true
}

impl GlyphSpec {
    /// Build a spec for `text` with default canvas size and fit settings.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pic_dim: DEFAULT_PIC_DIM,
            fit_ratio: DEFAULT_FIT_RATIO,
            auto_fit: true,
            fit_strategy: FitStrategy::default(),
            debug_box: false,
        }
    }

    /// Validate spec fields before any rendering work.
    pub fn validate(&self) -> GlyphsetResult<()> {
        if self.text.is_empty() {
            return Err(GlyphsetError::validation("glyph text must be non-empty"));
        }
        if self.pic_dim == 0 {
            return Err(GlyphsetError::config("pic_dim must be > 0"));
        }
        if !self.fit_ratio.is_finite() || self.fit_ratio <= 0.0 || self.fit_ratio > 1.0 {
            return Err(GlyphsetError::config(format!(
                "fit_ratio must be in (0, 1], got {}",
                self.fit_ratio
            )));
        }
        Ok(())
    }
}

/// Search for the font size at which `text` fills `fit_ratio` of the canvas.
///
/// Starts at `pic_dim` and grows by one unit until the ink box width or
/// height reaches `fit_ratio * pic_dim`; the strategy picks which side of the
/// crossing to return. A measurement with no ink at all is a fatal geometry
/// error, as is exhausting the step budget, so the search always terminates.
pub fn auto_fit_size<M: MeasureGlyph + ?Sized>(
    measure: &M,
    text: &str,
    pic_dim: u32,
    fit_ratio: f32,
    strategy: FitStrategy,
) -> GlyphsetResult<f32> {
    let target = fit_ratio * pic_dim as f32;
    let mut size = pic_dim as f32;
    for step in 0..MAX_AUTO_FIT_STEPS {
        let bounds = measure.measure(text, size)?.ok_or_else(|| {
            GlyphsetError::geometry(format!("text '{text}' has no ink at size {size}"))
        })?;
        if bounds.width() >= target || bounds.height() >= target {
            let chosen = match strategy {
                FitStrategy::Overshoot => size,
                // The initial size already crossing leaves nothing smaller
                // to fall back to.
                FitStrategy::LargestThatFits if step == 0 => size,
                FitStrategy::LargestThatFits => size - 1.0,
            };
            return Ok(chosen);
        }
        size += 1.0;
    }
    Err(GlyphsetError::geometry(format!(
        "auto-fit for '{text}' never reached {fit_ratio} of {pic_dim}px within {MAX_AUTO_FIT_STEPS} steps"
    )))
}

/// Rasterize one glyph spec into a transparent square canvas.
///
/// The ink box is re-measured at the final font size and translated so its
/// center aligns with the canvas center, compensating the box's own origin
/// offset.
#[tracing::instrument(skip(font))]
pub fn rasterize_glyph<F: DrawGlyph + ?Sized>(
    font: &F,
    spec: &GlyphSpec,
) -> GlyphsetResult<RgbaImage> {
    spec.validate()?;

    let size = if spec.auto_fit {
        auto_fit_size(
            font,
            &spec.text,
            spec.pic_dim,
            spec.fit_ratio,
            spec.fit_strategy,
        )?
    } else {
        spec.pic_dim as f32
    };

    let bounds = font.measure(&spec.text, size)?.ok_or_else(|| {
        GlyphsetError::geometry(format!("text '{}' has no ink at size {size}", spec.text))
    })?;

    let origin_x = (spec.pic_dim as f32 - bounds.width()) / 2.0 - bounds.min_x;
    let origin_y = (spec.pic_dim as f32 - bounds.height()) / 2.0 - bounds.min_y;

    let mut canvas = transparent_canvas(spec.pic_dim);
    font.blit_line(&mut canvas, &spec.text, size, (origin_x, origin_y))?;

    if spec.debug_box {
        let rect = Rect::at(
            (bounds.min_x + origin_x).round() as i32,
            (bounds.min_y + origin_y).round() as i32,
        )
        .of_size(
            (bounds.width().ceil() as u32).max(1),
            (bounds.height().ceil() as u32).max(1),
        );
        draw_hollow_rect_mut(&mut canvas, rect, DEBUG_BOX_COLOR);
    }

    tracing::debug!(text = %spec.text, size, "rasterized glyph");
    Ok(canvas)
}

/// Rasterize a glyph spec and persist it as a PNG at `output_path`.
///
/// IO failures are fatal and carry the offending path; nothing is retried.
pub fn render_glyph<F: DrawGlyph + ?Sized>(
    font: &F,
    spec: &GlyphSpec,
    output_path: &Path,
) -> GlyphsetResult<()> {
    let canvas = rasterize_glyph(font, spec)?;
    canvas
        .save_with_format(output_path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", output_path.display()))
        .map_err(GlyphsetError::from)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/glyph.rs"]
mod tests;
