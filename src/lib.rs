//! Glyphset generates synthetic labeled image datasets for glyph-recognition
//! training.
//!
//! The crate turns scalable fonts into fixed-size transparent canvases and
//! multiplies them into training-scale variant sets.
//!
//! # Pipeline overview
//!
//! 1. **Rasterize**: `LoadedFont + GlyphSpec -> RgbaImage` — one centered,
//!    auto-fitted glyph per (font, text) pair ([`rasterize_glyph`]).
//! 2. **Expand**: `Vec<RgbaImage> + SweepParams -> Dataset` — the full
//!    Cartesian product of rotation/scale/translation variants, as a numeric
//!    slab or an image list ([`expand`]).
//! 3. **Drive** (optional): [`generate_corpus`] walks a fonts directory and
//!    writes one PNG per (font, digit) pair.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: expansion is pure and stable for a given
//!   input; there is no randomness anywhere in the pipeline.
//! - **IO at the edges only**: fonts are loaded up front and PNGs written at
//!   the end; measurement and transformation stages are IO-free.
//! - **Opacity carries the signal**: color channels are fixed; only the alpha
//!   channel distinguishes ink from background.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod augment;
mod corpus;
mod foundation;
mod raster;

pub use augment::expand::{Dataset, OutputMode, expand};
pub use augment::sweep::{
    DEFAULT_ROTATION_RANGE_DEGREES, DEFAULT_SCALE_FACTORS, DEFAULT_TRANSLATION_PERCENTS,
    SweepParams, VariantParams,
};
pub use corpus::driver::{CorpusConfig, CorpusSummary, digit_texts, generate_corpus};
pub use foundation::core::{CANVAS_CLEAR, GLYPH_INK, square_side, transparent_canvas};
pub use foundation::error::{GlyphsetError, GlyphsetResult};
pub use raster::font::{DrawGlyph, InkBounds, LoadedFont, MeasureGlyph};
pub use raster::glyph::{
    DEFAULT_FIT_RATIO, DEFAULT_PIC_DIM, FitStrategy, GlyphSpec, auto_fit_size, rasterize_glyph,
    render_glyph,
};
