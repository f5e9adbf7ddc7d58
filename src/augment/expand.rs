use image::{GrayImage, Luma, RgbaImage, imageops};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};
use ndarray::Array3;
use rayon::prelude::*;

use crate::{
    augment::sweep::SweepParams,
    foundation::core::{CANVAS_CLEAR, square_side, transparent_canvas},
    foundation::error::{GlyphsetError, GlyphsetResult},
};

/// Which [`Dataset`] arm [`expand`] materializes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Pre-allocated 3-D `f32` array of normalized opacity slabs.
    Array,
    /// One single-channel opacity image per variant.
    Image,
}

/// The expanded dataset, in fixed enumeration order in both arms:
/// base canvas outer, then rotation, then scale, then X offset, then Y offset.
#[derive(Clone, Debug, PartialEq)]
pub enum Dataset {
    /// Opacity normalized to `[0, 1]`, indexed `[variant, row, col]`.
    ///
    /// Row order is flipped relative to image space (row 0 is the bottom
    /// image row), matching the array convention of the training pipeline
    /// this feeds. Consumers with a different row convention should flip
    /// back rather than assume.
    NumericSlab(Array3<f32>),
    /// Opacity channel of each variant as a standalone grayscale image.
    ImageList(Vec<GrayImage>),
}

impl Dataset {
    /// Number of variants held.
    pub fn len(&self) -> usize {
        match self {
            Dataset::NumericSlab(slab) => slab.shape()[0],
            Dataset::ImageList(imgs) => imgs.len(),
        }
    }

    /// True when no variants are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Expand base canvases into the full Cartesian-product set of augmented
/// variants.
///
/// Pure and deterministic: the same inputs always produce the same output
/// sequence. Every base canvas must be square with the same side length; the
/// per-variant pipeline is rotate (bilinear), rescale about the center, then
/// cyclic translation. The (base, rotation) groups are independent and run in
/// parallel, with output order restored on collection.
#[tracing::instrument(skip(base_images, sweep))]
pub fn expand(
    base_images: &[RgbaImage],
    sweep: &SweepParams,
    mode: OutputMode,
) -> GlyphsetResult<Dataset> {
    if base_images.is_empty() {
        return Err(GlyphsetError::validation(
            "base image sequence must be non-empty",
        ));
    }
    sweep.validate()?;

    let side = square_side(&base_images[0])?;
    for (idx, img) in base_images.iter().enumerate() {
        let s = square_side(img)?;
        if s != side {
            return Err(GlyphsetError::validation(format!(
                "base image {idx} is {s}x{s}, expected {side}x{side}"
            )));
        }
    }

    let total = sweep.total_variants(base_images.len());
    tracing::debug!(total, side, "expanding augmentation sweep");

    let mut groups = Vec::with_capacity(base_images.len() * sweep.rotation_degrees.len());
    for img in base_images {
        for &rot in &sweep.rotation_degrees {
            groups.push((img, rot));
        }
    }

    let variant_groups = groups
        .par_iter()
        .map(|&(img, rot)| expand_rotation_group(img, rot, side, sweep))
        .collect::<GlyphsetResult<Vec<_>>>()?;
    let variants: Vec<GrayImage> = variant_groups.into_iter().flatten().collect();
    debug_assert_eq!(variants.len(), total);

    match mode {
        OutputMode::Image => Ok(Dataset::ImageList(variants)),
        OutputMode::Array => {
            let mut slab = Array3::<f32>::zeros((total, side as usize, side as usize));
            for (idx, gray) in variants.iter().enumerate() {
                write_flipped_normalized(&mut slab, idx, gray);
            }
            Ok(Dataset::NumericSlab(slab))
        }
    }
}

/// All scale/offset variants of one base canvas at one rotation angle, in the
/// order [`SweepParams::enumerate_for_rotation`] yields them.
/// Rotation is hoisted out because it dominates the per-variant cost; the
/// rescale is cached across consecutive tuples sharing a scale factor.
fn expand_rotation_group(
    base: &RgbaImage,
    rotation_degrees: f64,
    side: u32,
    sweep: &SweepParams,
) -> GlyphsetResult<Vec<GrayImage>> {
    let rotated = rotate_canvas(base, rotation_degrees);
    let offsets_sq = sweep.translation_offsets_px.len() * sweep.translation_offsets_px.len();
    let mut out = Vec::with_capacity(sweep.scale_factors.len() * offsets_sq);
    let mut scaled: Option<(f64, RgbaImage)> = None;
    for v in sweep.enumerate_for_rotation(rotation_degrees) {
        if !matches!(&scaled, Some((s, _)) if *s == v.scale_factor) {
            scaled = Some((
                v.scale_factor,
                rescale_centered(&rotated, side, v.scale_factor)?,
            ));
        }
        if let Some((_, img)) = &scaled {
            out.push(opacity_channel(&offset_wrap(img, v.offset_x, v.offset_y)));
        }
    }
    Ok(out)
}

/// Rotate about the canvas center with bilinear resampling; corners exposed
/// by the rotation become transparent.
fn rotate_canvas(img: &RgbaImage, degrees: f64) -> RgbaImage {
    if degrees == 0.0 {
        return img.clone();
    }
    rotate_about_center(
        img,
        degrees.to_radians() as f32,
        Interpolation::Bilinear,
        CANVAS_CLEAR,
    )
}

/// Shrink or grow the content about the canvas center, keeping the canvas
/// side fixed.
///
/// The scaled side is floored to the nearest even integer so the transparent
/// border splits evenly; scale 1.0 on an even side is a no-op.
fn rescale_centered(img: &RgbaImage, side: u32, scale: f64) -> GlyphsetResult<RgbaImage> {
    let new_side = ((f64::from(side) * scale).floor() as u32) / 2 * 2;
    if new_side == 0 {
        return Err(GlyphsetError::config(format!(
            "scale factor {scale} collapses a {side}px canvas"
        )));
    }
    if new_side == side {
        return Ok(img.clone());
    }
    let resized = imageops::resize(img, new_side, new_side, imageops::FilterType::CatmullRom);
    let mut out = transparent_canvas(side);
    let border = (i64::from(side) - i64::from(new_side)) / 2;
    imageops::overlay(&mut out, &resized, border, border);
    Ok(out)
}

/// Cyclic pixel shift: content exiting one edge re-enters the opposite edge.
/// Never clips; a full-side shift reproduces the input exactly.
fn offset_wrap(img: &RgbaImage, dx: i32, dy: i32) -> RgbaImage {
    let side = i64::from(img.width());
    if i64::from(dx).rem_euclid(side) == 0 && i64::from(dy).rem_euclid(side) == 0 {
        return img.clone();
    }
    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        let sx = (i64::from(x) - i64::from(dx)).rem_euclid(side) as u32;
        let sy = (i64::from(y) - i64::from(dy)).rem_euclid(side) as u32;
        *img.get_pixel(sx, sy)
    })
}

fn opacity_channel(img: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([img.get_pixel(x, y).0[3]])
    })
}

fn write_flipped_normalized(slab: &mut Array3<f32>, idx: usize, gray: &GrayImage) {
    let side = gray.height();
    for row in 0..side {
        let src_row = side - 1 - row;
        for col in 0..gray.width() {
            slab[[idx, row as usize, col as usize]] =
                f32::from(gray.get_pixel(col, src_row).0[0]) / 255.0;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/augment/expand.rs"]
mod tests;
