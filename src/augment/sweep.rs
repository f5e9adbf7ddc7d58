use crate::foundation::error::{GlyphsetError, GlyphsetResult};

/// Default multiplicative scale factors applied to each base canvas.
pub const DEFAULT_SCALE_FACTORS: [f64; 6] = [0.87, 0.90, 0.93, 0.96, 0.97, 1.0];

/// Default translation sweep expressed as percentages of the canvas side.
pub const DEFAULT_TRANSLATION_PERCENTS: [i32; 5] = [-4, -2, 0, 2, 4];

/// Default rotation sweep half-range; angles run `-N..=N` in whole degrees.
pub const DEFAULT_ROTATION_RANGE_DEGREES: i32 = 6;

/// Sweep ranges combined via Cartesian product to generate variants.
///
/// All three sequences are finite and ordered; translation is applied
/// independently in X and Y, so it contributes its length squared to the
/// variant count.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SweepParams {
    /// Multiplicative canvas scale factors.
    pub scale_factors: Vec<f64>,
    /// Cyclic pixel offsets applied per axis.
    pub translation_offsets_px: Vec<i32>,
    /// Rotation angles in degrees; positive rotates clockwise (y-down).
    pub rotation_degrees: Vec<f64>,
}

/// One augmentation parameter tuple applied to one base canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariantParams {
    /// Rotation angle in degrees.
    pub rotation_degrees: f64,
    /// Canvas scale factor.
    pub scale_factor: f64,
    /// Cyclic shift along X in pixels.
    pub offset_x: i32,
    /// Cyclic shift along Y in pixels.
    pub offset_y: i32,
}

impl SweepParams {
    /// Default sweep for a canvas of side `canvas_side`.
    ///
    /// Translation percentages are converted to whole pixels here, rounded to
    /// nearest, so the same percent sweep adapts to any canvas size.
    pub fn defaults_for(canvas_side: u32) -> Self {
        let translation_offsets_px = DEFAULT_TRANSLATION_PERCENTS
            .iter()
            .map(|&p| ((f64::from(canvas_side) * f64::from(p)) / 100.0).round() as i32)
            .collect();
        let rotation_degrees = (-DEFAULT_ROTATION_RANGE_DEGREES..=DEFAULT_ROTATION_RANGE_DEGREES)
            .map(f64::from)
            .collect();
        Self {
            scale_factors: DEFAULT_SCALE_FACTORS.to_vec(),
            translation_offsets_px,
            rotation_degrees,
        }
    }

    /// Validate sweep sequences before expansion.
    pub fn validate(&self) -> GlyphsetResult<()> {
        if self.scale_factors.is_empty() {
            return Err(GlyphsetError::config("scale_factors must be non-empty"));
        }
        if self.translation_offsets_px.is_empty() {
            return Err(GlyphsetError::config(
                "translation_offsets_px must be non-empty",
            ));
        }
        if self.rotation_degrees.is_empty() {
            return Err(GlyphsetError::config("rotation_degrees must be non-empty"));
        }
        for &s in &self.scale_factors {
            if !s.is_finite() || s <= 0.0 {
                return Err(GlyphsetError::config(format!(
                    "scale factors must be finite and > 0, got {s}"
                )));
            }
        }
        for &r in &self.rotation_degrees {
            if !r.is_finite() {
                return Err(GlyphsetError::config(format!(
                    "rotation angles must be finite, got {r}"
                )));
            }
        }
        Ok(())
    }

    /// Number of variants each base canvas expands into.
    pub fn variants_per_base(&self) -> usize {
        self.rotation_degrees.len()
            * self.scale_factors.len()
            * self.translation_offsets_px.len()
            * self.translation_offsets_px.len()
    }

    /// Total dataset size for `base_count` base canvases.
    pub fn total_variants(&self, base_count: usize) -> usize {
        base_count * self.variants_per_base()
    }

    /// Enumerate parameter tuples in the fixed dataset order:
    /// rotation, then scale, then X offset, then Y offset.
    ///
    /// The order is what makes a variant index traceable back to its
    /// parameters.
    pub fn enumerate(&self) -> impl Iterator<Item = VariantParams> + '_ {
        self.rotation_degrees
            .iter()
            .copied()
            .flat_map(move |rot| self.enumerate_for_rotation(rot))
    }

    /// The slice of [`Self::enumerate`] for one rotation angle: scale, then
    /// X offset, then Y offset.
    ///
    /// Expansion iterates this per rotation group; [`Self::enumerate`]
    /// composes the same slices, so the two orders cannot drift apart.
    pub fn enumerate_for_rotation(
        &self,
        rotation_degrees: f64,
    ) -> impl Iterator<Item = VariantParams> + '_ {
        self.scale_factors.iter().copied().flat_map(move |scale| {
            self.translation_offsets_px
                .iter()
                .copied()
                .flat_map(move |dx| {
                    self.translation_offsets_px
                        .iter()
                        .copied()
                        .map(move |dy| VariantParams {
                            rotation_degrees,
                            scale_factor: scale,
                            offset_x: dx,
                            offset_y: dy,
                        })
                })
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/augment/sweep.rs"]
mod tests;
