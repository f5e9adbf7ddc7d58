use super::*;
use image::Rgba;

use crate::foundation::error::GlyphsetError;

fn stamp(side: u32, marks: &[(u32, u32, u8)]) -> RgbaImage {
    let mut img = transparent_canvas(side);
    for &(x, y, a) in marks {
        img.put_pixel(x, y, Rgba([0, 0, 0, a]));
    }
    img
}

fn identity_sweep() -> SweepParams {
    SweepParams {
        scale_factors: vec![1.0],
        translation_offsets_px: vec![0],
        rotation_degrees: vec![0.0],
    }
}

#[test]
fn identity_tuple_reproduces_base_modulo_flip() {
    let side = 8u32;
    let base = stamp(side, &[(1, 2, 200), (6, 5, 90)]);

    let out = expand(&[base.clone()], &identity_sweep(), OutputMode::Array).unwrap();
    let Dataset::NumericSlab(slab) = out else {
        panic!("expected numeric slab");
    };
    assert_eq!(slab.shape(), &[1, 8, 8]);

    for row in 0..side {
        for col in 0..side {
            let expected = f32::from(base.get_pixel(col, side - 1 - row).0[3]) / 255.0;
            assert_eq!(slab[[0, row as usize, col as usize]], expected);
        }
    }
}

#[test]
fn identity_tuple_in_image_mode_is_the_opacity_channel() {
    let base = stamp(8, &[(3, 4, 128)]);
    let out = expand(&[base.clone()], &identity_sweep(), OutputMode::Image).unwrap();
    let Dataset::ImageList(imgs) = out else {
        panic!("expected image list");
    };
    assert_eq!(imgs.len(), 1);
    assert_eq!(imgs[0], opacity_channel(&base));
}

#[test]
fn full_side_translation_wraps_to_identity() {
    let side = 8u32;
    let base = stamp(side, &[(1, 2, 255), (5, 6, 40)]);
    let sweep = SweepParams {
        scale_factors: vec![1.0],
        translation_offsets_px: vec![side as i32],
        rotation_degrees: vec![0.0],
    };

    let out = expand(&[base.clone()], &sweep, OutputMode::Image).unwrap();
    let Dataset::ImageList(imgs) = out else {
        panic!("expected image list");
    };
    assert_eq!(imgs[0], opacity_channel(&base));
}

#[test]
fn translation_is_cyclic_not_clipping() {
    let base = stamp(8, &[(1, 1, 255)]);
    let sweep = SweepParams {
        scale_factors: vec![1.0],
        translation_offsets_px: vec![3],
        rotation_degrees: vec![0.0],
    };

    let out = expand(&[base], &sweep, OutputMode::Image).unwrap();
    let Dataset::ImageList(imgs) = out else {
        panic!("expected image list");
    };
    assert_eq!(imgs[0].get_pixel(4, 4).0[0], 255);
    assert_eq!(imgs[0].get_pixel(1, 1).0[0], 0);

    // A shift that pushes the mark off the left edge re-enters on the right.
    let base = stamp(8, &[(1, 1, 255)]);
    let wrapped = offset_wrap(&base, -3, 0);
    assert_eq!(wrapped.get_pixel(6, 1).0[3], 255);
}

#[test]
fn scaling_shrinks_in_place_with_transparent_border() {
    let side = 8u32;
    let base = RgbaImage::from_pixel(side, side, Rgba([0, 0, 0, 255]));
    let sweep = SweepParams {
        scale_factors: vec![0.5],
        translation_offsets_px: vec![0],
        rotation_degrees: vec![0.0],
    };

    let out = expand(&[base], &sweep, OutputMode::Image).unwrap();
    let Dataset::ImageList(imgs) = out else {
        panic!("expected image list");
    };
    // new_side = floor(8 * 0.5) = 4, border 2: content sits in [2, 6).
    assert_eq!(imgs[0].dimensions(), (8, 8));
    assert_eq!(imgs[0].get_pixel(0, 0).0[0], 0);
    assert_eq!(imgs[0].get_pixel(7, 7).0[0], 0);
    assert_eq!(imgs[0].get_pixel(3, 3).0[0], 255);
}

#[test]
fn output_follows_base_outer_then_sweep_order() {
    let base_a = stamp(8, &[(0, 0, 100)]);
    let base_b = stamp(8, &[(0, 0, 220)]);
    let sweep = SweepParams {
        scale_factors: vec![1.0],
        translation_offsets_px: vec![0, 2],
        rotation_degrees: vec![0.0],
    };

    let out = expand(&[base_a, base_b], &sweep, OutputMode::Image).unwrap();
    let Dataset::ImageList(imgs) = out else {
        panic!("expected image list");
    };
    assert_eq!(imgs.len(), 8);

    // First base's variants come first, offsets enumerated (0,0) (0,2) (2,0) (2,2).
    assert_eq!(imgs[0].get_pixel(0, 0).0[0], 100);
    assert_eq!(imgs[1].get_pixel(0, 2).0[0], 100);
    assert_eq!(imgs[2].get_pixel(2, 0).0[0], 100);
    assert_eq!(imgs[3].get_pixel(2, 2).0[0], 100);
    assert_eq!(imgs[4].get_pixel(0, 0).0[0], 220);
}

#[test]
fn dataset_order_matches_parameter_enumeration() {
    let base = stamp(8, &[(0, 0, 255)]);
    let sweep = SweepParams {
        scale_factors: vec![1.0],
        translation_offsets_px: vec![0, 1, 3],
        rotation_degrees: vec![0.0],
    };

    let out = expand(&[base], &sweep, OutputMode::Image).unwrap();
    let Dataset::ImageList(imgs) = out else {
        panic!("expected image list");
    };

    // The mark at (0, 0) must land exactly where the i-th parameter tuple
    // says it shifted to.
    let params: Vec<_> = sweep.enumerate().collect();
    assert_eq!(imgs.len(), params.len());
    for (img, v) in imgs.iter().zip(&params) {
        assert_eq!(img.get_pixel(v.offset_x as u32, v.offset_y as u32).0[0], 255);
    }
}

#[test]
fn rotation_exposes_transparent_corners_only() {
    let side = 16u32;
    let base = RgbaImage::from_pixel(side, side, Rgba([0, 0, 0, 255]));
    let rotated = rotate_canvas(&base, 6.0);
    assert_eq!(rotated.dimensions(), (side, side));
    // Corners swing outside the canvas; the center never moves.
    assert_eq!(rotated.get_pixel(0, 0).0[3], 0);
    assert_eq!(rotated.get_pixel(8, 8).0[3], 255);
}

#[test]
fn default_sweep_produces_the_full_product() {
    let base = stamp(16, &[(4, 4, 255)]);
    let sweep = SweepParams {
        scale_factors: vec![1.0, 0.87],
        translation_offsets_px: vec![-1, 0, 1],
        rotation_degrees: vec![-2.0, 0.0, 2.0],
    };
    let out = expand(&[base.clone(), base], &sweep, OutputMode::Array).unwrap();
    // 2 bases * 3 rotations * 2 scales * 3^2 translations
    assert_eq!(out.len(), 108);
    let Dataset::NumericSlab(slab) = out else {
        panic!("expected numeric slab");
    };
    assert_eq!(slab.shape(), &[108, 16, 16]);
}

#[test]
fn empty_input_is_a_validation_error() {
    let err = expand(&[], &identity_sweep(), OutputMode::Array).unwrap_err();
    assert!(matches!(err, GlyphsetError::Validation(_)));
}

#[test]
fn mismatched_base_sizes_fail_before_any_transform() {
    let bases = vec![stamp(8, &[]), stamp(16, &[])];
    let err = expand(&bases, &identity_sweep(), OutputMode::Array).unwrap_err();
    assert!(matches!(err, GlyphsetError::Validation(_)));
}

#[test]
fn non_square_base_is_a_validation_error() {
    let bases = vec![RgbaImage::new(8, 6)];
    let err = expand(&bases, &identity_sweep(), OutputMode::Image).unwrap_err();
    assert!(matches!(err, GlyphsetError::Validation(_)));
}

#[test]
fn invalid_sweep_is_a_configuration_error() {
    let base = stamp(8, &[]);
    let sweep = SweepParams {
        scale_factors: vec![],
        translation_offsets_px: vec![0],
        rotation_degrees: vec![0.0],
    };
    let err = expand(&[base], &sweep, OutputMode::Array).unwrap_err();
    assert!(matches!(err, GlyphsetError::Config(_)));
}
