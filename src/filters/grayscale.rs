//! Luminance conversion for the edge pipeline.
//!
//! Uses ITU-R BT.709 luminosity coefficients. Only the RGB channels of the
//! RGBA raster contribute; alpha is ignored.
//!
//! ## Precision
//!
//! - **u8**: truncated and clamped to 0-255, feeds the blur/gradient stages
//! - **f32**: unrounded luminance, used by the neighbour-difference preview

use ndarray::{Array2, ArrayView3, Axis};
use rayon::prelude::*;

/// ITU-R BT.709 luminosity coefficients
pub const LUMA_R: f32 = 0.2126;
pub const LUMA_G: f32 = 0.7152;
pub const LUMA_B: f32 = 0.0722;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> f32 {
    LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32
}

// ============================================================================
// 8-bit (u8) Implementation
// ============================================================================

/// Convert an RGBA u8 raster to a single-channel luminance field.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, 4) with RGBA u8 values
///
/// # Returns
/// Luminance field of shape (height, width), values 0-255
pub fn luminance_u8(input: ArrayView3<u8>) -> Array2<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array2::<u8>::zeros((height, width));

    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                let gray = luma(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
                // Float-to-int `as` truncates and saturates
                row[x] = gray.clamp(0.0, 255.0) as u8;
            }
        });

    output
}

// ============================================================================
// Float (f32) Implementation
// ============================================================================

/// Convert an RGBA u8 raster to unrounded f32 luminance (0.0-255.0).
pub fn luminance_f32(input: ArrayView3<u8>) -> Array2<f32> {
    let (height, width, _) = input.dim();
    Array2::from_shape_fn((height, width), |(y, x)| {
        luma(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]])
    })
}
