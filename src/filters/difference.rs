//! Quick neighbour-difference edge detector.
//!
//! A pixel is an edge when its luminance differs from the pixel to its right,
//! or else from the pixel below it, by more than the threshold. There is no
//! smoothing or thinning, which makes it a cheap preview of the full pipeline.

use ndarray::{Array2, ArrayView2, Axis};
use rayon::prelude::*;

use super::binarize::{EdgeBitmap, BACKGROUND, EDGE};

/// Mark pixels whose right or bottom neighbour differs by more than `threshold`.
///
/// # Arguments
/// * `gray` - Unrounded luminance field (height, width), values 0.0-255.0
/// * `threshold` - Absolute luminance difference that counts as an edge
///
/// # Returns
/// Edge bitmap with the outer 1-pixel ring forced to background
pub fn neighbor_difference_edges(gray: ArrayView2<f32>, threshold: f32) -> EdgeBitmap {
    let (height, width) = gray.dim();
    let mut pixels = Array2::<u8>::from_elem((height, width), BACKGROUND);

    pixels
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                let here = gray[[y, x]];
                let right = x + 1 < width && (here - gray[[y, x + 1]]).abs() > threshold;
                let below = y + 1 < height && (here - gray[[y + 1, x]]).abs() > threshold;
                if right || below {
                    row[x] = EDGE;
                }
            }
        });

    EdgeBitmap::from_pixels(pixels)
}
