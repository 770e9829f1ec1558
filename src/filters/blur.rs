//! Gaussian smoothing of a luminance field.
//!
//! Uses a full 2D kernel (see [`GaussianKernel`]). Pixels closer than the
//! kernel half-width to any image edge are not convolved and stay at 0;
//! the binarizer forces the outermost ring white regardless.

use ndarray::{Array2, ArrayView2, Axis};
use rayon::prelude::*;

use super::core::GaussianKernel;

/// Apply Gaussian blur to a grayscale field.
///
/// # Arguments
/// * `gray` - Luminance field (height, width)
/// * `blur_radius` - Kernel radius in pixels; `sigma = radius / 3`
///
/// # Returns
/// Blurred field with same dimensions. A non-positive or non-finite radius
/// returns an exact copy.
pub fn gaussian_blur_gray(gray: ArrayView2<u8>, blur_radius: f32) -> Array2<u8> {
    let (height, width) = gray.dim();

    if !blur_radius.is_finite() || blur_radius <= 0.0 {
        // No blur, return copy
        return gray.to_owned();
    }

    // Kernel wider than the image: no pixel can be convolved
    let span = 2.0 * blur_radius.ceil() + 1.0;
    if span > width as f32 || span > height as f32 {
        return Array2::<u8>::zeros((height, width));
    }

    let kernel = GaussianKernel::from_radius(blur_radius);
    convolve_interior(gray, &kernel)
}

/// Convolve `gray` with `kernel`, leaving a `kernel.half()` wide border at 0.
pub fn convolve_interior(gray: ArrayView2<u8>, kernel: &GaussianKernel) -> Array2<u8> {
    let (height, width) = gray.dim();
    let size = kernel.size();
    let half = kernel.half();
    let mut output = Array2::<u8>::zeros((height, width));

    if width <= 2 * half || height <= 2 * half {
        return output;
    }

    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .skip(half)
        .take(height - 2 * half)
        .for_each(|(y, mut row)| {
            for x in half..width - half {
                let mut sum = 0.0f32;
                for ky in 0..size {
                    let sy = y + ky - half;
                    for kx in 0..size {
                        let sx = x + kx - half;
                        sum += gray[[sy, sx]] as f32 * kernel.weight(kx, ky);
                    }
                }
                row[x] = sum.round().clamp(0.0, 255.0) as u8;
            }
        });

    output
}
