//! Sobel gradient estimation.
//!
//! Produces per-pixel gradient magnitude and direction (degrees) from a
//! blurred luminance field. The outermost 1-pixel ring has no full 3×3
//! neighbourhood and is left at magnitude 0, angle 0.

use ndarray::{Array2, ArrayView2, Axis};
use rayon::prelude::*;

type Kernel3 = [[i32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Upper bound on the Sobel magnitude of an 8-bit field, `4 * 255 * sqrt(2)`.
///
/// A threshold at or above this value never marks an edge.
pub const MAX_GRADIENT_MAGNITUDE: f32 = 1442.5;

/// Per-pixel gradient magnitude and direction.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientField {
    /// Euclidean magnitude `sqrt(sx² + sy²)`, 0 on the border
    pub magnitude: Array2<f32>,
    /// `atan2(sy, sx)` in degrees, range (-180, 180], 0 on the border
    pub angle: Array2<f32>,
}

impl GradientField {
    /// Zero-filled field of the given size.
    pub fn zeros(height: usize, width: usize) -> Self {
        Self {
            magnitude: Array2::zeros((height, width)),
            angle: Array2::zeros((height, width)),
        }
    }

    /// (height, width)
    pub fn dim(&self) -> (usize, usize) {
        self.magnitude.dim()
    }
}

/// Compute Sobel gradients on a blurred luminance field.
///
/// # Arguments
/// * `blurred` - Single-channel field (height, width), values 0-255
///
/// # Returns
/// Gradient magnitude and angle for every interior pixel
pub fn sobel_gradient(blurred: ArrayView2<u8>) -> GradientField {
    let (height, width) = blurred.dim();
    let mut field = GradientField::zeros(height, width);

    if width < 3 || height < 3 {
        return field;
    }

    let GradientField { magnitude, angle } = &mut field;
    magnitude
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(angle.axis_iter_mut(Axis(0)).into_par_iter())
        .enumerate()
        .skip(1)
        .take(height - 2)
        .for_each(|(y, (mut mag_row, mut ang_row))| {
            for x in 1..width - 1 {
                let mut sx = 0i32;
                let mut sy = 0i32;
                for ky in 0..3 {
                    for kx in 0..3 {
                        let v = blurred[[y + ky - 1, x + kx - 1]] as i32;
                        sx += v * SOBEL_KERNEL_X[ky][kx];
                        sy += v * SOBEL_KERNEL_Y[ky][kx];
                    }
                }

                let (fx, fy) = (sx as f32, sy as f32);
                mag_row[x] = (fx * fx + fy * fy).sqrt();
                ang_row[x] = gradient_angle(fx, fy);
            }
        });

    field
}

/// Gradient direction in degrees, folded into (-180, 180].
#[inline]
pub fn gradient_angle(sx: f32, sy: f32) -> f32 {
    let degrees = sy.atan2(sx).to_degrees();
    // f32 rounding can land a hair outside ±180
    if degrees <= -180.0 {
        180.0
    } else {
        degrees.min(180.0)
    }
}
