//! Non-maximum suppression on gradient magnitude with direction alignment.
//!
//! Canny-style thinning: each interior pixel is compared against its two
//! neighbours along the gradient direction, quantized to 0°, 45°, 90° or
//! 135°, and kept only if it is not smaller than either of them. Plateaus
//! survive.
//!
//! Neighbour magnitudes are always read from the unsuppressed
//! [`GradientField`], so every pixel's decision is independent and rows are
//! processed in parallel. The outermost 1-pixel frame is skipped to avoid
//! out-of-bounds neighbour lookups.
//!
//! Angles come from `atan2(sy, sx)` on a field whose y axis points down, so
//! 45° points toward `(x+1, y+1)` and 135° toward `(x-1, y+1)`.

use ndarray::{Array2, Axis};
use rayon::prelude::*;

use super::edge::GradientField;

/// Gradient direction quantized to the four comparison axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// 0° / 180°: compare left and right
    Horizontal,
    /// 45°: compare `(x+1, y+1)` and `(x-1, y-1)`
    Diagonal45,
    /// 90°: compare up and down
    Vertical,
    /// 135°: compare `(x-1, y+1)` and `(x+1, y-1)`
    Diagonal135,
}

impl Direction {
    /// Pixel offsets `(dx, dy)` of the two neighbours along this direction.
    #[inline]
    pub fn offsets(self) -> [(isize, isize); 2] {
        match self {
            Direction::Horizontal => [(-1, 0), (1, 0)],
            Direction::Diagonal45 => [(1, 1), (-1, -1)],
            Direction::Vertical => [(0, -1), (0, 1)],
            Direction::Diagonal135 => [(-1, 1), (1, -1)],
        }
    }
}

/// Quantize a gradient angle in degrees to the nearest of 0°, 45°, 90°, 135°.
///
/// Negative angles are folded into [0°, 180°] first; 180° is the same axis
/// as 0°.
pub fn quantize_direction(angle_deg: f32) -> Direction {
    let folded = if angle_deg < 0.0 { angle_deg + 180.0 } else { angle_deg };
    // f32 `round` sends halves away from zero: 22.5° -> 45°
    match ((folded / 45.0).round() as i32).rem_euclid(4) {
        0 => Direction::Horizontal,
        1 => Direction::Diagonal45,
        2 => Direction::Vertical,
        _ => Direction::Diagonal135,
    }
}

/// Thin the gradient magnitude to one-pixel-wide ridges.
///
/// # Arguments
/// * `gradient` - Sobel magnitude and angle field
///
/// # Returns
/// Magnitude field where every pixel that is not a local maximum along its
/// quantized gradient direction is 0
pub fn non_maximum_suppression(gradient: &GradientField) -> Array2<f32> {
    let (height, width) = gradient.dim();
    let mut thinned = Array2::<f32>::zeros((height, width));

    if width < 3 || height < 3 {
        return thinned;
    }

    let magnitude = &gradient.magnitude;
    let angle = &gradient.angle;

    thinned
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .skip(1)
        .take(height - 2)
        .for_each(|(y, mut row)| {
            for x in 1..width - 1 {
                let mag = magnitude[[y, x]];
                if mag <= 0.0 {
                    continue;
                }

                let [(dx1, dy1), (dx2, dy2)] = quantize_direction(angle[[y, x]]).offsets();
                let neighbor1 = magnitude[[
                    (y as isize + dy1) as usize,
                    (x as isize + dx1) as usize,
                ]];
                let neighbor2 = magnitude[[
                    (y as isize + dy2) as usize,
                    (x as isize + dx2) as usize,
                ]];

                if mag >= neighbor1 && mag >= neighbor2 {
                    row[x] = mag;
                }
            }
        });

    thinned
}
