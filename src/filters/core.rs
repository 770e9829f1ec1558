//! Core utilities shared by the pipeline filters.
//!
//! This module provides:
//! - Gaussian kernel generation from a blur radius
//! - Border-ring helpers for fixed-size neighbourhood filters

/// Standard deviation per unit of blur radius.
///
/// A radius then spans three standard deviations, so the truncated kernel
/// still holds ~99.7% of the Gaussian's mass.
pub const SIGMA_PER_RADIUS: f32 = 1.0 / 3.0;

/// Square 2D Gaussian kernel stored as a flat row-major buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    size: usize,
    weights: Vec<f32>,
}

impl GaussianKernel {
    /// Build a normalized kernel for `radius`.
    ///
    /// Size is `2 * ceil(radius) + 1` and `sigma = radius * SIGMA_PER_RADIUS`.
    /// Each weight is `exp(-(dx² + dy²) / 2σ²) / (2πσ²)`; the normalization
    /// constant cancels when the weights are rescaled to sum to 1, so it is
    /// folded into that step. Non-positive or non-finite radii yield the
    /// 1×1 identity kernel.
    pub fn from_radius(radius: f32) -> Self {
        if !radius.is_finite() || radius <= 0.0 {
            return Self::identity();
        }

        let half = radius.ceil() as usize;
        let size = 2 * half + 1;
        let sigma = f64::from(radius * SIGMA_PER_RADIUS);
        // Very small radii underflow sigma²; the center then takes all weight
        let two_sigma_sq = (2.0 * sigma * sigma).max(f64::MIN_POSITIVE);

        let raw: Vec<f64> = (0..size * size)
            .map(|i| {
                let dy = (i / size) as f64 - half as f64;
                let dx = (i % size) as f64 - half as f64;
                (-(dx * dx + dy * dy) / two_sigma_sq).exp()
            })
            .collect();

        // Center weight is exp(0) = 1, so the sum is never zero
        let sum: f64 = raw.iter().sum();
        let weights = raw.iter().map(|w| (w / sum) as f32).collect();

        Self { size, weights }
    }

    /// The 1×1 kernel that leaves a field unchanged.
    pub fn identity() -> Self {
        Self {
            size: 1,
            weights: vec![1.0],
        }
    }

    /// Side length (always odd).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center tap to the kernel edge.
    #[inline]
    pub fn half(&self) -> usize {
        self.size / 2
    }

    /// Weights in row-major order, `size * size` entries.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weight at row `ky`, column `kx`.
    #[inline]
    pub fn weight(&self, kx: usize, ky: usize) -> f32 {
        self.weights[ky * self.size + kx]
    }
}
