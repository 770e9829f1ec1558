//! Filter stages of the edge-extraction pipeline.
//!
//! ## Fields
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | grayscale | RGBA raster (H, W, 4) u8 | luminance (H, W) u8 |
//! | blur | luminance (H, W) u8 | blurred luminance (H, W) u8 |
//! | edge | blurred (H, W) u8 | [`GradientField`] magnitude/angle f32 |
//! | nms | [`GradientField`] | thinned magnitude (H, W) f32 |
//! | binarize | thinned (H, W) f32 | [`EdgeBitmap`] |
//!
//! All fields are row-major `ndarray` arrays indexed `[[y, x]]`.
//!
//! ## Architecture
//!
//! - **Pure** - every stage allocates and returns a fresh buffer
//! - **Same dimensions** - no stage changes width or height
//! - **Row-parallel** - stages use rayon across rows; results do not depend
//!   on scheduling

pub mod binarize;
pub mod blur;
pub mod core;
pub mod difference;
pub mod edge;
pub mod grayscale;
pub mod nms;

pub use binarize::{binarize, EdgeBitmap};
pub use blur::gaussian_blur_gray;
pub use self::core::{GaussianKernel, SIGMA_PER_RADIUS};
pub use difference::neighbor_difference_edges;
pub use edge::{sobel_gradient, GradientField, MAX_GRADIENT_MAGNITUDE};
pub use grayscale::{luminance_f32, luminance_u8};
pub use nms::{non_maximum_suppression, quantize_direction, Direction};
