//! Edge-extraction pipeline: luminance → blur → Sobel → NMS → threshold.
//!
//! Every call runs all stages from scratch on freshly allocated buffers.
//! [`PreparedEdges`] keeps the thinned magnitude of one (image, blur radius)
//! pair so that threshold changes only re-run the binarizer.

use std::time::Instant;

use log::{debug, warn};
use ndarray::{Array2, Array3, ArrayView3};
use serde::{Deserialize, Serialize};

use crate::error::{EdgeError, EdgeResult};
use crate::filters::{
    binarize, gaussian_blur_gray, luminance_f32, luminance_u8, neighbor_difference_edges,
    non_maximum_suppression, sobel_gradient, EdgeBitmap, GradientField,
};

/// Decoded RGBA raster, validated against its declared dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineInput {
    raster: Array3<u8>,
}

impl PipelineInput {
    /// Take ownership of `width * height * 4` RGBA bytes.
    ///
    /// # Errors
    ///
    /// [`EdgeError::InvalidDimensions`] for a zero or overflowing size,
    /// [`EdgeError::InvalidInput`] if the buffer length does not match.
    pub fn new(raster: Vec<u8>, width: usize, height: usize) -> EdgeResult<Self> {
        let expected = rgba_len(width, height)?;
        if raster.len() != expected {
            return Err(EdgeError::InvalidInput {
                width,
                height,
                expected,
                actual: raster.len(),
            });
        }
        let raster = Array3::from_shape_vec((height, width, 4), raster)
            .map_err(|_| EdgeError::InvalidDimensions { width, height })?;
        Ok(Self { raster })
    }

    /// Copy a borrowed RGBA buffer.
    pub fn from_slice(raster: &[u8], width: usize, height: usize) -> EdgeResult<Self> {
        Self::new(raster.to_vec(), width, height)
    }

    /// Wrap an array of shape (height, width, 4).
    pub fn from_array(raster: Array3<u8>) -> EdgeResult<Self> {
        let (height, width, channels) = raster.dim();
        rgba_len(width, height)?;
        if channels != 4 {
            return Err(EdgeError::InvalidInput {
                width,
                height,
                expected: width * height * 4,
                actual: raster.len(),
            });
        }
        Ok(Self { raster })
    }

    pub fn width(&self) -> usize {
        self.raster.dim().1
    }

    pub fn height(&self) -> usize {
        self.raster.dim().0
    }

    pub fn raster(&self) -> ArrayView3<'_, u8> {
        self.raster.view()
    }
}

fn rgba_len(width: usize, height: usize) -> EdgeResult<usize> {
    if width == 0 || height == 0 {
        return Err(EdgeError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or(EdgeError::InvalidDimensions { width, height })
}

/// Slider-controlled pipeline parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Gaussian blur radius in pixels (UI range 0.0-5.0)
    pub blur_radius: f32,
    /// Minimum thinned gradient magnitude for an edge (UI range 0-255)
    pub threshold: f32,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            blur_radius: 1.0,
            threshold: 100.0,
        }
    }
}

impl PipelineParams {
    pub fn new(blur_radius: f32, threshold: f32) -> Self {
        Self {
            blur_radius,
            threshold,
        }
    }

    /// Parse parameters from a JSON object; missing fields take defaults.
    pub fn from_json(json: &str) -> EdgeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace negative or non-finite values with 0.
    ///
    /// This is the policy the pipeline applies; values come from bounded
    /// sliders, so anything out of range is treated as "off".
    pub fn sanitized(self) -> Self {
        Self {
            blur_radius: sanitize("blur_radius", self.blur_radius),
            threshold: sanitize("threshold", self.threshold),
        }
    }

    /// Strict check for callers that prefer failing over clamping.
    pub fn validate(&self) -> EdgeResult<()> {
        for (name, value) in [("blur_radius", self.blur_radius), ("threshold", self.threshold)] {
            if !value.is_finite() || value < 0.0 {
                return Err(EdgeError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

fn sanitize(name: &'static str, value: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("{name} = {value} is out of range, using 0");
        0.0
    }
}

/// Every intermediate buffer of one pipeline run.
#[derive(Clone, Debug)]
pub struct EdgeStages {
    pub params: PipelineParams,
    pub gray: Array2<u8>,
    pub blurred: Array2<u8>,
    pub gradient: GradientField,
    pub thinned: Array2<f32>,
    pub edges: EdgeBitmap,
    pub timings: StageTimings,
}

/// Wall-clock time spent in each stage, in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StageTimings {
    pub grayscale_ms: f64,
    pub blur_ms: f64,
    pub gradient_ms: f64,
    pub nms_ms: f64,
    pub binarize_ms: f64,
}

impl StageTimings {
    pub fn total_ms(&self) -> f64 {
        self.grayscale_ms + self.blur_ms + self.gradient_ms + self.nms_ms + self.binarize_ms
    }
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed().as_secs_f64() * 1000.0)
}

/// Run the whole pipeline and keep every intermediate buffer.
pub fn extract_edges_staged(input: &PipelineInput, params: PipelineParams) -> EdgeStages {
    let params = params.sanitized();
    let (height, width) = (input.height(), input.width());

    let (gray, grayscale_ms) = timed(|| luminance_u8(input.raster()));
    let (blurred, blur_ms) = timed(|| gaussian_blur_gray(gray.view(), params.blur_radius));
    let (gradient, gradient_ms) = timed(|| sobel_gradient(blurred.view()));
    let (thinned, nms_ms) = timed(|| non_maximum_suppression(&gradient));
    let (edges, binarize_ms) = timed(|| binarize(thinned.view(), params.threshold));

    let timings = StageTimings {
        grayscale_ms,
        blur_ms,
        gradient_ms,
        nms_ms,
        binarize_ms,
    };
    debug!(
        "extract_edges {width}x{height} blur_radius={} threshold={}: {} edge pixels in {:.2} ms \
         (gray {:.2}, blur {:.2}, sobel {:.2}, nms {:.2}, binarize {:.2})",
        params.blur_radius,
        params.threshold,
        edges.edge_count(),
        timings.total_ms(),
        grayscale_ms,
        blur_ms,
        gradient_ms,
        nms_ms,
        binarize_ms,
    );

    EdgeStages {
        params,
        gray,
        blurred,
        gradient,
        thinned,
        edges,
        timings,
    }
}

/// Convert a raster into a coloring-page edge bitmap.
///
/// Parameters are sanitized first (see [`PipelineParams::sanitized`]).
pub fn extract_edges(input: &PipelineInput, params: PipelineParams) -> EdgeBitmap {
    extract_edges_staged(input, params).edges
}

/// Flat-buffer entry point: validates `raster` against `width × height`.
///
/// # Errors
///
/// Returns an input error if the buffer does not hold `width * height`
/// RGBA pixels or a dimension is zero.
pub fn extract_edges_rgba(
    raster: &[u8],
    width: usize,
    height: usize,
    blur_radius: f32,
    threshold: f32,
) -> EdgeResult<EdgeBitmap> {
    let input = PipelineInput::from_slice(raster, width, height)?;
    Ok(extract_edges(&input, PipelineParams::new(blur_radius, threshold)))
}

/// Neighbour-difference preview without blur or thinning.
pub fn extract_quick_edges(input: &PipelineInput, threshold: f32) -> EdgeBitmap {
    let threshold = sanitize("threshold", threshold);
    let gray = luminance_f32(input.raster());
    let edges = neighbor_difference_edges(gray.view(), threshold);
    debug!(
        "extract_quick_edges {}x{} threshold={threshold}: {} edge pixels",
        input.width(),
        input.height(),
        edges.edge_count()
    );
    edges
}

/// Thinned gradient magnitude of one image at one blur radius.
///
/// Re-thresholding is the cheapest and most frequently adjusted step; this
/// keeps the output of stages 1-4 so [`binarize`](Self::binarize) only runs
/// the last one.
#[derive(Clone, Debug)]
pub struct PreparedEdges {
    blur_radius: f32,
    thinned: Array2<f32>,
}

impl PreparedEdges {
    pub fn new(input: &PipelineInput, blur_radius: f32) -> Self {
        let blur_radius = sanitize("blur_radius", blur_radius);
        let (thinned, elapsed_ms) = timed(|| {
            let gray = luminance_u8(input.raster());
            let blurred = gaussian_blur_gray(gray.view(), blur_radius);
            non_maximum_suppression(&sobel_gradient(blurred.view()))
        });
        debug!(
            "prepared {}x{} edges at blur_radius={blur_radius} in {elapsed_ms:.2} ms",
            input.width(),
            input.height()
        );
        Self {
            blur_radius,
            thinned,
        }
    }

    /// Blur radius the cached field was computed with (after sanitizing).
    pub fn blur_radius(&self) -> f32 {
        self.blur_radius
    }

    pub fn thinned(&self) -> &Array2<f32> {
        &self.thinned
    }

    /// Threshold the cached field; identical to a full [`extract_edges`] run.
    pub fn binarize(&self, threshold: f32) -> EdgeBitmap {
        binarize(self.thinned.view(), sanitize("threshold", threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_raster(width: usize, height: usize, value: impl Fn(usize, usize) -> u8) -> PipelineInput {
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                let v = value(x, y);
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        PipelineInput::new(data, width, height).expect("valid raster")
    }

    #[test]
    fn test_input_length_mismatch() {
        let err = PipelineInput::new(vec![0; 15], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            EdgeError::InvalidInput {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_input_zero_dimensions() {
        let err = PipelineInput::new(Vec::new(), 0, 3).unwrap_err();
        assert!(matches!(err, EdgeError::InvalidDimensions { width: 0, height: 3 }));
        assert!(PipelineInput::from_slice(&[], 3, 0).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_from_slice_matches_new() {
        let data: Vec<u8> = (0..24).collect();
        let borrowed = PipelineInput::from_slice(&data, 3, 2).expect("valid raster");
        let owned = PipelineInput::new(data.clone(), 3, 2).expect("valid raster");
        assert_eq!(borrowed, owned);

        let err = PipelineInput::from_slice(&data[..20], 3, 2).unwrap_err();
        assert!(matches!(err, EdgeError::InvalidInput { expected: 24, actual: 20, .. }));
    }

    #[test]
    fn test_input_overflowing_dimensions() {
        let err = PipelineInput::from_slice(&[0; 4], usize::MAX, 2).unwrap_err();
        assert!(matches!(err, EdgeError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_input_from_array_needs_four_channels() {
        assert!(PipelineInput::from_array(Array3::zeros((2, 2, 3))).is_err());
        let input = PipelineInput::from_array(Array3::zeros((2, 3, 4))).expect("rgba");
        assert_eq!((input.width(), input.height()), (3, 2));
    }

    #[test]
    fn test_params_sanitized() {
        let params = PipelineParams::new(f32::NAN, -5.0).sanitized();
        assert_eq!(params, PipelineParams::new(0.0, 0.0));

        let params = PipelineParams::new(f32::NEG_INFINITY, f32::INFINITY).sanitized();
        assert_eq!(params, PipelineParams::new(0.0, 0.0));

        let params = PipelineParams::new(2.5, 80.0).sanitized();
        assert_eq!(params, PipelineParams::new(2.5, 80.0));
    }

    #[test]
    fn test_params_validate() {
        assert!(PipelineParams::default().validate().is_ok());
        let err = PipelineParams::new(1.0, f32::NAN).validate().unwrap_err();
        assert!(matches!(err, EdgeError::InvalidParameter { name: "threshold", .. }));
        let err = PipelineParams::new(-0.5, 10.0).validate().unwrap_err();
        assert!(matches!(err, EdgeError::InvalidParameter { name: "blur_radius", .. }));
    }

    #[test]
    fn test_params_from_json() {
        let params = PipelineParams::from_json(r#"{"blur_radius": 2.5}"#).expect("json");
        assert_eq!(params, PipelineParams::new(2.5, 100.0));

        let params = PipelineParams::from_json("{}").expect("json");
        assert_eq!(params, PipelineParams::default());

        let err = PipelineParams::from_json(r#"{"threshold": "high"}"#).unwrap_err();
        assert!(matches!(err, EdgeError::Config(_)));
    }

    #[test]
    fn test_negative_threshold_behaves_as_zero() {
        let input = gray_raster(6, 6, |x, _| if x < 3 { 0 } else { 255 });
        let clamped = extract_edges(&input, PipelineParams::new(0.0, -10.0));
        let zero = extract_edges(&input, PipelineParams::new(0.0, 0.0));
        assert_eq!(clamped, zero);
    }

    #[test]
    fn test_staged_zero_blur_identity() {
        let input = gray_raster(7, 5, |x, y| (x * 30 + y * 7) as u8);
        let stages = extract_edges_staged(&input, PipelineParams::new(0.0, 50.0));
        assert_eq!(stages.blurred, stages.gray);
        assert_eq!(stages.edges.width(), 7);
        assert_eq!(stages.edges.height(), 5);
        assert!(stages.timings.total_ms() >= 0.0);
    }

    #[test]
    fn test_prepared_matches_full_run() {
        let input = gray_raster(12, 10, |x, y| ((x * x + 3 * y) % 256) as u8);
        for blur_radius in [0.0f32, 1.0, 2.5] {
            let prepared = PreparedEdges::new(&input, blur_radius);
            for threshold in [0.0f32, 20.0, 100.0, 400.0] {
                let full = extract_edges(&input, PipelineParams::new(blur_radius, threshold));
                assert_eq!(prepared.binarize(threshold), full);
            }
        }
    }

    #[test]
    fn test_quick_edges_on_step() {
        let input = gray_raster(5, 5, |x, _| if x < 2 { 0 } else { 255 });
        let edges = extract_quick_edges(&input, 100.0);
        assert_eq!(edges.edge_count(), 3);
        assert!((1..4).all(|y| edges.is_edge(1, y)));
    }

    #[test]
    fn test_extract_edges_rgba_rejects_bad_length() {
        let err = extract_edges_rgba(&[0; 10], 2, 2, 1.0, 100.0).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
