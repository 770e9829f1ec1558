//! WebAssembly exports for the coloring-page pipeline.
//!
//! These functions are exposed to JavaScript via wasm-bindgen and take the
//! flat RGBA bytes of a canvas `ImageData` directly.

use wasm_bindgen::prelude::*;

use crate::page::{render_on_page, PageLayout};
use crate::pipeline::{extract_edges, extract_quick_edges, PipelineInput, PipelineParams};

fn input_from(data: &[u8], width: usize, height: usize) -> Result<PipelineInput, JsValue> {
    PipelineInput::from_slice(data, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert an RGBA image into a black/white coloring page.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `blur_radius` - Gaussian blur radius (0.0-5.0)
/// * `threshold` - Edge threshold (0-255)
///
/// # Returns
/// Flat array of opaque RGBA bytes, same dimensions
#[wasm_bindgen]
pub fn extract_edges_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    blur_radius: f32,
    threshold: f32,
) -> Result<Vec<u8>, JsValue> {
    let input = input_from(data, width, height)?;
    let edges = extract_edges(&input, PipelineParams::new(blur_radius, threshold));
    Ok(edges.into_rgba_vec())
}

/// Neighbour-difference preview of the coloring page.
#[wasm_bindgen]
pub fn extract_quick_edges_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    threshold: f32,
) -> Result<Vec<u8>, JsValue> {
    let input = input_from(data, width, height)?;
    Ok(extract_quick_edges(&input, threshold).into_rgba_vec())
}

/// Run the pipeline and letterbox the result onto an A4 (794×1122) page.
///
/// # Returns
/// Flat RGBA bytes of length 794 * 1122 * 4
#[wasm_bindgen]
pub fn coloring_page_a4_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    blur_radius: f32,
    threshold: f32,
) -> Result<Vec<u8>, JsValue> {
    let input = input_from(data, width, height)?;
    let edges = extract_edges(&input, PipelineParams::new(blur_radius, threshold));
    let page = render_on_page(&edges, PageLayout::A4_96DPI);
    Ok(page.into_raw_vec_and_offset().0)
}
