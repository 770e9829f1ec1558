//! Coloring Page
//!
//! Turns a photograph into printable black/white line art by extracting
//! salient edges, with Python bindings via PyO3 and WASM bindings for
//! JavaScript.
//!
//! ## Pipeline
//! 1. **Luminance** - RGBA → BT.709 grayscale
//! 2. **Gaussian blur** - radius-controlled smoothing
//! 3. **Sobel** - gradient magnitude and direction
//! 4. **Non-maximum suppression** - thin edges to one pixel
//! 5. **Threshold** - binary bitmap with a white 1-pixel border
//!
//! ## Image Format
//! Input is a decoded RGBA u8 raster (height, width, 4); decoding, vector
//! tracing and printing live outside this crate. Output is an
//! [`EdgeBitmap`] that expands to opaque black/white RGBA.
//!
//! ```
//! use coloring_page::{extract_edges, PipelineInput, PipelineParams};
//!
//! let rgba = vec![128u8; 8 * 8 * 4];
//! let input = PipelineInput::new(rgba, 8, 8)?;
//! let page = extract_edges(&input, PipelineParams::default());
//! assert_eq!(page.edge_count(), 0);
//! # Ok::<(), coloring_page::EdgeError>(())
//! ```

pub mod error;
pub mod filters;
pub mod page;
pub mod pipeline;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{EdgeError, EdgeResult};
pub use filters::{EdgeBitmap, GradientField, MAX_GRADIENT_MAGNITUDE, SIGMA_PER_RADIUS};
pub use page::{render_on_page, PageLayout, Placement};
pub use pipeline::{
    extract_edges, extract_edges_rgba, extract_edges_staged, extract_quick_edges, EdgeStages,
    PipelineInput, PipelineParams, PreparedEdges, StageTimings,
};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::EdgeError;
    use crate::page::{render_on_page, PageLayout};
    use crate::pipeline::{
        extract_edges, extract_quick_edges, PipelineInput, PipelineParams, PreparedEdges,
    };

    fn to_py_err(err: EdgeError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn input_from(image: PyReadonlyArray3<'_, u8>) -> PyResult<PipelineInput> {
        PipelineInput::from_array(image.as_array().to_owned()).map_err(to_py_err)
    }

    /// Convert an RGBA u8 image (H, W, 4) into a black/white coloring page.
    ///
    /// Returns an opaque RGBA image of the same size.
    #[pyfunction]
    #[pyo3(signature = (image, blur_radius=1.0, threshold=100.0))]
    pub fn coloring_page<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        blur_radius: f32,
        threshold: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = input_from(image)?;
        let edges = py.allow_threads(|| {
            extract_edges(&input, PipelineParams::new(blur_radius, threshold))
        });
        Ok(edges.to_rgba().into_pyarray(py))
    }

    /// Neighbour-difference preview, opaque RGBA output.
    #[pyfunction]
    #[pyo3(signature = (image, threshold=100.0))]
    pub fn coloring_page_quick<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        threshold: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = input_from(image)?;
        Ok(extract_quick_edges(&input, threshold).to_rgba().into_pyarray(py))
    }

    /// Thinned gradient magnitude (H, W) as f32, for threshold previews.
    #[pyfunction]
    #[pyo3(signature = (image, blur_radius=1.0))]
    pub fn thinned_magnitude<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        blur_radius: f32,
    ) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let input = input_from(image)?;
        let prepared = py.allow_threads(|| PreparedEdges::new(&input, blur_radius));
        Ok(prepared.thinned().clone().into_pyarray(py))
    }

    /// Coloring page letterboxed onto an A4 page at 96 DPI (1122, 794, 4).
    #[pyfunction]
    #[pyo3(signature = (image, blur_radius=1.0, threshold=100.0))]
    pub fn coloring_page_a4<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        blur_radius: f32,
        threshold: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = input_from(image)?;
        let page = py.allow_threads(|| {
            let edges = extract_edges(&input, PipelineParams::new(blur_radius, threshold));
            render_on_page(&edges, PageLayout::A4_96DPI)
        });
        Ok(page.into_pyarray(py))
    }

    /// Coloring page Rust extension module
    #[pymodule]
    #[pyo3(name = "coloring_page")]
    pub fn coloring_page_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(coloring_page, m)?)?;
        m.add_function(wrap_pyfunction!(coloring_page_quick, m)?)?;
        m.add_function(wrap_pyfunction!(thinned_magnitude, m)?)?;
        m.add_function(wrap_pyfunction!(coloring_page_a4, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::coloring_page_rust;
