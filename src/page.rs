//! Placement of an edge bitmap on a printable page.
//!
//! The bitmap is scaled uniformly to the largest size that fits the page and
//! centred, leaving equal margins on the short axis (letterboxing). The page
//! itself is white paper, so the margins blend with the bitmap's background.

use ndarray::Array3;

use crate::filters::binarize::{EdgeBitmap, BACKGROUND};

/// Target page size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLayout {
    pub width: usize,
    pub height: usize,
}

/// Where a source raster lands on the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Uniform source-to-page scale factor
    pub scale: f64,
    pub x_offset: f64,
    pub y_offset: f64,
    /// Scaled width in page pixels
    pub width: f64,
    /// Scaled height in page pixels
    pub height: f64,
}

impl PageLayout {
    /// ISO A4 (210 × 297 mm) at 96 DPI.
    pub const A4_96DPI: PageLayout = PageLayout {
        width: 794,
        height: 1122,
    };

    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Fit a `src_width × src_height` raster inside the page, preserving
    /// aspect ratio and centring it.
    pub fn fit(&self, src_width: usize, src_height: usize) -> Placement {
        if src_width == 0 || src_height == 0 {
            return Placement {
                scale: 0.0,
                x_offset: self.width as f64 / 2.0,
                y_offset: self.height as f64 / 2.0,
                width: 0.0,
                height: 0.0,
            };
        }

        let scale = (self.width as f64 / src_width as f64)
            .min(self.height as f64 / src_height as f64);
        let width = src_width as f64 * scale;
        let height = src_height as f64 * scale;

        Placement {
            scale,
            x_offset: (self.width as f64 - width) / 2.0,
            y_offset: (self.height as f64 - height) / 2.0,
            width,
            height,
        }
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::A4_96DPI
    }
}

/// Draw `bitmap` onto a white opaque page of shape (page height, page width, 4).
///
/// Page pixels whose centre falls inside the placement rectangle sample the
/// nearest bitmap pixel; everything else stays white.
pub fn render_on_page(bitmap: &EdgeBitmap, layout: PageLayout) -> Array3<u8> {
    let mut page = Array3::<u8>::from_elem((layout.height, layout.width, 4), BACKGROUND);
    let placement = layout.fit(bitmap.width(), bitmap.height());
    if placement.scale <= 0.0 {
        return page;
    }

    let src = bitmap.as_array();
    let (src_height, src_width) = src.dim();

    for py in 0..layout.height {
        let sy = (py as f64 + 0.5 - placement.y_offset) / placement.scale;
        if sy < 0.0 || sy >= src_height as f64 {
            continue;
        }
        let sy = sy as usize;

        for px in 0..layout.width {
            let sx = (px as f64 + 0.5 - placement.x_offset) / placement.scale;
            if sx < 0.0 || sx >= src_width as f64 {
                continue;
            }
            let value = src[[sy, sx as usize]];
            for c in 0..3 {
                page[[py, px, c]] = value;
            }
        }
    }

    page
}
