//! Thresholding of the thinned magnitude into a black/white edge bitmap.

use ndarray::{Array2, Array3, ArrayView2, Axis};
use rayon::prelude::*;

/// Pixel value of an edge (black ink).
pub const EDGE: u8 = 0;
/// Pixel value of the background (white paper).
pub const BACKGROUND: u8 = 255;

// ============================================================================
// Edge Bitmap
// ============================================================================

/// Binary coloring-page raster: every pixel is [`EDGE`] or [`BACKGROUND`].
///
/// The outermost 1-pixel ring is always background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeBitmap {
    pixels: Array2<u8>,
}

impl EdgeBitmap {
    /// Wrap an already-binary raster, forcing the outer ring to background.
    pub(crate) fn from_pixels(mut pixels: Array2<u8>) -> Self {
        clear_border(&mut pixels);
        Self { pixels }
    }

    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// True if (x, y) is an edge pixel.
    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.pixels[[y, x]] == EDGE
    }

    /// Number of edge pixels.
    pub fn edge_count(&self) -> usize {
        self.pixels.iter().filter(|&&v| v == EDGE).count()
    }

    /// One byte per pixel, (height, width), 0 = edge, 255 = background.
    pub fn as_array(&self) -> ArrayView2<'_, u8> {
        self.pixels.view()
    }

    /// Expand to an opaque RGBA raster of shape (height, width, 4).
    pub fn to_rgba(&self) -> Array3<u8> {
        let (height, width) = self.pixels.dim();
        Array3::from_shape_fn((height, width, 4), |(y, x, c)| {
            if c == 3 {
                255
            } else {
                self.pixels[[y, x]]
            }
        })
    }

    /// Flat RGBA bytes, length `width * height * 4`.
    pub fn into_rgba_vec(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for &v in self.pixels.iter() {
            out.extend_from_slice(&[v, v, v, 255]);
        }
        out
    }
}

// ============================================================================
// Threshold
// ============================================================================

/// Apply a binary threshold to a thinned magnitude field.
///
/// # Arguments
/// * `thinned` - Magnitude field after non-maximum suppression
/// * `threshold` - Pixels with magnitude strictly above this become edges
///
/// # Returns
/// Edge bitmap with the outer 1-pixel ring forced to background
pub fn binarize(thinned: ArrayView2<f32>, threshold: f32) -> EdgeBitmap {
    let (height, width) = thinned.dim();
    let mut pixels = Array2::<u8>::from_elem((height, width), BACKGROUND);

    pixels
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                if thinned[[y, x]] > threshold {
                    row[x] = EDGE;
                }
            }
        });

    EdgeBitmap::from_pixels(pixels)
}

/// Force the outermost ring of a bitmap to background.
fn clear_border(pixels: &mut Array2<u8>) {
    let (height, width) = pixels.dim();
    if height == 0 || width == 0 {
        return;
    }
    pixels.row_mut(0).fill(BACKGROUND);
    pixels.row_mut(height - 1).fill(BACKGROUND);
    pixels.column_mut(0).fill(BACKGROUND);
    pixels.column_mut(width - 1).fill(BACKGROUND);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        let thinned = Array2::from_shape_fn((3, 3), |(y, x)| if (y, x) == (1, 1) { 100.0 } else { 0.0 });
        assert!(binarize(thinned.view(), 99.9).is_edge(1, 1));
        assert!(!binarize(thinned.view(), 100.0).is_edge(1, 1));
    }

    #[test]
    fn test_border_forced_white() {
        let thinned = Array2::<f32>::from_elem((4, 6), 500.0);
        let bitmap = binarize(thinned.view(), 0.0);

        for y in 0..4 {
            for x in 0..6 {
                let interior = (1..5).contains(&x) && (1..3).contains(&y);
                assert_eq!(bitmap.is_edge(x, y), interior, "({x}, {y})");
            }
        }
        assert_eq!(bitmap.edge_count(), 8);
    }

    #[test]
    fn test_clear_border_leaves_interior() {
        let mut pixels = Array2::<u8>::from_elem((5, 4), EDGE);
        clear_border(&mut pixels);
        for y in 0..5 {
            for x in 0..4 {
                let ring = x == 0 || y == 0 || x == 3 || y == 4;
                let expected = if ring { BACKGROUND } else { EDGE };
                assert_eq!(pixels[[y, x]], expected, "({x}, {y})");
            }
        }

        let mut empty = Array2::<u8>::zeros((0, 3));
        clear_border(&mut empty);
        assert_eq!(empty.dim(), (0, 3));
    }

    #[test]
    fn test_tiny_bitmaps_are_all_background() {
        for (h, w) in [(1, 1), (1, 4), (2, 2), (3, 1)] {
            let thinned = Array2::<f32>::from_elem((h, w), 1e6);
            let bitmap = binarize(thinned.view(), 0.0);
            assert_eq!(bitmap.edge_count(), 0);
        }
    }

    #[test]
    fn test_rgba_is_opaque_black_or_white() {
        let thinned = Array2::from_shape_fn((3, 3), |(y, x)| if (y, x) == (1, 1) { 1.0 } else { 0.0 });
        let bitmap = binarize(thinned.view(), 0.5);

        let rgba = bitmap.to_rgba();
        assert_eq!(rgba.dim(), (3, 3, 4));
        assert_eq!(&rgba.as_slice().map(|s| s[16..20].to_vec()), &Some(vec![0, 0, 0, 255]));
        assert_eq!(&rgba.as_slice().map(|s| s[0..4].to_vec()), &Some(vec![255, 255, 255, 255]));

        let flat = bitmap.clone().into_rgba_vec();
        assert_eq!(rgba.as_slice(), Some(flat.as_slice()));
    }
}
