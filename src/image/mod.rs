//! Binary edge images.
//!
//! `EdgeImage` owns a row-major byte buffer where [`EDGE`] marks an edge pixel
//! and everything else is background. The detector only reads it; the one
//! mutation path (`set_edge`) exists for building synthetic inputs and for
//! binarizing collaborator output.

use serde::{Deserialize, Serialize};

use crate::util::index::index_2d;
use crate::util::{CircleHoughError, CircleHoughResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Pixel value marking an edge.
pub const EDGE: u8 = 255;

/// Owned single-channel binary edge image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl EdgeImage {
    /// Creates an all-background image.
    pub fn new(width: usize, height: usize) -> CircleHoughResult<Self> {
        if width == 0 || height == 0 {
            return Err(CircleHoughError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data: vec![0; width * height],
            width,
            height,
        })
    }

    /// Wraps a raw row-major buffer. The length must match the dimensions
    /// exactly; values other than [`EDGE`] are treated as background.
    pub fn from_raw(data: Vec<u8>, width: usize, height: usize) -> CircleHoughResult<Self> {
        if width == 0 || height == 0 {
            return Err(CircleHoughError::InvalidDimensions { width, height });
        }
        let expected = width * height;
        if data.len() != expected {
            return Err(CircleHoughError::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the backing row-major buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns whether the pixel at `(x, y)` is an edge.
    ///
    /// Panics if the coordinates are out of range.
    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.data[index_2d(x, y, self.width)] == EDGE
    }

    /// Marks the pixel at `(x, y)` as an edge.
    pub fn set_edge(&mut self, x: usize, y: usize) {
        self.data[index_2d(x, y, self.width)] = EDGE;
    }

    /// Counts edge pixels.
    pub fn edge_count(&self) -> usize {
        self.data.iter().filter(|&&px| px == EDGE).count()
    }

    /// Copies columns `[x0, x0 + width)` into a new image of the same height.
    pub fn crop_columns(&self, x0: usize, width: usize) -> CircleHoughResult<Self> {
        if width == 0 {
            return Err(CircleHoughError::InvalidDimensions {
                width,
                height: self.height,
            });
        }
        let end = x0.checked_add(width).filter(|&end| end <= self.width).ok_or(
            CircleHoughError::CropOutOfBounds {
                x0,
                width,
                image_width: self.width,
            },
        )?;
        let mut data = Vec::with_capacity(width * self.height);
        for y in 0..self.height {
            let start = index_2d(x0, y, self.width);
            data.extend_from_slice(&self.data[start..start + (end - x0)]);
        }
        Ok(Self {
            data,
            width,
            height: self.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgeImage, EDGE};
    use crate::util::CircleHoughError;

    #[test]
    fn rejects_zero_dimensions() {
        let err = EdgeImage::new(0, 3).err().unwrap();
        assert_eq!(err, CircleHoughError::InvalidDimensions { width: 0, height: 3 });
    }

    #[test]
    fn rejects_mismatched_buffer() {
        let err = EdgeImage::from_raw(vec![0; 5], 2, 3).err().unwrap();
        assert_eq!(err, CircleHoughError::BufferSizeMismatch { expected: 6, got: 5 });
    }

    #[test]
    fn set_and_query_edges() {
        let mut img = EdgeImage::new(4, 3).unwrap();
        img.set_edge(2, 1);
        assert!(img.is_edge(2, 1));
        assert!(!img.is_edge(1, 1));
        assert_eq!(img.edge_count(), 1);
        assert_eq!(img.as_slice()[6], EDGE);
    }

    #[test]
    fn crop_columns_copies_the_stripe() {
        let mut img = EdgeImage::new(6, 2).unwrap();
        img.set_edge(3, 0);
        img.set_edge(5, 1);

        let stripe = img.crop_columns(3, 2).unwrap();
        assert_eq!(stripe.width(), 2);
        assert_eq!(stripe.height(), 2);
        assert!(stripe.is_edge(0, 0));
        assert_eq!(stripe.edge_count(), 1);

        let err = img.crop_columns(5, 2).err().unwrap();
        assert_eq!(
            err,
            CircleHoughError::CropOutOfBounds {
                x0: 5,
                width: 2,
                image_width: 6,
            }
        );
    }
}
