//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Edge detection itself is
//! a collaborator's job; these helpers only binarize what it produced.

use std::path::Path;

use crate::image::{EdgeImage, EDGE};
use crate::util::{CircleHoughError, CircleHoughResult};

/// Binarizes a grayscale buffer into an edge image.
///
/// Pixels with value `>= threshold` become edges. Canny-style collaborators
/// emit exactly 255 for edges, so `threshold = 255` reproduces their output
/// verbatim.
pub fn edge_image_from_gray(img: &image::GrayImage, threshold: u8) -> CircleHoughResult<EdgeImage> {
    let data = img
        .as_raw()
        .iter()
        .map(|&px| if px >= threshold { EDGE } else { 0 })
        .collect();
    EdgeImage::from_raw(data, img.width() as usize, img.height() as usize)
}

/// Loads an image from disk, converts to grayscale, and binarizes it.
pub fn load_edge_image<P: AsRef<Path>>(path: P, threshold: u8) -> CircleHoughResult<EdgeImage> {
    let img = image::open(path).map_err(|err| CircleHoughError::ImageIo {
        reason: err.to_string(),
    })?;
    edge_image_from_gray(&img.to_luma8(), threshold)
}

/// Loads an image from disk as RGB, for drawing detections onto.
pub fn load_color_image<P: AsRef<Path>>(path: P) -> CircleHoughResult<image::RgbImage> {
    let img = image::open(path).map_err(|err| CircleHoughError::ImageIo {
        reason: err.to_string(),
    })?;
    Ok(img.to_rgb8())
}
