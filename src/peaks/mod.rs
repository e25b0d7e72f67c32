//! Peak extraction from the merged accumulator.
//!
//! Both extraction modes scan the non-halo column range
//! `[axis_shift, width - axis_shift)` and report halo-corrected image
//! coordinates. Scan order is rows, then columns, then radius layers; binning
//! ties resolve to the first cell encountered in that order.

use crate::accum::Accumulator;

mod spacing;

pub use spacing::spacing_filter;

/// A thresholded accumulator cell, back in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Circle center column.
    pub x: usize,
    /// Circle center row.
    pub y: usize,
    /// Circle radius in pixels.
    pub radius: usize,
    /// Whether the candidate survives filtering. Extraction sets this to the
    /// configured default (`true` when no spacing filter will run); the
    /// spacing filter overwrites it.
    pub keep: bool,
}

/// Extraction parameters.
#[derive(Clone, Copy, Debug)]
pub struct PeakParams {
    /// Minimum vote count for a cell to become a candidate.
    pub threshold: u32,
    /// Radius of the first accumulator layer.
    pub min_radius: usize,
    /// Halo margin to exclude from the scan and subtract from reported x.
    pub axis_shift: usize,
    /// Initial keep flag for emitted candidates.
    pub keep_default: bool,
}

/// Emits a candidate for every cell with at least `threshold` votes.
pub fn extract(acc: &Accumulator, params: &PeakParams) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let x_end = acc.width().saturating_sub(params.axis_shift);
    for y in 0..acc.height() {
        for x in params.axis_shift..x_end {
            for r_offset in 0..acc.depth() {
                if acc.get(x, y, r_offset) >= params.threshold {
                    candidates.push(Candidate {
                        x: x - params.axis_shift,
                        y,
                        radius: r_offset + params.min_radius,
                        keep: params.keep_default,
                    });
                }
            }
        }
    }
    candidates
}

/// Reduces the accumulator to at most one candidate per `bin_size`-square
/// spatial tile: the tile's maximum cell, emitted only if it reaches
/// `threshold`. Tiles at the right/bottom are truncated to fit.
pub fn extract_binned(acc: &Accumulator, params: &PeakParams, bin_size: usize) -> Vec<Candidate> {
    let bin_size = bin_size.max(1);
    let mut candidates = Vec::new();
    let x_end = acc.width().saturating_sub(params.axis_shift);

    let mut tile_y = 0;
    while tile_y < acc.height() {
        let mut tile_x = params.axis_shift;
        while tile_x < x_end {
            let y_stop = (tile_y + bin_size).min(acc.height());
            let x_stop = (tile_x + bin_size).min(x_end);

            // Track the first-in-scan-order maximum of the tile.
            let mut best: Option<(u32, usize, usize, usize)> = None;
            for y in tile_y..y_stop {
                for x in tile_x..x_stop {
                    for r_offset in 0..acc.depth() {
                        let votes = acc.get(x, y, r_offset);
                        if best.map_or(true, |(top, _, _, _)| votes > top) {
                            best = Some((votes, x, y, r_offset));
                        }
                    }
                }
            }

            if let Some((votes, x, y, r_offset)) = best {
                if votes >= params.threshold {
                    candidates.push(Candidate {
                        x: x - params.axis_shift,
                        y,
                        radius: r_offset + params.min_radius,
                        keep: params.keep_default,
                    });
                }
            }

            tile_x += bin_size;
        }
        tile_y += bin_size;
    }
    candidates
}
