//! The voting kernel.
//!
//! For every edge pixel, every candidate radius sweeps 361 angular samples
//! (0..=360 degrees; the boundary sample duplicates 0 degrees and only adds
//! one redundant vote per circle). Each sample projects to a candidate center
//!
//! ```text
//! hx = trunc((i + axis_shift) - r*cos(t))
//! hy = trunc(j - r*sin(t))
//! ```
//!
//! and votes if the center lies inside the accumulator. Truncation toward zero
//! is load-bearing: rounding to nearest would move peaks by a cell.

use crate::accum::Accumulator;
use crate::image::EdgeImage;
use crate::util::CircleHoughResult;

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Radius band and coordinate shift for a voting pass.
#[derive(Clone, Copy, Debug)]
pub struct VoteParams {
    /// Smallest candidate radius, inclusive.
    pub min_radius: usize,
    /// Largest candidate radius, inclusive.
    pub max_radius: usize,
    /// Shift added to pixel x before projection (crop-with-halo workers).
    pub axis_shift: usize,
}

impl VoteParams {
    /// Number of radius layers in the band.
    pub fn depth(&self) -> usize {
        self.max_radius - self.min_radius + 1
    }
}

/// Precomputed `r*cos(t)` / `r*sin(t)` factors, one row of 361 samples per
/// radius. Built once per voting pass so the hot loop carries no trig calls;
/// the f64 expressions match the projection formula exactly, so the table is
/// bit-identical across workers and execution modes.
pub(crate) struct SweepTable {
    rows: Vec<Vec<(f64, f64)>>,
}

impl SweepTable {
    pub(crate) fn new(min_radius: usize, max_radius: usize) -> Self {
        let rows = (min_radius..=max_radius)
            .map(|radius| {
                (0..=360usize)
                    .map(|t| {
                        let angle = (t as f64 * std::f64::consts::PI) / 180.0;
                        (radius as f64 * angle.cos(), radius as f64 * angle.sin())
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    #[inline]
    pub(crate) fn rows(&self) -> &[Vec<(f64, f64)>] {
        &self.rows
    }
}

/// Sequential full-image voting pass: accumulator the size of the image,
/// no coordinate shift.
pub fn vote(
    edges: &EdgeImage,
    min_radius: usize,
    max_radius: usize,
) -> CircleHoughResult<Accumulator> {
    let params = VoteParams {
        min_radius,
        max_radius,
        axis_shift: 0,
    };
    let mut acc = Accumulator::new(edges.width(), edges.height(), params.depth())?;
    scalar::vote_columns(edges, 0, edges.width(), &params, &mut acc);
    Ok(acc)
}
