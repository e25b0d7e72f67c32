//! Rayon-parallel voting (feature-gated).
//!
//! Rows are distributed across a pool; all threads vote into one shared
//! accumulator. Distinct edge pixels routinely hit the same cell, so the
//! increments are relaxed atomic fetch-adds: counts stay exact, only the
//! ordering between cells is unconstrained.

use std::sync::atomic::{AtomicU32, Ordering};

use rayon::prelude::*;

use crate::accum::Accumulator;
use crate::image::EdgeImage;
use crate::kernel::{SweepTable, VoteParams};
use crate::util::{CircleHoughError, CircleHoughResult};

/// Row-parallel voting pass over columns `[x0, x1)` with `threads` workers.
///
/// Produces the same accumulator as [`scalar::vote_columns`] would, cell for
/// cell.
///
/// [`scalar::vote_columns`]: crate::kernel::scalar::vote_columns
pub fn vote_columns_par(
    edges: &EdgeImage,
    x0: usize,
    x1: usize,
    params: &VoteParams,
    acc_width: usize,
    threads: usize,
) -> CircleHoughResult<Accumulator> {
    debug_assert!(x1 <= edges.width());
    let depth = params.depth();
    let height = edges.height();
    let len = acc_width
        .checked_mul(height)
        .and_then(|cells| cells.checked_mul(depth))
        .ok_or(CircleHoughError::AccumulatorTooLarge {
            width: acc_width,
            height,
            depth,
        })?;

    let mut cells = Vec::new();
    cells
        .try_reserve_exact(len)
        .map_err(|_| CircleHoughError::AccumulatorTooLarge {
            width: acc_width,
            height,
            depth,
        })?;
    cells.resize_with(len, || AtomicU32::new(0));

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|err| CircleHoughError::ThreadPool {
            reason: err.to_string(),
        })?;

    let table = SweepTable::new(params.min_radius, params.max_radius);
    let acc_w = acc_width as i32;
    let acc_h = height as i32;
    let shared = &cells;
    let table_ref = &table;

    pool.install(|| {
        (0..height).into_par_iter().for_each(|j| {
            for i in x0..x1 {
                if !edges.is_edge(i, j) {
                    continue;
                }
                for (r_offset, sweep) in table_ref.rows().iter().enumerate() {
                    for &(rcos, rsin) in sweep {
                        let hx = ((i + params.axis_shift) as f64 - rcos) as i32;
                        let hy = (j as f64 - rsin) as i32;
                        if hx >= 0 && hx < acc_w && hy >= 0 && hy < acc_h {
                            let idx = crate::util::index::index_3d(
                                hx as usize,
                                hy as usize,
                                r_offset,
                                acc_width,
                                height,
                            );
                            shared[idx].fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            }
        });
    });

    let counts = cells.into_iter().map(AtomicU32::into_inner).collect();
    Accumulator::from_counts(counts, acc_width, height, depth)
}

/// Thread-parallel full-image voting pass.
pub fn vote_par(
    edges: &EdgeImage,
    min_radius: usize,
    max_radius: usize,
    threads: usize,
) -> CircleHoughResult<Accumulator> {
    let params = VoteParams {
        min_radius,
        max_radius,
        axis_shift: 0,
    };
    vote_columns_par(edges, 0, edges.width(), &params, edges.width(), threads)
}
