//! Baseline single-threaded voting.

use crate::accum::Accumulator;
use crate::image::EdgeImage;
use crate::kernel::{SweepTable, VoteParams};

/// Votes for every edge pixel in columns `[x0, x1)` of `edges`.
///
/// The accumulator bounds, not the image bounds, clip the projected centers,
/// so a halo-widened accumulator collects boundary-crossing votes.
pub fn vote_columns(
    edges: &EdgeImage,
    x0: usize,
    x1: usize,
    params: &VoteParams,
    acc: &mut Accumulator,
) {
    let table = SweepTable::new(params.min_radius, params.max_radius);
    vote_columns_with(edges, x0, x1, params, &table, acc);
}

pub(crate) fn vote_columns_with(
    edges: &EdgeImage,
    x0: usize,
    x1: usize,
    params: &VoteParams,
    table: &SweepTable,
    acc: &mut Accumulator,
) {
    debug_assert!(x1 <= edges.width());
    let acc_w = acc.width() as i32;
    let acc_h = acc.height() as i32;

    for j in 0..edges.height() {
        for i in x0..x1 {
            if !edges.is_edge(i, j) {
                continue;
            }
            for (r_offset, sweep) in table.rows().iter().enumerate() {
                for &(rcos, rsin) in sweep {
                    let hx = ((i + params.axis_shift) as f64 - rcos) as i32;
                    let hy = (j as f64 - rsin) as i32;
                    if hx >= 0 && hx < acc_w && hy >= 0 && hy < acc_h {
                        acc.vote(hx as usize, hy as usize, r_offset);
                    }
                }
            }
        }
    }
}
