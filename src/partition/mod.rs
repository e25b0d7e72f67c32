//! Work distribution across voting workers.
//!
//! The image is split into contiguous column stripes, one per worker. Two
//! strategies decide what each worker sees:
//!
//! - **replicate-full**: every worker holds the whole image and a full-size
//!   accumulator, and only the voting columns differ. Votes cast by a stripe
//!   land anywhere in the full accumulator, so no realignment is needed.
//! - **crop-with-halo**: every worker holds only its stripe, with a private
//!   accumulator widened by `max_radius` on both sides. Votes near a stripe
//!   boundary legitimately land within one radius outside the stripe; the halo
//!   captures them and [`Partition::shift_x`] realigns the buffer at merge
//!   time.

use serde::{Deserialize, Serialize};

/// Data-distribution strategy for process-parallel runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistStrategy {
    /// Ship the full image to every worker, merge full-size accumulators.
    ReplicateFull,
    /// Ship disjoint stripes, merge halo-widened accumulators with a shift.
    CropWithHalo,
}

/// Per-worker partition descriptor: created once before voting, read-only
/// afterward, consumed by the merge step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Worker slot, 0-based.
    pub index: usize,
    /// First image column of this worker's stripe.
    pub image_x0: usize,
    /// Stripe width in columns.
    pub image_width: usize,
    /// Width of the worker's private accumulator.
    pub acc_width: usize,
    /// Column shift applied when merging into the global accumulator.
    pub shift_x: usize,
    /// Shift added to pixel x during voting to keep halo coordinates
    /// non-negative (zero for replicate-full).
    pub axis_shift: usize,
    /// Strategy this partition was built for.
    pub strategy: DistStrategy,
}

impl Partition {
    /// Column range of the worker's local image the voting loop walks.
    ///
    /// Replicate-full workers index the full image, so the range is the global
    /// stripe; crop workers index their private stripe from zero.
    pub fn vote_columns(&self) -> (usize, usize) {
        match self.strategy {
            DistStrategy::ReplicateFull => (self.image_x0, self.image_x0 + self.image_width),
            DistStrategy::CropWithHalo => (0, self.image_width),
        }
    }
}

/// Splits `image_width` columns into one partition per worker.
///
/// Stripes are `image_width / worker_count` columns wide; the last stripe
/// absorbs the remainder. The stripes tile the image without gaps or overlap.
pub fn split(
    strategy: DistStrategy,
    image_width: usize,
    max_radius: usize,
    worker_count: usize,
) -> Vec<Partition> {
    let worker_count = worker_count.max(1);
    let stripe = image_width / worker_count;
    (0..worker_count)
        .map(|index| {
            let image_x0 = stripe * index;
            let stripe_width = if index == worker_count - 1 {
                image_width - image_x0
            } else {
                stripe
            };
            match strategy {
                DistStrategy::ReplicateFull => Partition {
                    index,
                    image_x0,
                    image_width: stripe_width,
                    acc_width: image_width,
                    shift_x: 0,
                    axis_shift: 0,
                    strategy,
                },
                DistStrategy::CropWithHalo => Partition {
                    index,
                    image_x0,
                    image_width: stripe_width,
                    acc_width: stripe_width + 2 * max_radius,
                    shift_x: image_x0,
                    axis_shift: max_radius,
                    strategy,
                },
            }
        })
        .collect()
}

/// Width of the global (post-merge) accumulator for a strategy.
pub fn global_acc_width(strategy: DistStrategy, image_width: usize, max_radius: usize) -> usize {
    match strategy {
        DistStrategy::ReplicateFull => image_width,
        DistStrategy::CropWithHalo => image_width + 2 * max_radius,
    }
}

/// Halo margin reserved on the shift axis; peak extraction skips it.
pub fn axis_shift(strategy: DistStrategy, max_radius: usize) -> usize {
    match strategy {
        DistStrategy::ReplicateFull => 0,
        DistStrategy::CropWithHalo => max_radius,
    }
}
