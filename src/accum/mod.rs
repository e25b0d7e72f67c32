//! The 3-D vote accumulator.
//!
//! Votes are u32 counters over (x, y, radius offset), flattened into one
//! contiguous buffer. The accumulator owns its buffer and every access goes
//! through the index-mapping helpers; voting callers bounds-check projected
//! coordinates before calling [`Accumulator::vote`], so the hot path carries
//! no redundant range logic beyond the slice index itself.

use serde::{Deserialize, Serialize};

use crate::trace::trace_event;
use crate::util::index::index_3d;
use crate::util::{CircleHoughError, CircleHoughResult};

/// Flat 3-D grid of vote counters, zero-initialized at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accumulator {
    counts: Vec<u32>,
    width: usize,
    height: usize,
    depth: usize,
}

impl Accumulator {
    /// Allocates a zero-filled accumulator of `width * height * depth` cells.
    ///
    /// Allocation failure (overflowing size or out of memory) is reported as
    /// [`CircleHoughError::AccumulatorTooLarge`], distinct from logic errors.
    pub fn new(width: usize, height: usize, depth: usize) -> CircleHoughResult<Self> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(CircleHoughError::InvalidDimensions { width, height });
        }
        let len = width
            .checked_mul(height)
            .and_then(|cells| cells.checked_mul(depth))
            .ok_or(CircleHoughError::AccumulatorTooLarge {
                width,
                height,
                depth,
            })?;
        let mut counts = Vec::new();
        counts
            .try_reserve_exact(len)
            .map_err(|_| CircleHoughError::AccumulatorTooLarge {
                width,
                height,
                depth,
            })?;
        counts.resize(len, 0);
        Ok(Self {
            counts,
            width,
            height,
            depth,
        })
    }

    /// Wraps an existing counter buffer; the length must match the dimensions.
    pub(crate) fn from_counts(
        counts: Vec<u32>,
        width: usize,
        height: usize,
        depth: usize,
    ) -> CircleHoughResult<Self> {
        let expected = width * height * depth;
        if counts.len() != expected {
            return Err(CircleHoughError::BufferSizeMismatch {
                expected,
                got: counts.len(),
            });
        }
        Ok(Self {
            counts,
            width,
            height,
            depth,
        })
    }

    /// Accumulator width (may exceed the image width by a halo).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Accumulator height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of radius layers.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the flat counter buffer.
    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }

    /// Increments the cell at `(x, y, r_offset)` by one.
    #[inline]
    pub fn vote(&mut self, x: usize, y: usize, r_offset: usize) {
        self.counts[index_3d(x, y, r_offset, self.width, self.height)] += 1;
    }

    /// Reads the cell at `(x, y, r_offset)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, r_offset: usize) -> u32 {
        self.counts[index_3d(x, y, r_offset, self.width, self.height)]
    }

    /// Sum of all votes in the accumulator.
    pub fn total_votes(&self) -> u64 {
        self.counts.iter().map(|&count| u64::from(count)).sum()
    }

    /// Adds every non-zero cell of `source` into `self` at `(x + shift_x, y, r)`.
    ///
    /// Height and depth must match. Shifted coordinates falling outside this
    /// accumulator cannot occur under a correct partitioning; if they do, the
    /// votes are dropped and counted, not treated as fatal.
    pub fn merge_from(&mut self, source: &Accumulator, shift_x: usize) -> CircleHoughResult<()> {
        if source.height != self.height || source.depth != self.depth {
            return Err(CircleHoughError::InvalidDimensions {
                width: source.width,
                height: source.height,
            });
        }
        let mut dropped = 0u64;
        for r in 0..source.depth {
            for y in 0..source.height {
                for x in 0..source.width {
                    let votes = source.counts[index_3d(x, y, r, source.width, source.height)];
                    if votes == 0 {
                        continue;
                    }
                    let tx = x + shift_x;
                    if tx >= self.width {
                        dropped += u64::from(votes);
                        continue;
                    }
                    self.counts[index_3d(tx, y, r, self.width, self.height)] += votes;
                }
            }
        }
        if dropped > 0 {
            trace_event!("merge_dropped_votes", dropped = dropped, shift_x = shift_x);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Accumulator;
    use crate::util::CircleHoughError;

    #[test]
    fn starts_zeroed_and_counts_votes() {
        let mut acc = Accumulator::new(4, 3, 2).unwrap();
        assert_eq!(acc.total_votes(), 0);

        acc.vote(1, 2, 0);
        acc.vote(1, 2, 0);
        acc.vote(3, 0, 1);
        assert_eq!(acc.get(1, 2, 0), 2);
        assert_eq!(acc.get(3, 0, 1), 1);
        assert_eq!(acc.get(0, 0, 0), 0);
        assert_eq!(acc.total_votes(), 3);
    }

    #[test]
    fn oversized_allocation_is_a_distinct_error() {
        let err = Accumulator::new(usize::MAX, 2, 2).err().unwrap();
        assert_eq!(
            err,
            CircleHoughError::AccumulatorTooLarge {
                width: usize::MAX,
                height: 2,
                depth: 2,
            }
        );
    }

    #[test]
    fn merge_applies_the_column_shift() {
        let mut global = Accumulator::new(6, 2, 1).unwrap();
        let mut part = Accumulator::new(3, 2, 1).unwrap();
        part.vote(0, 1, 0);
        part.vote(2, 0, 0);
        part.vote(2, 0, 0);

        global.merge_from(&part, 2).unwrap();
        assert_eq!(global.get(2, 1, 0), 1);
        assert_eq!(global.get(4, 0, 0), 2);
        assert_eq!(global.total_votes(), 3);
    }

    #[test]
    fn merge_drops_out_of_range_cells_without_failing() {
        let mut global = Accumulator::new(3, 2, 1).unwrap();
        let mut part = Accumulator::new(3, 2, 1).unwrap();
        part.vote(2, 0, 0);
        part.vote(0, 0, 0);

        global.merge_from(&part, 1).unwrap();
        assert_eq!(global.get(1, 0, 0), 1);
        assert_eq!(global.total_votes(), 1);
    }

    #[test]
    fn merge_rejects_mismatched_layers() {
        let mut global = Accumulator::new(3, 2, 1).unwrap();
        let part = Accumulator::new(3, 2, 2).unwrap();
        assert!(global.merge_from(&part, 0).is_err());
    }
}
