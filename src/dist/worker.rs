//! The worker side of the process-parallel protocol.

use std::io::{Read, Write};
use std::time::Instant;

use crate::accum::Accumulator;
use crate::dist::protocol::{self, FromWorker, ToWorker};
use crate::kernel::{scalar, VoteParams};
use crate::util::{CircleHoughError, CircleHoughResult};

/// Runs one worker session over the given streams: receive a job, signal
/// ready, wait for the start barrier, vote, return the accumulator.
///
/// The host binary calls this when re-invoked in worker mode, with the child
/// process's stdin/stdout as the streams.
pub fn run_worker<R: Read, W: Write>(mut input: R, mut output: W) -> CircleHoughResult<()> {
    let (partition, edges, min_radius, max_radius) = match protocol::recv(&mut input)? {
        ToWorker::Job {
            partition,
            edges,
            min_radius,
            max_radius,
        } => (partition, edges, min_radius, max_radius),
        ToWorker::Start => {
            return Err(CircleHoughError::Comm {
                reason: "start received before job".into(),
            })
        }
    };

    let params = VoteParams {
        min_radius,
        max_radius,
        axis_shift: partition.axis_shift,
    };
    let mut acc = Accumulator::new(partition.acc_width, edges.height(), params.depth())?;

    protocol::send(&mut output, &FromWorker::Ready)?;
    match protocol::recv(&mut input)? {
        ToWorker::Start => {}
        ToWorker::Job { .. } => {
            return Err(CircleHoughError::Comm {
                reason: "second job received before start".into(),
            })
        }
    }

    let compute_started = Instant::now();
    let (x0, x1) = partition.vote_columns();
    scalar::vote_columns(&edges, x0, x1, &params, &mut acc);
    let compute_ns = compute_started.elapsed().as_nanos() as u64;

    protocol::send(
        &mut output,
        &FromWorker::Votes {
            index: partition.index,
            acc,
            compute_ns,
        },
    )
}
