//! The coordinator side of the process-parallel protocol.

use std::io::{Read, Write};
use std::time::{Duration, Instant};

use crate::accum::Accumulator;
use crate::detect::DetectConfig;
use crate::dist::protocol::{self, FromWorker, ToWorker};
use crate::image::EdgeImage;
use crate::partition::{self, DistStrategy};
use crate::trace::{trace_event, trace_span};
use crate::util::{CircleHoughError, CircleHoughResult};

/// A blocking byte-stream connection to one worker.
pub struct WorkerChannel<R, W> {
    rx: R,
    tx: W,
}

impl<R: Read, W: Write> WorkerChannel<R, W> {
    /// Wraps the receive and send halves of a worker connection.
    pub fn new(rx: R, tx: W) -> Self {
        Self { rx, tx }
    }
}

/// Distributes the image, runs the barrier, collects and merges every
/// worker's accumulator. Returns the global accumulator, the voting-phase
/// duration (communication included), and the slowest worker's pure-compute
/// duration.
///
/// The config must already be normalized; one partition is created per
/// channel. Any channel failure aborts the whole run.
pub fn run_coordinator<R: Read, W: Write>(
    edges: &EdgeImage,
    cfg: &DetectConfig,
    mut workers: Vec<WorkerChannel<R, W>>,
) -> CircleHoughResult<(Accumulator, Duration, Duration)> {
    if workers.is_empty() {
        return Err(CircleHoughError::Comm {
            reason: "no worker channels".into(),
        });
    }
    let _span = trace_span!("coordinate", workers = workers.len()).entered();

    let partitions = partition::split(cfg.strategy, edges.width(), cfg.max_radius, workers.len());
    let acc_width = partition::global_acc_width(cfg.strategy, edges.width(), cfg.max_radius);
    let mut global = Accumulator::new(acc_width, edges.height(), cfg.depth())?;

    let vote_started = Instant::now();

    for (channel, part) in workers.iter_mut().zip(&partitions) {
        let payload = match cfg.strategy {
            DistStrategy::ReplicateFull => edges.clone(),
            DistStrategy::CropWithHalo => edges.crop_columns(part.image_x0, part.image_width)?,
        };
        protocol::send(
            &mut channel.tx,
            &ToWorker::Job {
                partition: *part,
                edges: payload,
                min_radius: cfg.min_radius,
                max_radius: cfg.max_radius,
            },
        )?;
    }

    // Barrier: every worker confirms its input before any of them votes, so
    // the reported compute interval excludes distribution.
    for channel in workers.iter_mut() {
        match protocol::recv(&mut channel.rx)? {
            FromWorker::Ready => {}
            FromWorker::Votes { .. } => {
                return Err(CircleHoughError::Comm {
                    reason: "votes received before the start barrier".into(),
                })
            }
        }
    }
    for channel in workers.iter_mut() {
        protocol::send(&mut channel.tx, &ToWorker::Start)?;
    }

    let mut slowest_compute_ns = 0u64;
    for (channel, part) in workers.iter_mut().zip(&partitions) {
        let (index, acc, compute_ns) = match protocol::recv(&mut channel.rx)? {
            FromWorker::Votes {
                index,
                acc,
                compute_ns,
            } => (index, acc, compute_ns),
            FromWorker::Ready => {
                return Err(CircleHoughError::Comm {
                    reason: "duplicate ready message".into(),
                })
            }
        };
        if index != part.index {
            return Err(CircleHoughError::Comm {
                reason: format!("worker returned partition {index}, expected {}", part.index),
            });
        }
        global.merge_from(&acc, part.shift_x)?;
        slowest_compute_ns = slowest_compute_ns.max(compute_ns);
    }

    let voting = vote_started.elapsed();
    trace_event!(
        "merged",
        total_votes = global.total_votes(),
        compute_ns = slowest_compute_ns
    );
    Ok((global, voting, Duration::from_nanos(slowest_compute_ns)))
}
