//! Pipeline configuration and the in-process detection driver.

use std::time::{Duration, Instant};

use crate::accum::Accumulator;
use crate::image::EdgeImage;
use crate::kernel;
use crate::partition::DistStrategy;
use crate::peaks::{self, PeakParams};
use crate::trace::{trace_event, trace_span};
use crate::util::{CircleHoughError, CircleHoughResult};

/// Execution mode for the voting phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    /// One thread, one accumulator.
    Sequential,
    /// A rayon pool sharing one atomic accumulator (`rayon` feature).
    Threads,
    /// Worker processes coordinated through [`crate::dist`].
    Processes,
}

/// All detection parameters. Invalid combinations are corrected by
/// [`DetectConfig::normalized`] before the pipeline runs; they are never
/// runtime errors.
#[derive(Clone, Copy, Debug)]
pub struct DetectConfig {
    /// Smallest radius searched, inclusive.
    pub min_radius: usize,
    /// Largest radius searched, inclusive.
    pub max_radius: usize,
    /// Minimum votes for an accumulator cell to become a candidate.
    pub peak_threshold: u32,
    /// Reduce each spatial tile to its single local maximum.
    pub use_binning: bool,
    /// Tile side for binning.
    pub bin_size: usize,
    /// Drop candidates closer than `spacing_size` to any other candidate.
    pub use_spacing: bool,
    /// Minimum center separation for the spacing filter.
    pub spacing_size: usize,
    /// Voting execution mode.
    pub mode: ExecMode,
    /// Pool size for [`ExecMode::Threads`].
    pub thread_count: usize,
    /// Worker process count for [`ExecMode::Processes`].
    pub worker_count: usize,
    /// Data distribution for [`ExecMode::Processes`].
    pub strategy: DistStrategy,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            min_radius: 15,
            max_radius: 30,
            peak_threshold: 125,
            use_binning: true,
            bin_size: 32,
            use_spacing: true,
            spacing_size: 40,
            mode: ExecMode::Sequential,
            thread_count: 4,
            worker_count: 2,
            strategy: DistStrategy::ReplicateFull,
        }
    }
}

impl DetectConfig {
    /// Clamps every field into its valid range.
    pub fn normalized(&self) -> Self {
        let mut cfg = *self;
        cfg.min_radius = cfg.min_radius.max(1);
        cfg.max_radius = cfg.max_radius.max(cfg.min_radius);
        cfg.bin_size = cfg.bin_size.max(1);
        cfg.thread_count = cfg.thread_count.max(1);
        cfg.worker_count = cfg.worker_count.max(1);
        cfg
    }

    /// Number of radius layers searched.
    pub fn depth(&self) -> usize {
        self.max_radius - self.min_radius + 1
    }
}

/// One detected circle in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Circle {
    /// Center column.
    pub x: usize,
    /// Center row.
    pub y: usize,
    /// Radius in pixels.
    pub radius: usize,
}

/// Per-run timing telemetry.
#[derive(Clone, Copy, Debug, Default)]
pub struct Timing {
    /// Whole pipeline, voting through filtering.
    pub total: Duration,
    /// Voting phase including any worker communication.
    pub voting: Duration,
    /// Pure voting compute, communication excluded. For process runs this is
    /// the slowest worker's interval between the start barrier and its last
    /// vote; for in-process runs it equals `voting`.
    pub voting_compute: Duration,
}

/// Result of one detection run.
#[derive(Clone, Debug)]
pub struct Detection {
    /// Kept circles, in extraction scan order.
    pub circles: Vec<Circle>,
    /// Timing telemetry for this run.
    pub timing: Timing,
}

impl Detection {
    /// Number of kept detections.
    pub fn count(&self) -> usize {
        self.circles.len()
    }
}

/// Runs the full pipeline in-process (sequential or thread-parallel).
///
/// [`ExecMode::Processes`] needs a worker launcher and lives in
/// [`crate::dist::detect`].
pub fn detect(edges: &EdgeImage, config: &DetectConfig) -> CircleHoughResult<Detection> {
    let cfg = config.normalized();
    let started = Instant::now();
    let _span = trace_span!("detect", mode = ?cfg.mode).entered();

    let vote_started = Instant::now();
    let acc = match cfg.mode {
        ExecMode::Sequential => kernel::vote(edges, cfg.min_radius, cfg.max_radius)?,
        ExecMode::Threads => vote_threads(edges, &cfg)?,
        ExecMode::Processes => {
            return Err(CircleHoughError::Unsupported(
                "process-parallel detection runs through dist::detect",
            ))
        }
    };
    let voting = vote_started.elapsed();

    Ok(finish(&acc, 0, &cfg, started, voting, voting))
}

#[cfg(feature = "rayon")]
fn vote_threads(edges: &EdgeImage, cfg: &DetectConfig) -> CircleHoughResult<Accumulator> {
    kernel::rayon::vote_par(edges, cfg.min_radius, cfg.max_radius, cfg.thread_count)
}

#[cfg(not(feature = "rayon"))]
fn vote_threads(_edges: &EdgeImage, _cfg: &DetectConfig) -> CircleHoughResult<Accumulator> {
    Err(CircleHoughError::Unsupported(
        "thread-parallel voting requires the `rayon` feature",
    ))
}

/// Shared pipeline tail: peak extraction, spacing filter, timing assembly.
pub(crate) fn finish(
    acc: &Accumulator,
    axis_shift: usize,
    cfg: &DetectConfig,
    started: Instant,
    voting: Duration,
    voting_compute: Duration,
) -> Detection {
    let _span = trace_span!("extract", binning = cfg.use_binning).entered();

    let params = PeakParams {
        threshold: cfg.peak_threshold,
        min_radius: cfg.min_radius,
        axis_shift,
        keep_default: !cfg.use_spacing,
    };
    let mut candidates = if cfg.use_binning {
        peaks::extract_binned(acc, &params, cfg.bin_size)
    } else {
        peaks::extract(acc, &params)
    };
    if cfg.use_spacing {
        peaks::spacing_filter(&mut candidates, cfg.spacing_size);
    }

    let circles: Vec<Circle> = candidates
        .iter()
        .filter(|candidate| candidate.keep)
        .map(|candidate| Circle {
            x: candidate.x,
            y: candidate.y,
            radius: candidate.radius,
        })
        .collect();
    trace_event!(
        "detections",
        candidates = candidates.len(),
        kept = circles.len()
    );

    Detection {
        circles,
        timing: Timing {
            total: started.elapsed(),
            voting,
            voting_compute,
        },
    }
}
