//! Process-parallel detection.
//!
//! One coordinating process partitions the image, ships each worker process
//! its input over a pipe, releases a barrier once every worker is ready,
//! then collects and merges the private accumulators. Workers never extract
//! peaks; the coordinator never votes. There is no partial-failure recovery:
//! a failed send, receive, or worker aborts the whole run.
//!
//! Workers are children of the host binary re-invoked in a worker mode that
//! calls [`run_worker`] on its stdin/stdout (see the CLI's hidden `--worker`
//! flag).

use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::Instant;

use crate::detect::{self, DetectConfig, Detection};
use crate::image::EdgeImage;
use crate::partition;
use crate::util::{CircleHoughError, CircleHoughResult};

mod coordinator;
mod protocol;
mod worker;

pub use coordinator::{run_coordinator, WorkerChannel};
pub use worker::run_worker;

/// How to start one worker process.
#[derive(Clone, Debug)]
pub struct WorkerLauncher {
    program: PathBuf,
    args: Vec<String>,
}

impl WorkerLauncher {
    /// Launches `program` with `args` for each worker.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Launches the current executable with `args` (the usual case: the host
    /// binary re-invoking itself in worker mode).
    pub fn current_exe(args: Vec<String>) -> CircleHoughResult<Self> {
        let program = std::env::current_exe().map_err(|err| CircleHoughError::Comm {
            reason: format!("current_exe: {err}"),
        })?;
        Ok(Self::new(program, args))
    }

    fn spawn(&self) -> CircleHoughResult<SpawnedWorker> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|err| CircleHoughError::Comm {
                reason: format!("spawn {}: {err}", self.program.display()),
            })?;
        let stdin = child.stdin.take().ok_or_else(|| CircleHoughError::Comm {
            reason: "worker stdin unavailable".into(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| CircleHoughError::Comm {
            reason: "worker stdout unavailable".into(),
        })?;
        Ok(SpawnedWorker {
            child,
            channel: Some(WorkerChannel::new(
                BufReader::new(stdout),
                BufWriter::new(stdin),
            )),
        })
    }
}

struct SpawnedWorker {
    child: Child,
    channel: Option<WorkerChannel<BufReader<ChildStdout>, BufWriter<ChildStdin>>>,
}

/// Runs the full pipeline with process-parallel voting.
///
/// Spawns `worker_count` processes via `launcher` (clamped so no worker gets
/// an empty stripe), coordinates them, and finishes extraction and filtering
/// locally.
pub fn detect(
    edges: &EdgeImage,
    config: &DetectConfig,
    launcher: &WorkerLauncher,
) -> CircleHoughResult<Detection> {
    let cfg = config.normalized();
    let worker_count = cfg.worker_count.min(edges.width()).max(1);
    let started = Instant::now();

    let mut spawned = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        match launcher.spawn() {
            Ok(worker) => spawned.push(worker),
            Err(err) => {
                kill_all(&mut spawned);
                return Err(err);
            }
        }
    }

    let channels: Vec<_> = spawned
        .iter_mut()
        .map(|worker| worker.channel.take().expect("channel taken once"))
        .collect();
    let result = run_coordinator(edges, &cfg, channels);

    let (acc, voting, compute) = match result {
        Ok(parts) => parts,
        Err(err) => {
            kill_all(&mut spawned);
            return Err(err);
        }
    };

    // Channels are closed once the coordinator returns; workers exit on EOF.
    for worker in &mut spawned {
        let status = worker.child.wait().map_err(|err| CircleHoughError::Comm {
            reason: format!("wait: {err}"),
        })?;
        if !status.success() {
            return Err(CircleHoughError::Comm {
                reason: format!("worker exited with {status}"),
            });
        }
    }

    let axis_shift = partition::axis_shift(cfg.strategy, cfg.max_radius);
    Ok(detect::finish(&acc, axis_shift, &cfg, started, voting, compute))
}

fn kill_all(spawned: &mut [SpawnedWorker]) {
    for worker in spawned {
        let _ = worker.child.kill();
        let _ = worker.child.wait();
    }
}
