//! Message types and framing for the worker-process protocol.
//!
//! Frames are bincode-encoded over whatever byte stream connects the
//! coordinator to a worker (child-process pipes in production, in-memory
//! pipes in tests). Sends and receives are blocking; any encode, decode, or
//! I/O failure is fatal to the run.

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::accum::Accumulator;
use crate::image::EdgeImage;
use crate::partition::Partition;
use crate::util::{CircleHoughError, CircleHoughResult};

/// Coordinator-to-worker messages.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) enum ToWorker {
    /// Everything a worker needs to vote: its partition, its view of the
    /// image (full image or cropped stripe), and the radius band.
    Job {
        partition: Partition,
        edges: EdgeImage,
        min_radius: usize,
        max_radius: usize,
    },
    /// Barrier release: all workers have their input, start voting.
    Start,
}

/// Worker-to-coordinator messages.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) enum FromWorker {
    /// Input received and the private accumulator is allocated.
    Ready,
    /// Voting finished.
    Votes {
        index: usize,
        acc: Accumulator,
        compute_ns: u64,
    },
}

pub(crate) fn send<T: Serialize, W: Write>(writer: &mut W, message: &T) -> CircleHoughResult<()> {
    bincode::serde::encode_into_std_write(message, writer, bincode::config::standard()).map_err(
        |err| CircleHoughError::Comm {
            reason: format!("send: {err}"),
        },
    )?;
    writer.flush().map_err(|err| CircleHoughError::Comm {
        reason: format!("flush: {err}"),
    })
}

pub(crate) fn recv<T: DeserializeOwned, R: Read>(reader: &mut R) -> CircleHoughResult<T> {
    bincode::serde::decode_from_std_read(reader, bincode::config::standard()).map_err(|err| {
        CircleHoughError::Comm {
            reason: format!("recv: {err}"),
        }
    })
}
