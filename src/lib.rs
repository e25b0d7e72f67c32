//! CircleHough is a CPU-first circle detector built on the circle Hough
//! transform.
//!
//! Edge pixels vote into a 3-D accumulator over (x, y, radius); peaks above a
//! threshold become circle detections, optionally reduced per spatial bin and
//! filtered by a minimum-separation rule. Voting can run sequentially, on a
//! thread pool (`rayon` feature), or across worker processes coordinated over
//! pipes (`dist` module).

pub mod accum;
pub mod detect;
pub mod dist;
pub mod image;
pub mod kernel;
pub mod partition;
pub mod peaks;
#[cfg(feature = "image-io")]
pub mod render;
pub(crate) mod trace;
pub mod util;

pub use accum::Accumulator;
pub use detect::{detect, Circle, DetectConfig, Detection, ExecMode, Timing};
pub use image::{EdgeImage, EDGE};
pub use kernel::VoteParams;
pub use partition::{DistStrategy, Partition};
pub use peaks::{spacing_filter, Candidate, PeakParams};
pub use util::{CircleHoughError, CircleHoughResult};
