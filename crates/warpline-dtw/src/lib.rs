//! Dynamic Time Warping alignment of arbitrary sequences.
//!
//! Pure computation apart from rendering into a caller-supplied writer.
//! Builds the full cumulative cost matrix for two sequences under a
//! caller-supplied distance function, traces the optimal warping path, and
//! renders the matrix as text with the path highlighted.

mod aligner;
mod distance;
mod error;
mod matrix;
mod path;
mod render;
mod sequence;

pub use aligner::{Aligner, DistanceFn};
pub use distance::DtwDistance;
pub use error::{AlignError, Argument};
pub use matrix::CostMatrix;
pub use path::{WarpingPath, WarpingStep};
pub use sequence::Sequence;
