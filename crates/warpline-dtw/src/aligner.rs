//! DTW alignment of two sequences under a caller-supplied distance.

use std::fmt;
use std::io::Write;

use tracing::{Span, debug, field, instrument};

use crate::distance::DtwDistance;
use crate::error::{AlignError, Argument};
use crate::matrix::CostMatrix;
use crate::path::WarpingPath;
use crate::render::render_matrix;
use crate::sequence::Sequence;

/// Boxed pairwise cost function. The first argument comes from the long
/// sequence, the second from the short one.
pub type DistanceFn<T> = Box<dyn Fn(&T, &T) -> f64 + Send + Sync>;

/// Result of the last successful [`Aligner::compute`].
struct Alignment<T> {
    long: Vec<T>,
    short: Vec<T>,
    swapped: bool,
    matrix: CostMatrix,
}

/// Aligns two sequences with Dynamic Time Warping.
///
/// Holds the distance function, the two sequences of the last computation
/// and their full cost matrix. Every call to [`compute`][Aligner::compute]
/// rebuilds the matrix from scratch; [`path`][Aligner::path] and
/// [`render`][Aligner::render] read the matrix of the last successful call.
///
/// The longer input always becomes the matrix rows ("long" sequence), with
/// ties keeping the first argument as long.
///
/// ```
/// use warpline_dtw::Aligner;
///
/// let mut aligner = Aligner::with_distance(|a: &i32, b: &i32| f64::from((a - b).abs()));
/// let dist = aligner.compute([1, 2, 3], [1, 2, 3, 4]).unwrap();
/// assert_eq!(dist.value(), 1.0);
/// assert_eq!(
///     aligner.path().unwrap().to_pairs(),
///     vec![(0, 0), (1, 1), (2, 2), (3, 2)]
/// );
/// ```
pub struct Aligner<T> {
    distance_fn: Option<DistanceFn<T>>,
    state: Option<Alignment<T>>,
}

impl<T> Aligner<T> {
    /// Create an aligner with no distance function. [`compute`][Aligner::compute]
    /// fails until one is set with [`set_distance`][Aligner::set_distance].
    #[must_use]
    pub fn new() -> Self {
        Self {
            distance_fn: None,
            state: None,
        }
    }

    /// Create an aligner using `distance` as the pairwise cost.
    #[must_use]
    pub fn with_distance<F>(distance: F) -> Self
    where
        F: Fn(&T, &T) -> f64 + Send + Sync + 'static,
    {
        Self {
            distance_fn: Some(Box::new(distance)),
            state: None,
        }
    }

    /// Replace the distance function. Clears any previous result.
    pub fn set_distance<F>(&mut self, distance: F)
    where
        F: Fn(&T, &T) -> f64 + Send + Sync + 'static,
    {
        self.distance_fn = Some(Box::new(distance));
        self.state = None;
    }

    /// Compute the DTW distance between `first` and `second`.
    ///
    /// Any previous result is discarded first, so a failed call leaves the
    /// aligner without a path or matrix.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::InvalidDistanceFunction`] | No distance function configured |
    /// | [`AlignError::EmptySequence`] | `first` or `second` has no elements |
    #[instrument(level = "debug", skip_all, fields(rows = field::Empty, cols = field::Empty))]
    pub fn compute<A, B>(&mut self, first: A, second: B) -> Result<DtwDistance, AlignError>
    where
        A: Into<Vec<T>>,
        B: Into<Vec<T>>,
    {
        self.state = None;

        let distance = self
            .distance_fn
            .as_ref()
            .ok_or(AlignError::InvalidDistanceFunction)?;
        let first = Sequence::new(first.into(), Argument::First)?;
        let second = Sequence::new(second.into(), Argument::Second)?;

        let swapped = second.len() > first.len();
        let (long, short) = if swapped {
            (second.into_inner(), first.into_inner())
        } else {
            (first.into_inner(), second.into_inner())
        };
        let span = Span::current();
        span.record("rows", long.len());
        span.record("cols", short.len());

        let matrix =
            CostMatrix::accumulate(long.as_slice(), short.as_slice(), |a, b| distance(a, b));
        let dist = DtwDistance::new(matrix.final_cost());
        debug!(
            rows = matrix.rows(),
            cols = matrix.cols(),
            swapped,
            distance = dist.value(),
            "cost matrix filled"
        );

        self.state = Some(Alignment {
            long,
            short,
            swapped,
            matrix,
        });
        Ok(dist)
    }

    /// Return the optimal warping path of the last computation.
    ///
    /// Re-walks the stored matrix on every call.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::NotComputed`] | No successful [`compute`][Aligner::compute] yet |
    pub fn path(&self) -> Result<WarpingPath, AlignError> {
        let state = self.state()?;
        let path = state.matrix.backtrack();
        debug!(path_len = path.len(), "warping path traced");
        Ok(path)
    }

    /// Write the cost matrix to `out`, one row per line, with path cells in brackets.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::NotComputed`] | No successful [`compute`][Aligner::compute] yet |
    /// | [`AlignError::Render`] | Writing to `out` failed |
    pub fn render<W: Write>(&self, out: &mut W) -> Result<(), AlignError> {
        let state = self.state()?;
        let path = state.matrix.backtrack();
        render_matrix(&state.matrix, &path, out)?;
        Ok(())
    }

    /// Return the distance of the last successful computation.
    #[must_use]
    pub fn distance(&self) -> Option<DtwDistance> {
        self.state
            .as_ref()
            .map(|s| DtwDistance::new(s.matrix.final_cost()))
    }

    /// Return the cost matrix of the last successful computation.
    #[must_use]
    pub fn matrix(&self) -> Option<&CostMatrix> {
        self.state.as_ref().map(|s| &s.matrix)
    }

    /// Return true if the second argument became the long sequence.
    #[must_use]
    pub fn is_swapped(&self) -> Option<bool> {
        self.state.as_ref().map(|s| s.swapped)
    }

    /// Return the long sequence (matrix rows) of the last computation.
    #[must_use]
    pub fn long(&self) -> Option<&[T]> {
        self.state.as_ref().map(|s| s.long.as_slice())
    }

    /// Return the short sequence (matrix columns) of the last computation.
    #[must_use]
    pub fn short(&self) -> Option<&[T]> {
        self.state.as_ref().map(|s| s.short.as_slice())
    }

    fn state(&self) -> Result<&Alignment<T>, AlignError> {
        self.state.as_ref().ok_or(AlignError::NotComputed)
    }
}

impl<T> Default for Aligner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Aligner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aligner")
            .field("has_distance", &self.distance_fn.is_some())
            .field("shape", &self.matrix().map(|m| (m.rows(), m.cols())))
            .field("swapped", &self.is_swapped())
            .finish()
    }
}
