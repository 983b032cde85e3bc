//! Warping path types for DTW alignment.

/// A single cell on a warping path: `row` indexes the long sequence and
/// `col` indexes the short sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WarpingStep {
    /// Index in the long sequence.
    pub row: usize,
    /// Index in the short sequence.
    pub col: usize,
}

impl WarpingStep {
    pub(crate) const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<WarpingStep> for (usize, usize) {
    fn from(step: WarpingStep) -> Self {
        (step.row, step.col)
    }
}

/// An ordered sequence of warping steps from `(0, 0)` to `(m-1, n-1)`.
///
/// Consecutive steps differ by exactly one of `(1, 0)`, `(0, 1)` or `(1, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarpingPath(Vec<WarpingStep>);

impl WarpingPath {
    pub(crate) fn new(steps: Vec<WarpingStep>) -> Self {
        Self(steps)
    }

    /// Return the warping steps as a slice.
    #[must_use]
    pub fn steps(&self) -> &[WarpingStep] {
        &self.0
    }

    /// Return the number of steps in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path contains no steps.
    ///
    /// Paths produced by an alignment always contain at least `(0, 0)`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return true if the cell `(row, col)` lies on the path.
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        // Steps are sorted by (row, col) since both coordinates are monotone.
        self.0.binary_search(&WarpingStep::new(row, col)).is_ok()
    }

    /// Return the path as plain `(row, col)` tuples.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(usize, usize)> {
        self.0.iter().copied().map(Into::into).collect()
    }
}

impl<'a> IntoIterator for &'a WarpingPath {
    type Item = &'a WarpingStep;
    type IntoIter = std::slice::Iter<'a, WarpingStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
