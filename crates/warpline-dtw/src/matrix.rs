//! Accumulated cost matrix: the DTW recurrence and path traceback.

use std::ops::Index;

use crate::path::{WarpingPath, WarpingStep};

/// Dense `rows x cols` matrix of cumulative alignment costs, stored row-major.
///
/// Cell `(r, c)` holds the minimal cost of aligning the first `r + 1` elements
/// of the long sequence with the first `c + 1` elements of the short one.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Allocate a matrix with every cell set to positive infinity.
    fn unfilled(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![f64::INFINITY; rows * cols],
        }
    }

    /// Fill the matrix for `long` against `short` in row-major order.
    ///
    /// Both slices must be non-empty. `distance` is called exactly once per
    /// cell, with the long-sequence element first.
    pub(crate) fn accumulate<T, F>(long: &[T], short: &[T], mut distance: F) -> Self
    where
        F: FnMut(&T, &T) -> f64,
    {
        debug_assert!(!long.is_empty() && !short.is_empty());
        let (m, n) = (long.len(), short.len());
        let mut matrix = Self::unfilled(m, n);

        for (r, a) in long.iter().enumerate() {
            for (c, b) in short.iter().enumerate() {
                let d = distance(a, b);
                let best_prev = match (r, c) {
                    (0, 0) => 0.0,
                    (0, _) => matrix[(0, c - 1)],
                    (_, 0) => matrix[(r - 1, 0)],
                    _ => matrix[(r - 1, c - 1)]
                        .min(matrix[(r - 1, c)])
                        .min(matrix[(r, c - 1)]),
                };
                matrix.data[r * n + c] = d + best_prev;
            }
        }

        matrix
    }

    /// Return the number of rows (length of the long sequence).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Return the number of columns (length of the short sequence).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Return the cost at `(row, col)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    /// Return one row of costs.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "row {row} out of bounds for matrix with {} rows", self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Return the cost of the bottom-right cell, the DTW distance.
    #[must_use]
    pub fn final_cost(&self) -> f64 {
        self.data[self.data.len() - 1]
    }

    /// Walk back from the bottom-right cell to `(0, 0)`.
    ///
    /// Interior cells pick the cheapest of diagonal, up and left. Ties go to
    /// the diagonal, then to up: a later candidate only wins when strictly
    /// smaller than the best so far. Border cells have a single predecessor.
    #[must_use]
    pub fn backtrack(&self) -> WarpingPath {
        let (mut r, mut c) = (self.rows - 1, self.cols - 1);
        let mut steps = Vec::with_capacity(self.rows + self.cols - 1);
        steps.push(WarpingStep::new(r, c));

        while r > 0 || c > 0 {
            (r, c) = match (r, c) {
                (0, _) => (0, c - 1),
                (_, 0) => (r - 1, 0),
                _ => {
                    let mut best = (r - 1, c - 1);
                    let mut best_cost = self[best];
                    if self[(r - 1, c)] < best_cost {
                        best = (r - 1, c);
                        best_cost = self[best];
                    }
                    if self[(r, c - 1)] < best_cost {
                        best = (r, c - 1);
                    }
                    best
                }
            };
            steps.push(WarpingStep::new(r, c));
        }

        steps.reverse();
        WarpingPath::new(steps)
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}
