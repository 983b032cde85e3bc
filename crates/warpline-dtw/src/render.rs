//! Plain-text rendering of a cost matrix with its warping path highlighted.

use std::io::{self, Write};

use crate::matrix::CostMatrix;
use crate::path::WarpingPath;

/// Width of every rendered cell, brackets and padding included.
const CELL_WIDTH: usize = 15;

/// Write `matrix` to `out`, one row per line.
///
/// Each cost is printed with two decimals and right-aligned in a
/// [`CELL_WIDTH`] column. Cells on `path` are wrapped in brackets; the rest
/// carry a trailing space so digits line up across both forms.
pub(crate) fn render_matrix<W: Write>(
    matrix: &CostMatrix,
    path: &WarpingPath,
    out: &mut W,
) -> io::Result<()> {
    for r in 0..matrix.rows() {
        for (c, value) in matrix.row(r).iter().enumerate() {
            let cell = if path.contains(r, c) {
                format!("[{value:.2}]")
            } else {
                format!("{value:.2} ")
            };
            write!(out, "{cell:>width$}", width = CELL_WIDTH)?;
        }
        writeln!(out)?;
    }
    out.flush()
}
