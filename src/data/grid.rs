//! Immutable rectangular dataset indexed by two ordered categorical axes.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VolSliceError};

/// Which of the two grid axes an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Row axis (expiries in the default surface).
    Row,
    /// Column axis (strikes in the default surface).
    Column,
}

impl Axis {
    /// The other axis.
    pub fn other(self) -> Axis {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }
}

/// A rectangular grid of scalar values.
///
/// `values[r][c]` is the scalar at `(col_coords[c], row_coords[r])`.
/// Coordinates are strictly increasing but need not be `0..N-1`.
/// A grid always has at least one row and one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    row_coords: Vec<f64>,
    col_coords: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl Grid {
    /// Build a grid from explicit axes and a row-major value matrix.
    pub fn new(
        row_labels: Vec<String>,
        col_labels: Vec<String>,
        row_coords: Vec<f64>,
        col_coords: Vec<f64>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self> {
        if row_labels.is_empty() || col_labels.is_empty() {
            return Err(VolSliceError::InvalidGrid(format!(
                "grid needs at least one row and one column (got {}x{})",
                row_labels.len(),
                col_labels.len()
            )));
        }
        if row_labels.len() != row_coords.len() {
            return Err(VolSliceError::InvalidGrid(format!(
                "{} row labels but {} row coordinates",
                row_labels.len(),
                row_coords.len()
            )));
        }
        if col_labels.len() != col_coords.len() {
            return Err(VolSliceError::InvalidGrid(format!(
                "{} column labels but {} column coordinates",
                col_labels.len(),
                col_coords.len()
            )));
        }
        if values.len() != row_labels.len() {
            return Err(VolSliceError::InvalidGrid(format!(
                "{} value rows for {} row labels",
                values.len(),
                row_labels.len()
            )));
        }
        if let Some((r, row)) = values
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != col_labels.len())
        {
            return Err(VolSliceError::InvalidGrid(format!(
                "value row {r} has {} entries, expected {}",
                row.len(),
                col_labels.len()
            )));
        }
        check_increasing("row", &row_coords)?;
        check_increasing("column", &col_coords)?;

        Ok(Self {
            row_labels,
            col_labels,
            row_coords,
            col_coords,
            values,
        })
    }

    /// Materialize a grid from label sequences and a value function
    /// `f(col_index, row_index)`. Coordinates are the label positions `0..N-1`.
    pub fn from_fn<F>(row_labels: Vec<String>, col_labels: Vec<String>, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let row_coords: Vec<f64> = (0..row_labels.len()).map(|i| i as f64).collect();
        let col_coords: Vec<f64> = (0..col_labels.len()).map(|i| i as f64).collect();
        let values = (0..row_labels.len())
            .map(|r| (0..col_labels.len()).map(|c| f(c, r)).collect())
            .collect();
        Self::new(row_labels, col_labels, row_coords, col_coords, values)
    }

    /// Gather the sub-grid made of the given row and column indices.
    ///
    /// Indices are taken in the order given; callers pass ascending
    /// subsequences so the result keeps the grid's ordering.
    pub(crate) fn gather(&self, rows: &[usize], cols: &[usize]) -> Grid {
        Grid {
            row_labels: rows.iter().map(|&r| self.row_labels[r].clone()).collect(),
            col_labels: cols.iter().map(|&c| self.col_labels[c].clone()).collect(),
            row_coords: rows.iter().map(|&r| self.row_coords[r]).collect(),
            col_coords: cols.iter().map(|&c| self.col_coords[c]).collect(),
            values: rows
                .iter()
                .map(|&r| cols.iter().map(|&c| self.values[r][c]).collect())
                .collect(),
        }
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    pub fn row_coords(&self) -> &[f64] {
        &self.row_coords
    }

    pub fn col_coords(&self) -> &[f64] {
        &self.col_coords
    }

    /// Row-major value matrix.
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn cols(&self) -> usize {
        self.col_labels.len()
    }

    /// Labels along `axis`.
    pub fn labels(&self, axis: Axis) -> &[String] {
        match axis {
            Axis::Row => &self.row_labels,
            Axis::Column => &self.col_labels,
        }
    }

    /// Coordinates along `axis`.
    pub fn coords(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::Row => &self.row_coords,
            Axis::Column => &self.col_coords,
        }
    }

    /// `(lo, hi)` coordinate extent of `axis`.
    pub fn extent(&self, axis: Axis) -> (f64, f64) {
        let coords = self.coords(axis);
        let first = coords[0];
        let last = coords[coords.len() - 1];
        (first.min(last), first.max(last))
    }

    /// Index of the first label equal to `label` on `axis`.
    pub fn label_index(&self, axis: Axis, label: &str) -> Option<usize> {
        self.labels(axis).iter().position(|l| l == label)
    }

    /// Smallest and largest value in the grid.
    pub fn value_range(&self) -> (f64, f64) {
        self.values
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

fn check_increasing(axis: &str, coords: &[f64]) -> Result<()> {
    if let Some(c) = coords.iter().find(|c| !c.is_finite()) {
        return Err(VolSliceError::InvalidGrid(format!(
            "{axis} coordinate {c} is not finite"
        )));
    }
    if let Some(w) = coords.windows(2).find(|w| w[1] <= w[0]) {
        return Err(VolSliceError::InvalidGrid(format!(
            "{axis} coordinates must be strictly increasing ({} then {})",
            w[0], w[1]
        )));
    }
    Ok(())
}
