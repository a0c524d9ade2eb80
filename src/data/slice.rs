//! One-dimensional cross-sections of a grid.
//!
//! Slices always span the full free axis; only the surface view is windowed.

use serde::Serialize;

use super::grid::{Axis, Grid};
use super::selection::round_clamp_index;

/// A cross-section along one fixed row or column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    /// Axis that was held fixed.
    pub fixed_axis: Axis,
    /// Coordinates of the free axis (full length).
    pub axis_coords: Vec<f64>,
    /// Labels of the free axis (full length).
    pub axis_labels: Vec<String>,
    /// Values along the free axis.
    pub values: Vec<f64>,
    /// Resolved index on the fixed axis.
    pub fixed_index: usize,
    /// Label of the fixed index.
    pub fixed_label: String,
}

impl Slice {
    /// The axis the slice runs along.
    pub fn free_axis(&self) -> Axis {
        self.fixed_axis.other()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `[coord, value]` pairs, ready for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.axis_coords
            .iter()
            .zip(&self.values)
            .map(|(&x, &y)| [x, y])
            .collect()
    }
}

/// Values of every row at column `col_index` (rounded and clamped).
pub fn slice_by_column(grid: &Grid, col_index: f64) -> Slice {
    let fixed_index = round_clamp_index(col_index, grid.cols());
    Slice {
        fixed_axis: Axis::Column,
        axis_coords: grid.row_coords().to_vec(),
        axis_labels: grid.row_labels().to_vec(),
        values: grid.values().iter().map(|row| row[fixed_index]).collect(),
        fixed_index,
        fixed_label: grid.col_labels()[fixed_index].clone(),
    }
}

/// Values of every column at row `row_index` (rounded and clamped).
pub fn slice_by_row(grid: &Grid, row_index: f64) -> Slice {
    let fixed_index = round_clamp_index(row_index, grid.rows());
    Slice {
        fixed_axis: Axis::Row,
        axis_coords: grid.col_coords().to_vec(),
        axis_labels: grid.col_labels().to_vec(),
        values: grid.values()[fixed_index].clone(),
        fixed_index,
        fixed_label: grid.row_labels()[fixed_index].clone(),
    }
}

/// Slice holding `axis` fixed at `index`.
pub fn slice_along(grid: &Grid, axis: Axis, index: usize) -> Slice {
    match axis {
        Axis::Column => slice_by_column(grid, index as f64),
        Axis::Row => slice_by_row(grid, index as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        let cols = (0..9).map(|i| format!("K{i}")).collect();
        let rows = (0..6).map(|i| format!("T{i}")).collect();
        Grid::from_fn(rows, cols, |c, r| (r * 10 + c) as f64).unwrap()
    }

    #[test]
    fn column_slice_rounds_fractional_index() {
        let g = grid();
        let s = slice_by_column(&g, 3.6);
        assert_eq!(s.fixed_index, 4);
        assert_eq!(s.fixed_label, "K4");
        assert_eq!(s.values, vec![4.0, 14.0, 24.0, 34.0, 44.0, 54.0]);
        assert_eq!(s.axis_labels.len(), g.rows());
        assert_eq!(s.free_axis(), Axis::Row);
    }

    #[test]
    fn row_slice_spans_all_columns() {
        let g = grid();
        let s = slice_by_row(&g, 2.0);
        assert_eq!(s.len(), g.cols());
        assert_eq!(s.values[8], 28.0);
        assert_eq!(s.fixed_label, "T2");
        assert_eq!(s.points()[1], [1.0, 21.0]);
    }

    #[test]
    fn out_of_range_indices_are_clamped() {
        let g = grid();
        assert_eq!(slice_by_column(&g, -4.0).fixed_index, 0);
        assert_eq!(slice_by_column(&g, 40.0).fixed_index, 8);
        assert_eq!(slice_by_row(&g, 6.0).fixed_index, 5);
        assert_eq!(slice_by_row(&g, f64::NAN).fixed_index, 0);
    }

    #[test]
    fn slice_along_dispatches_on_axis() {
        let g = grid();
        assert_eq!(slice_along(&g, Axis::Column, 2), slice_by_column(&g, 2.0));
        assert_eq!(slice_along(&g, Axis::Row, 1), slice_by_row(&g, 1.0));
    }
}
