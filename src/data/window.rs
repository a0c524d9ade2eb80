//! Window extraction: the sub-grid shown by the surface view.

use super::grid::{Axis, Grid};
use super::selection::{nearest_index, normalize, SelectionState};

/// Return the rows and columns of `grid` whose coordinates lie inside the
/// selection window (inclusive).
///
/// The selection is normalized again before use. When the window on an axis
/// contains no coordinate at all, the single index nearest to the window
/// midpoint is kept instead, so the result always has at least one row and
/// one column. Surviving rows and columns keep their original order.
pub fn extract_window(grid: &Grid, selection: &SelectionState) -> Grid {
    let selection = normalize(grid, &(*selection).into());
    let rows = window_indices(grid, Axis::Row, selection.window(Axis::Row));
    let cols = window_indices(grid, Axis::Column, selection.window(Axis::Column));
    grid.gather(&rows, &cols)
}

/// Indices on `axis` whose coordinate lies in `[min, max]`, falling back to
/// the index nearest the midpoint.
pub(crate) fn window_indices(grid: &Grid, axis: Axis, (min, max): (f64, f64)) -> Vec<usize> {
    let coords = grid.coords(axis);
    let inside: Vec<usize> = coords
        .iter()
        .enumerate()
        .filter(|(_, &c)| c >= min && c <= max)
        .map(|(i, _)| i)
        .collect();
    if !inside.is_empty() {
        return inside;
    }
    let midpoint = (min + max) / 2.0;
    vec![nearest_index(coords, midpoint)]
}
