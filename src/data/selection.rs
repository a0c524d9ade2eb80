//! Selection state: the coordinate window shown in the surface view plus the
//! focus indices that pick the two cross-sections.
//!
//! Any candidate is turned into a valid [`SelectionState`] by [`normalize`],
//! which repairs rather than rejects: inverted windows are reordered, bounds
//! are clamped to the grid extent and focus indices are rounded and clamped.

use serde::{Deserialize, Serialize};

use super::grid::{Axis, Grid};

/// An unvalidated selection, as produced by sliders, zoom gestures or clicks.
///
/// Every field is a plain number; nothing is guaranteed until the candidate
/// goes through [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionCandidate {
    pub col_min: f64,
    pub col_max: f64,
    pub row_min: f64,
    pub row_max: f64,
    pub col_index: f64,
    pub row_index: f64,
}

/// A selection that is valid against a particular grid.
///
/// After [`normalize`]: `col_min <= col_max` and `row_min <= row_max`, both
/// windows lie inside the grid extent, and the focus indices are in range.
/// The focus indices need not fall inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub col_min: f64,
    pub col_max: f64,
    pub row_min: f64,
    pub row_max: f64,
    pub col_index: usize,
    pub row_index: usize,
}

impl SelectionState {
    /// Full-extent window with the focus on the first row and column.
    pub fn full_extent(grid: &Grid) -> Self {
        let (col_min, col_max) = grid.extent(Axis::Column);
        let (row_min, row_max) = grid.extent(Axis::Row);
        Self {
            col_min,
            col_max,
            row_min,
            row_max,
            col_index: 0,
            row_index: 0,
        }
    }

    /// Full-extent window focused on the given indices (normalized).
    pub fn with_focus(grid: &Grid, col_index: f64, row_index: f64) -> Self {
        let full = Self::full_extent(grid);
        normalize(
            grid,
            &SelectionCandidate {
                col_index,
                row_index,
                ..SelectionCandidate::from(full)
            },
        )
    }

    /// Window bounds on `axis` as `(min, max)`.
    pub fn window(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::Column => (self.col_min, self.col_max),
            Axis::Row => (self.row_min, self.row_max),
        }
    }

    /// Focus index on `axis`.
    pub fn focus(&self, axis: Axis) -> usize {
        match axis {
            Axis::Column => self.col_index,
            Axis::Row => self.row_index,
        }
    }

    /// Whether any window bound differs from `other`.
    pub fn window_differs(&self, other: &SelectionState) -> bool {
        self.col_min != other.col_min
            || self.col_max != other.col_max
            || self.row_min != other.row_min
            || self.row_max != other.row_max
    }

    /// Whether either focus index differs from `other`.
    pub fn focus_differs(&self, other: &SelectionState) -> bool {
        self.col_index != other.col_index || self.row_index != other.row_index
    }
}

impl From<SelectionState> for SelectionCandidate {
    fn from(s: SelectionState) -> Self {
        Self {
            col_min: s.col_min,
            col_max: s.col_max,
            row_min: s.row_min,
            row_max: s.row_max,
            col_index: s.col_index as f64,
            row_index: s.row_index as f64,
        }
    }
}

/// A partial update: `None` fields keep the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectionUpdate {
    pub col_min: Option<f64>,
    pub col_max: Option<f64>,
    pub row_min: Option<f64>,
    pub row_max: Option<f64>,
    pub col_index: Option<f64>,
    pub row_index: Option<f64>,
}

impl SelectionUpdate {
    /// Replace the window on one axis.
    pub fn window(axis: Axis, min: f64, max: f64) -> Self {
        match axis {
            Axis::Column => Self {
                col_min: Some(min),
                col_max: Some(max),
                ..Self::default()
            },
            Axis::Row => Self {
                row_min: Some(min),
                row_max: Some(max),
                ..Self::default()
            },
        }
    }

    /// Replace one or both focus indices.
    pub fn focus(col_index: Option<f64>, row_index: Option<f64>) -> Self {
        Self {
            col_index,
            row_index,
            ..Self::default()
        }
    }

    /// Replace every field with the values of `state`.
    pub fn replace_all(state: &SelectionState) -> Self {
        Self {
            col_min: Some(state.col_min),
            col_max: Some(state.col_max),
            row_min: Some(state.row_min),
            row_max: Some(state.row_max),
            col_index: Some(state.col_index as f64),
            row_index: Some(state.row_index as f64),
        }
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: SelectionUpdate) -> Self {
        Self {
            col_min: other.col_min.or(self.col_min),
            col_max: other.col_max.or(self.col_max),
            row_min: other.row_min.or(self.row_min),
            row_max: other.row_max.or(self.row_max),
            col_index: other.col_index.or(self.col_index),
            row_index: other.row_index.or(self.row_index),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge onto `current`, producing a full candidate.
    pub fn apply_to(&self, current: &SelectionState) -> SelectionCandidate {
        SelectionCandidate {
            col_min: self.col_min.unwrap_or(current.col_min),
            col_max: self.col_max.unwrap_or(current.col_max),
            row_min: self.row_min.unwrap_or(current.row_min),
            row_max: self.row_max.unwrap_or(current.row_max),
            col_index: self.col_index.unwrap_or(current.col_index as f64),
            row_index: self.row_index.unwrap_or(current.row_index as f64),
        }
    }
}

/// Repair `candidate` against `grid`.
///
/// Total and idempotent. A window collapsed to a single point stays
/// collapsed.
pub fn normalize(grid: &Grid, candidate: &SelectionCandidate) -> SelectionState {
    let (col_min, col_max) = clamp_window(
        candidate.col_min,
        candidate.col_max,
        grid.extent(Axis::Column),
    );
    let (row_min, row_max) = clamp_window(
        candidate.row_min,
        candidate.row_max,
        grid.extent(Axis::Row),
    );
    SelectionState {
        col_min,
        col_max,
        row_min,
        row_max,
        col_index: round_clamp_index(candidate.col_index, grid.cols()),
        row_index: round_clamp_index(candidate.row_index, grid.rows()),
    }
}

/// Order a window pair and clamp both ends into `[lo, hi]`.
///
/// A NaN bound falls back to the matching extent edge.
fn clamp_window(a: f64, b: f64, (lo, hi): (f64, f64)) -> (f64, f64) {
    let (a, b) = match (a.is_nan(), b.is_nan()) {
        (false, false) => (a, b),
        (true, false) => (lo, b),
        (false, true) => (a, hi),
        (true, true) => (lo, hi),
    };
    (a.min(b).clamp(lo, hi), a.max(b).clamp(lo, hi))
}

/// Round `index` to the nearest integer and clamp it into `[0, len - 1]`.
///
/// NaN maps to 0. `len` must be at least 1.
pub fn round_clamp_index(index: f64, len: usize) -> usize {
    let last = len.saturating_sub(1);
    if index.is_nan() {
        return 0;
    }
    let rounded = index.round();
    if rounded <= 0.0 {
        0
    } else if rounded >= last as f64 {
        last
    } else {
        rounded as usize
    }
}

/// Index of the coordinate nearest to `target`.
///
/// Scans in index order and only replaces the best match on a strictly
/// smaller distance, so ties go to the lowest index. Empty input yields 0.
pub fn nearest_index(coords: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, &c) in coords.iter().enumerate() {
        let d = (c - target).abs();
        if d < best_distance {
            best = i;
            best_distance = d;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cols: usize, rows: usize) -> Grid {
        let cl = (0..cols).map(|i| format!("c{i}")).collect();
        let rl = (0..rows).map(|i| format!("r{i}")).collect();
        Grid::from_fn(rl, cl, |c, r| (c + r) as f64).unwrap()
    }

    fn candidate(col: (f64, f64), row: (f64, f64), idx: (f64, f64)) -> SelectionCandidate {
        SelectionCandidate {
            col_min: col.0,
            col_max: col.1,
            row_min: row.0,
            row_max: row.1,
            col_index: idx.0,
            row_index: idx.1,
        }
    }

    #[test]
    fn focus_index_is_clamped() {
        let g = grid(9, 6);
        let low = normalize(&g, &candidate((0.0, 8.0), (0.0, 5.0), (-5.0, -1.0)));
        assert_eq!(low.col_index, 0);
        assert_eq!(low.row_index, 0);
        let high = normalize(&g, &candidate((0.0, 8.0), (0.0, 5.0), (19.0, 60.0)));
        assert_eq!(high.col_index, 8);
        assert_eq!(high.row_index, 5);
    }

    #[test]
    fn focus_index_is_rounded() {
        let g = grid(9, 6);
        let s = normalize(&g, &candidate((0.0, 8.0), (0.0, 5.0), (3.6, 2.4)));
        assert_eq!((s.col_index, s.row_index), (4, 2));
    }

    #[test]
    fn inverted_window_is_reordered() {
        let g = grid(9, 6);
        let s = normalize(&g, &candidate((8.0, 2.0), (5.0, 1.0), (0.0, 0.0)));
        assert_eq!((s.col_min, s.col_max), (2.0, 8.0));
        assert_eq!((s.row_min, s.row_max), (1.0, 5.0));
    }

    #[test]
    fn window_is_clamped_and_point_preserved() {
        let g = grid(9, 6);
        let s = normalize(&g, &candidate((-3.0, -3.0), (0.0, 5.0), (3.0, 2.0)));
        assert_eq!((s.col_min, s.col_max), (0.0, 0.0));
        let s = normalize(&g, &candidate((2.5, 2.5), (-10.0, 10.0), (3.0, 2.0)));
        assert_eq!((s.col_min, s.col_max), (2.5, 2.5));
        assert_eq!((s.row_min, s.row_max), (0.0, 5.0));
    }

    #[test]
    fn nan_inputs_are_repaired() {
        let g = grid(4, 3);
        let s = normalize(
            &g,
            &candidate((f64::NAN, 2.0), (1.0, f64::NAN), (f64::NAN, f64::NAN)),
        );
        assert_eq!((s.col_min, s.col_max), (0.0, 2.0));
        assert_eq!((s.row_min, s.row_max), (1.0, 2.0));
        assert_eq!((s.col_index, s.row_index), (0, 0));
    }

    #[test]
    fn normalize_is_idempotent_on_example() {
        let g = grid(9, 6);
        let once = normalize(&g, &candidate((12.0, -4.0), (2.2, 2.1), (7.5, -0.4)));
        let twice = normalize(&g, &once.into());
        assert_eq!(once, twice);
    }

    #[test]
    fn update_merges_onto_current() {
        let g = grid(9, 6);
        let current = SelectionState::with_focus(&g, 3.0, 2.0);
        let cand = SelectionUpdate::window(Axis::Row, 1.0, 4.0).apply_to(&current);
        assert_eq!(cand.row_min, 1.0);
        assert_eq!(cand.row_max, 4.0);
        assert_eq!(cand.col_max, 8.0);
        assert_eq!(cand.col_index, 3.0);
    }

    #[test]
    fn update_merge_prefers_newer_fields() {
        let a = SelectionUpdate::focus(Some(1.0), Some(2.0));
        let b = SelectionUpdate::focus(None, Some(5.0));
        let merged = a.merge(b);
        assert_eq!(merged.col_index, Some(1.0));
        assert_eq!(merged.row_index, Some(5.0));
        assert!(SelectionUpdate::default().is_empty());
        assert!(!merged.is_empty());
    }

    #[test]
    fn nearest_index_prefers_lowest_on_tie() {
        assert_eq!(nearest_index(&[0.0, 1.0, 2.0], 0.5), 0);
        assert_eq!(nearest_index(&[0.0, 1.0, 2.0], 1.5), 1);
        assert_eq!(nearest_index(&[0.0, 1.0, 2.0], -3.0), 0);
        assert_eq!(nearest_index(&[0.0, 1.0, 2.0], 9.0), 2);
        assert_eq!(nearest_index(&[], 1.0), 0);
    }

    #[test]
    fn round_clamp_handles_edges() {
        assert_eq!(round_clamp_index(-0.5, 5), 0);
        assert_eq!(round_clamp_index(4.49, 5), 4);
        assert_eq!(round_clamp_index(f64::INFINITY, 5), 4);
        assert_eq!(round_clamp_index(2.0, 1), 0);
    }
}
