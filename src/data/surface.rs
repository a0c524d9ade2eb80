//! Default synthetic option surface.
//!
//! The values are illustrative only: a smooth function of the strike and
//! expiry positions chosen so neighbouring slices look clearly different.

use std::f64::consts::PI;

use super::grid::Grid;
use crate::error::Result;

/// Default strike labels (columns).
pub const STRIKE_LABELS: [&str; 9] = ["80", "85", "90", "95", "100", "105", "110", "115", "120"];

/// Default expiry labels (rows).
pub const EXPIRY_LABELS: [&str; 6] = ["1M", "2M", "3M", "6M", "1Y", "2Y"];

/// Surface value at `(col_index, row_index)` for a `cols x rows` grid.
pub fn option_surface_value(col_index: usize, row_index: usize, cols: usize, rows: usize) -> f64 {
    let strike = col_index as f64 / cols.max(1) as f64;
    let expiry = row_index as f64 / rows.max(1) as f64;
    0.3 + 0.2 * (strike * PI * 2.0).sin() * (expiry * PI).cos() + 0.15 * expiry - 0.1 * strike
}

/// Build the option surface grid for the given strike (column) and expiry
/// (row) labels.
pub fn generate_option_surface<S: AsRef<str>>(strikes: &[S], expiries: &[S]) -> Result<Grid> {
    let cols = strikes.len();
    let rows = expiries.len();
    Grid::from_fn(
        expiries.iter().map(|s| s.as_ref().to_string()).collect(),
        strikes.iter().map(|s| s.as_ref().to_string()).collect(),
        |c, r| option_surface_value(c, r, cols, rows),
    )
}

/// The 6 x 9 default surface.
pub fn default_surface() -> Result<Grid> {
    generate_option_surface(&STRIKE_LABELS, &EXPIRY_LABELS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_surface_shape() {
        let g = default_surface().unwrap();
        assert_eq!(g.cols(), 9);
        assert_eq!(g.rows(), 6);
        assert_eq!(g.col_labels()[4], "100");
        assert_eq!(g.row_labels()[5], "2Y");
    }

    #[test]
    fn corner_value_matches_formula() {
        let g = default_surface().unwrap();
        // strike = 0, expiry = 0: only the constant term remains.
        assert!((g.value(0, 0).unwrap() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn neighbouring_column_slices_differ() {
        let g = default_surface().unwrap();
        let a: Vec<f64> = g.values().iter().map(|r| r[1]).collect();
        let b: Vec<f64> = g.values().iter().map(|r| r[2]).collect();
        assert_ne!(a, b);
    }
}
