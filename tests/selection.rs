use proptest::prelude::*;
use volslice::{
    default_surface, extract_window, normalize, slice_by_column, slice_by_row, Grid,
    SelectionCandidate,
};

fn candidate(col: (f64, f64), row: (f64, f64), col_index: f64, row_index: f64) -> SelectionCandidate {
    SelectionCandidate {
        col_min: col.0,
        col_max: col.1,
        row_min: row.0,
        row_max: row.1,
        col_index,
        row_index,
    }
}

#[test]
fn focus_index_is_clamped_at_both_ends() {
    let g = default_surface().unwrap();
    let low = normalize(&g, &candidate((0.0, 8.0), (0.0, 5.0), -5.0, 2.0));
    assert_eq!(low.col_index, 0);
    let high = normalize(&g, &candidate((0.0, 8.0), (0.0, 5.0), 9.0 + 10.0, 2.0));
    assert_eq!(high.col_index, 8);
}

#[test]
fn inverted_window_keeps_both_values() {
    let g = default_surface().unwrap();
    let s = normalize(&g, &candidate((8.0, 2.0), (0.0, 5.0), 3.0, 2.0));
    assert_eq!((s.col_min, s.col_max), (2.0, 8.0));
}

#[test]
fn collapsed_window_left_of_grid() {
    let g = default_surface().unwrap();
    let s = normalize(&g, &candidate((-3.0, -3.0), (0.0, 5.0), 3.0, 2.0));
    assert_eq!((s.col_min, s.col_max), (0.0, 0.0));
    assert_eq!((s.col_index, s.row_index), (3, 2));

    let w = extract_window(&g, &s);
    assert_eq!(w.cols(), 1);
    assert_eq!(w.col_labels(), &["80".to_string()]);
    assert_eq!(w.rows(), 6);
    for (r, row) in w.values().iter().enumerate() {
        assert_eq!(row[0], g.values()[r][0]);
    }
}

#[test]
fn fractional_column_slice_rounds() {
    let g = default_surface().unwrap();
    let s = slice_by_column(&g, 3.6);
    assert_eq!(s.fixed_index, 4);
    assert_eq!(s.fixed_label, "100");
    let expected: Vec<f64> = g.values().iter().map(|row| row[4]).collect();
    assert_eq!(s.values, expected);
}

#[test]
fn window_between_coordinates_falls_back_to_midpoint() {
    let g = default_surface().unwrap();
    let s = normalize(&g, &candidate((2.2, 2.4), (1.1, 1.2), 0.0, 0.0));
    let w = extract_window(&g, &s);
    assert_eq!(w.col_coords(), &[2.0]);
    assert_eq!(w.row_coords(), &[1.0]);
    assert_eq!(w.values()[0][0], g.values()[1][2]);
}

/// Strictly increasing coordinates: an offset plus cumulative positive gaps.
fn uneven_grid() -> Grid {
    let strikes = [80.0, 85.0, 90.0, 100.0, 120.0];
    let expiries = [0.0, 0.25, 1.0, 3.0];
    Grid::new(
        expiries.iter().map(|e| format!("{e}Y")).collect(),
        strikes.iter().map(|k| k.to_string()).collect(),
        expiries.to_vec(),
        strikes.to_vec(),
        expiries
            .iter()
            .map(|e| strikes.iter().map(|k| k / 100.0 + e).collect())
            .collect(),
    )
    .unwrap()
}

#[test]
fn uneven_coordinates_filter_by_value() {
    let g = uneven_grid();
    let s = normalize(&g, &candidate((86.0, 130.0), (-1.0, 0.5), 2.0, 1.0));
    assert_eq!((s.col_min, s.col_max), (86.0, 120.0));
    assert_eq!((s.row_min, s.row_max), (0.0, 0.5));

    let w = extract_window(&g, &s);
    assert_eq!(w.col_coords(), &[90.0, 100.0, 120.0]);
    assert_eq!(w.row_coords(), &[0.0, 0.25]);
    assert_eq!(w.values()[1][0], g.values()[1][2]);
}

#[test]
fn uneven_gap_tie_keeps_lower_coordinate() {
    let g = uneven_grid();
    // Midpoint 95 is equally far from 90 and 100.
    let s = normalize(&g, &candidate((91.0, 99.0), (0.5, 0.9), 0.0, 0.0));
    let w = extract_window(&g, &s);
    assert_eq!(w.col_coords(), &[90.0]);
    // Midpoint 0.7 is nearer 1.0 than 0.25.
    assert_eq!(w.row_coords(), &[1.0]);
}

fn arb_coords() -> impl Strategy<Value = Vec<f64>> {
    (-10.0f64..10.0, prop::collection::vec(0.1f64..5.0, 1..8)).prop_map(|(start, gaps)| {
        gaps.iter()
            .scan(start, |acc, gap| {
                let at = *acc;
                *acc += gap;
                Some(at)
            })
            .collect()
    })
}

fn arb_grid() -> impl Strategy<Value = Grid> {
    (arb_coords(), arb_coords()).prop_map(|(col_coords, row_coords)| {
        let values = (0..row_coords.len())
            .map(|r| (0..col_coords.len()).map(|c| (c * 10 + r) as f64).collect())
            .collect();
        Grid::new(
            (0..row_coords.len()).map(|r| format!("R{r}")).collect(),
            (0..col_coords.len()).map(|c| format!("C{c}")).collect(),
            row_coords,
            col_coords,
            values,
        )
        .unwrap()
    })
}

fn arb_candidate() -> impl Strategy<Value = SelectionCandidate> {
    let bound = -20.0f64..20.0;
    let index = -20.0f64..20.0;
    (
        bound.clone(),
        bound.clone(),
        bound.clone(),
        bound,
        index.clone(),
        index,
    )
        .prop_map(|(a, b, c, d, i, j)| candidate((a, b), (c, d), i, j))
}

proptest! {
    #[test]
    fn normalize_is_idempotent(g in arb_grid(), s in arb_candidate()) {
        let once = normalize(&g, &s);
        let twice = normalize(&g, &once.into());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn window_stays_inside_selection(g in arb_grid(), s in arb_candidate()) {
        let s = normalize(&g, &s);
        let w = extract_window(&g, &s);
        prop_assert!(w.cols() >= 1 && w.rows() >= 1);

        let cols_inside = w.col_coords().iter().all(|&c| c >= s.col_min && c <= s.col_max);
        prop_assert!(cols_inside || w.cols() == 1);
        let rows_inside = w.row_coords().iter().all(|&r| r >= s.row_min && r <= s.row_max);
        prop_assert!(rows_inside || w.rows() == 1);

        prop_assert!(w.col_coords().windows(2).all(|p| p[0] < p[1]));
        prop_assert!(w.row_coords().windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn slices_span_the_free_axis(g in arb_grid(), i in -20.0f64..20.0) {
        let by_col = slice_by_column(&g, i);
        prop_assert_eq!(by_col.len(), g.rows());
        prop_assert!(by_col.fixed_index < g.cols());

        let by_row = slice_by_row(&g, i);
        prop_assert_eq!(by_row.len(), g.cols());
        prop_assert!(by_row.fixed_index < g.rows());
    }
}
