use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::grid::{Axis, Grid};
use super::selection::SelectionState;
use super::slice::Slice;
use crate::error::{Result, VolSliceError};

/// What is currently on screen: the selection, the windowed surface and
/// both cross-sections.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<'a> {
    pub selection: SelectionState,
    pub window: &'a Grid,
    pub by_column: &'a Slice,
    pub by_row: &'a Slice,
}

/// Write a grid as CSV: a header row of column labels, then one line per row
/// starting with the row label.
pub fn write_grid_csv<W: Write>(mut w: W, grid: &Grid) -> std::io::Result<()> {
    for label in grid.col_labels() {
        write!(w, ",{}", csv_field(label))?;
    }
    writeln!(w)?;
    for (label, row) in grid.row_labels().iter().zip(grid.values()) {
        write!(w, "{}", csv_field(label))?;
        for v in row {
            write!(w, ",{}", v)?;
        }
        writeln!(w)?;
    }
    w.flush()
}

/// Write one or more slices as long-format CSV.
pub fn write_slices_csv<W: Write>(mut w: W, slices: &[&Slice]) -> std::io::Result<()> {
    writeln!(w, "fixed_axis,fixed_label,label,coord,value")?;
    for s in slices {
        let axis = match s.fixed_axis {
            Axis::Row => "row",
            Axis::Column => "column",
        };
        for ((label, coord), value) in s.axis_labels.iter().zip(&s.axis_coords).zip(&s.values) {
            writeln!(
                w,
                "{},{},{},{},{}",
                axis,
                csv_field(&s.fixed_label),
                csv_field(label),
                coord,
                value
            )?;
        }
    }
    w.flush()
}

pub fn save_grid_csv<P: AsRef<Path>>(path: P, grid: &Grid) -> Result<()> {
    let path = path.as_ref();
    let f = std::fs::File::create(path).map_err(|e| VolSliceError::io(path, e))?;
    write_grid_csv(std::io::BufWriter::new(f), grid).map_err(|e| VolSliceError::io(path, e))
}

pub fn save_slices_csv<P: AsRef<Path>>(path: P, slices: &[&Slice]) -> Result<()> {
    let path = path.as_ref();
    let f = std::fs::File::create(path).map_err(|e| VolSliceError::io(path, e))?;
    write_slices_csv(std::io::BufWriter::new(f), slices).map_err(|e| VolSliceError::io(path, e))
}

pub fn snapshot_to_json(snapshot: &ViewSnapshot<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn save_snapshot_json<P: AsRef<Path>>(path: P, snapshot: &ViewSnapshot<'_>) -> Result<()> {
    let path = path.as_ref();
    let json = snapshot_to_json(snapshot)?;
    std::fs::write(path, json).map_err(|e| VolSliceError::io(path, e))
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
