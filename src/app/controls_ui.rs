//! Side panel controls: focus sliders, readout, reset/export buttons and the
//! data preview table.

use egui::Ui;
use egui_phosphor::regular::{ARROW_COUNTER_CLOCKWISE, EXPORT};
use egui_table::{HeaderRow, Table, TableDelegate};

use crate::config::PreviewConfig;
use crate::data::grid::Grid;
use crate::data::selection::SelectionState;
use crate::events::SelectionEvent;

/// Export targets offered by the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    SlicesCsv,
    WindowCsv,
    SnapshotJson,
}

pub struct ControlsPanel {
    col_index: usize,
    row_index: usize,
    preview: PreviewConfig,
    /// Result of the last export, shown under the buttons.
    pub status: Option<String>,
}

impl ControlsPanel {
    pub fn new(preview: PreviewConfig) -> Self {
        Self {
            col_index: 0,
            row_index: 0,
            preview,
            status: None,
        }
    }

    /// Draw the controls. Gestures go to `events`; a requested export is
    /// returned.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        grid: &Grid,
        selection: &SelectionState,
        events: &mut Vec<SelectionEvent>,
    ) -> Option<ExportKind> {
        self.col_index = selection.col_index;
        self.row_index = selection.row_index;

        ui.heading("Focus");
        let strike = ui.add(
            egui::Slider::new(&mut self.col_index, 0..=grid.cols() - 1)
                .text("Strike")
                .custom_formatter(|v, _| label_at(grid.col_labels(), v)),
        );
        let expiry = ui.add(
            egui::Slider::new(&mut self.row_index, 0..=grid.rows() - 1)
                .text("Expiry")
                .custom_formatter(|v, _| label_at(grid.row_labels(), v)),
        );
        if strike.changed() || expiry.changed() {
            events.push(SelectionEvent::SliderChanged {
                col_index: self.col_index as f64,
                row_index: self.row_index as f64,
            });
        }

        ui.label(readout(grid, selection));
        ui.label(format!(
            "Window: strike {:.2}..{:.2}, expiry {:.2}..{:.2}",
            selection.col_min, selection.col_max, selection.row_min, selection.row_max
        ));

        if ui
            .button(format!("{ARROW_COUNTER_CLOCKWISE} Reset view"))
            .clicked()
        {
            events.push(SelectionEvent::Reset);
        }

        ui.separator();
        ui.heading("Export");
        let mut export = None;
        ui.horizontal_wrapped(|ui| {
            if ui.button(format!("{EXPORT} Slices CSV")).clicked() {
                export = Some(ExportKind::SlicesCsv);
            }
            if ui.button(format!("{EXPORT} Window CSV")).clicked() {
                export = Some(ExportKind::WindowCsv);
            }
            if ui.button(format!("{EXPORT} Snapshot JSON")).clicked() {
                export = Some(ExportKind::SnapshotJson);
            }
        });
        if let Some(status) = &self.status {
            ui.small(status);
        }

        ui.separator();
        ui.heading("Preview");
        self.preview_table(ui, grid);
        export
    }

    /// Leading corner of the full surface; the window does not affect it.
    fn preview_table(&self, ui: &mut Ui, grid: &Grid) {
        let (rows, cols) = preview_size(grid, &self.preview);
        let mut delegate = PreviewDelegate { grid, cols };

        let mut columns = vec![egui_table::Column::new(48.0)];
        columns.extend((0..cols).map(|_| egui_table::Column::new(56.0)));

        Table::new()
            .id_salt("volslice_preview")
            .num_rows(rows as u64)
            .columns(columns)
            .headers(vec![HeaderRow::new(22.0)])
            .show(ui, &mut delegate);
    }
}

struct PreviewDelegate<'a> {
    grid: &'a Grid,
    cols: usize,
}

impl TableDelegate for PreviewDelegate<'_> {
    fn header_cell_ui(&mut self, ui: &mut Ui, cell: &egui_table::HeaderCellInfo) {
        let col = cell.col_range.start;
        ui.add_space(4.0);
        if col == 0 {
            ui.strong("");
        } else if col <= self.cols {
            ui.strong(&self.grid.col_labels()[col - 1]);
        }
    }

    fn cell_ui(&mut self, ui: &mut Ui, cell: &egui_table::CellInfo) {
        let row = cell.row_nr as usize;
        ui.add_space(4.0);
        if cell.col_nr == 0 {
            if let Some(label) = self.grid.row_labels().get(row) {
                ui.strong(label);
            }
        } else {
            ui.monospace(preview_cell(self.grid, row, cell.col_nr - 1));
        }
    }
}

/// `(rows, cols)` shown by the preview table.
pub fn preview_size(grid: &Grid, preview: &PreviewConfig) -> (usize, usize) {
    (
        grid.rows().min(preview.max_rows),
        grid.cols().min(preview.max_cols),
    )
}

/// "Selected: <strike> / <expiry>".
pub fn readout(grid: &Grid, selection: &SelectionState) -> String {
    let strike = grid
        .col_labels()
        .get(selection.col_index)
        .map(String::as_str)
        .unwrap_or("?");
    let expiry = grid
        .row_labels()
        .get(selection.row_index)
        .map(String::as_str)
        .unwrap_or("?");
    format!("Selected: {strike} / {expiry}")
}

/// Cell text of the preview table (three decimals).
pub fn preview_cell(grid: &Grid, row: usize, col: usize) -> String {
    grid.value(row, col)
        .map(|v| format!("{v:.3}"))
        .unwrap_or_default()
}

fn label_at(labels: &[String], v: f64) -> String {
    labels
        .get(v.round().max(0.0) as usize)
        .cloned()
        .unwrap_or_default()
}
