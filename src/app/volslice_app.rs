//! The eframe application: lays out the panels, collects gestures and feeds
//! them through the [`SelectionView`].

use std::path::Path;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use eframe::egui;
use tracing::{info, warn};

use super::backend::EguiBackend;
use super::controls_ui::{ControlsPanel, ExportKind};
use super::slice_ui::SlicePanel;
use super::surface_ui::SurfacePanel;
use crate::config::VolSliceConfig;
use crate::controllers::{InteractionController, SelectionView, SliceTitles};
use crate::data::export::{save_grid_csv, save_slices_csv, save_snapshot_json, ViewSnapshot};
use crate::data::grid::Grid;
use crate::error::Result;
use crate::events::{EventController, SelectionChange, SelectionEvent};

pub struct VolSliceApp {
    view: SelectionView<EguiBackend>,
    surface_panel: SurfacePanel,
    by_column_panel: SlicePanel,
    by_row_panel: SlicePanel,
    controls: ControlsPanel,
    changes: Receiver<SelectionChange>,
    last_change: Option<SelectionChange>,
}

impl VolSliceApp {
    /// Build the surface from `cfg` and mount all views.
    pub fn new(cfg: &VolSliceConfig) -> Result<Self> {
        let grid = Arc::new(cfg.build_surface()?);
        let initial = cfg.initial_selection(&grid);
        info!(
            rows = grid.rows(),
            cols = grid.cols(),
            policy = ?cfg.slider_policy,
            "surface ready"
        );

        let events = EventController::new();
        let changes = events.subscribe_all();
        let controller = InteractionController::new(grid, initial, cfg.slider_policy)
            .with_event_controller(events);
        let view = SelectionView::mount(controller, EguiBackend::new(), &SliceTitles::default())?;

        Ok(Self {
            view,
            surface_panel: SurfacePanel::new(&cfg.camera, cfg.colors.window_outline),
            by_column_panel: SlicePanel::new("volslice_by_column", cfg.colors.column_slice),
            by_row_panel: SlicePanel::new("volslice_by_row", cfg.colors.row_slice),
            controls: ControlsPanel::new(cfg.preview.clone()),
            changes,
            last_change: None,
        })
    }

    pub fn view(&self) -> &SelectionView<EguiBackend> {
        &self.view
    }

    /// Run queued gestures through the controller.
    pub fn dispatch_all(&mut self, events: Vec<SelectionEvent>) {
        for event in events {
            if let Err(e) = self.view.dispatch(&event) {
                warn!("failed to refresh views: {e}");
            }
        }
        while let Ok(change) = self.changes.try_recv() {
            self.last_change = Some(change);
        }
    }

    fn export(&mut self, kind: ExportKind) {
        let (name, filter, ext) = match kind {
            ExportKind::SlicesCsv => ("volslice_slices.csv", "CSV", "csv"),
            ExportKind::WindowCsv => ("volslice_window.csv", "CSV", "csv"),
            ExportKind::SnapshotJson => ("volslice_snapshot.json", "JSON", "json"),
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(name)
            .add_filter(filter, &[ext])
            .save_file()
        else {
            return;
        };
        self.controls.status = Some(match self.write_export(kind, &path) {
            Ok(()) => {
                info!(path = %path.display(), "exported");
                format!("Saved {}", path.display())
            }
            Err(e) => {
                warn!("export failed: {e}");
                format!("Export failed: {e}")
            }
        });
    }

    fn write_export(&self, kind: ExportKind, path: &Path) -> Result<()> {
        let controller = self.view.controller();
        match kind {
            ExportKind::SlicesCsv => {
                let (by_column, by_row) = controller.slices();
                save_slices_csv(path, &[&by_column, &by_row])
            }
            ExportKind::WindowCsv => save_grid_csv(path, &controller.window()),
            ExportKind::SnapshotJson => {
                let window = controller.window();
                let (by_column, by_row) = controller.slices();
                let snapshot = ViewSnapshot {
                    selection: *controller.current(),
                    window: &window,
                    by_column: &by_column,
                    by_row: &by_row,
                };
                save_snapshot_json(path, &snapshot)
            }
        }
    }
}

impl eframe::App for VolSliceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();
        let mut export = None;

        {
            let Self {
                view,
                surface_panel,
                by_column_panel,
                by_row_panel,
                controls,
                last_change,
                ..
            } = self;
            let grid: &Grid = view.controller().grid();
            let selection = *view.controller().current();
            let backend = view.backend();
            let (col_handle, row_handle) = view.slice_handles();

            egui::TopBottomPanel::bottom("volslice_status").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    match last_change {
                        Some(change) => ui.small(format!(
                            "last change: {} at {:.1} s",
                            change.kinds, change.timestamp
                        )),
                        None => ui.small("no changes yet"),
                    };
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.small("double click a slice to reset");
                    });
                });
            });

            egui::SidePanel::left("volslice_controls")
                .resizable(true)
                .default_width(340.0)
                .show(ctx, |ui| {
                    export = controls.show(ui, grid, &selection, &mut events);
                });

            egui::CentralPanel::default().show(ctx, |ui| {
                let total = ui.available_height();
                ui.allocate_ui(egui::vec2(ui.available_width(), total * 0.55), |ui| {
                    if let Some(surface) = backend.surface() {
                        surface_panel.show(ui, surface);
                    }
                });
                ui.separator();
                ui.columns(2, |cols| {
                    if let Some(v) = backend.slice(*col_handle) {
                        by_column_panel.show(&mut cols[0], v, &selection, &mut events);
                    }
                    if let Some(v) = backend.slice(*row_handle) {
                        by_row_panel.show(&mut cols[1], v, &selection, &mut events);
                    }
                });
            });
        }

        self.dispatch_all(events);
        if let Some(kind) = export {
            self.export(kind);
        }
    }
}
