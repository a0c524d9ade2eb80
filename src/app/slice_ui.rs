//! Slice panel: one cross-section drawn with egui_plot.
//!
//! The x range follows the selection window on the slice's free axis. Box
//! zoom and pan report that range back as a window change; a double click
//! resets everything; clicking a marker focuses that point. A strip of label
//! buttons under the plot stands in for clickable tick labels.

use egui::{Color32, Ui};
use egui_plot::{Line, Plot, Points, VLine};

use super::backend::SliceView;
use crate::data::grid::Axis;
use crate::data::selection::SelectionState;
use crate::events::SelectionEvent;

/// Pick radius for marker clicks, in screen points.
const PICK_RADIUS: f32 = 12.0;

pub struct SlicePanel {
    id: &'static str,
    color: Color32,
}

impl SlicePanel {
    pub fn new(id: &'static str, rgb: [u8; 3]) -> Self {
        Self {
            id,
            color: Color32::from_rgb(rgb[0], rgb[1], rgb[2]),
        }
    }

    /// Draw the panel and collect the gestures it produced this frame.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        view: &SliceView,
        selection: &SelectionState,
        events: &mut Vec<SelectionEvent>,
    ) {
        let slice = &view.slice;
        let free = slice.free_axis();
        let (win_min, win_max) = selection.window(free);
        let focus = selection.focus(free);

        ui.horizontal(|ui| {
            ui.strong(format!("{} slice", view.axis_title));
            ui.label(format!(
                "at {} {}",
                fixed_axis_title(slice.fixed_axis),
                slice.fixed_label
            ));
        });

        let labels = slice.axis_labels.clone();
        let coords = slice.axis_coords.clone();
        let plot = Plot::new(self.id)
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_boxed_zoom(true)
            .allow_double_click_reset(false)
            .height((ui.available_height() - 32.0).max(80.0))
            .x_axis_label(view.axis_title.clone())
            .y_axis_label("Vol")
            .x_axis_formatter(move |x, _range| tick_label(&coords, &labels, x.value));

        let points = slice.points();
        let (y_lo, y_hi) = value_bounds(&slice.values);
        let plot_resp = plot.show(ui, |plot_ui| {
            let resp = plot_ui.response();
            let interacting = resp.dragged() || resp.drag_stopped();
            if !interacting {
                let (lo, hi) = padded_range(win_min, win_max);
                plot_ui.set_plot_bounds_x(lo..=hi);
                let y_pad = (y_hi - y_lo).max(1e-6) * 0.1;
                plot_ui.set_plot_bounds_y(y_lo - y_pad..=y_hi + y_pad);
            }

            plot_ui.line(
                Line::new(view.axis_title.clone(), points.clone())
                    .color(self.color)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new("markers", points.clone())
                    .radius(4.0)
                    .color(self.color),
            );
            if let Some(&x) = slice.axis_coords.get(focus) {
                plot_ui.vline(VLine::new("focus", x).color(Color32::LIGHT_GRAY).width(1.0));
            }

            let r = plot_ui.plot_bounds().range_x();
            (*r.start(), *r.end())
        });

        // The first click of a double click still arrives as a plain click one
        // frame earlier, so a marker under it is focused before the reset.
        let resp = &plot_resp.response;
        match PlotGesture::from_response(resp) {
            PlotGesture::None => {}
            PlotGesture::Reset => events.push(SelectionEvent::Reset),
            PlotGesture::BoxZoom => {
                // Box zoom: bounds are applied next frame, so read the box itself.
                let origin = ui.ctx().input(|i| i.pointer.press_origin());
                if let (Some(a), Some(b)) = (origin, resp.interact_pointer_pos()) {
                    let a = plot_resp.transform.value_from_position(a).x;
                    let b = plot_resp.transform.value_from_position(b).x;
                    events.push(SelectionEvent::WindowChanged {
                        axis: free,
                        min: a.min(b),
                        max: a.max(b),
                    });
                }
            }
            PlotGesture::Pan => {
                let shown = plot_resp.inner;
                if shown.0.is_finite() && shown.1.is_finite() {
                    let (min, max) = panned_window((win_min, win_max), shown);
                    events.push(SelectionEvent::WindowChanged {
                        axis: free,
                        min,
                        max,
                    });
                }
            }
            PlotGesture::Click => {
                if let Some(pos) = resp.interact_pointer_pos() {
                    let hit = points.iter().position(|p| {
                        let screen = plot_resp
                            .transform
                            .position_from_point(&egui_plot::PlotPoint::new(p[0], p[1]));
                        screen.distance(pos) <= PICK_RADIUS
                    });
                    if let Some(index) = hit {
                        events.push(point_selected(free, index));
                    }
                }
            }
        }

        ui.horizontal_wrapped(|ui| {
            for (i, label) in slice.axis_labels.iter().enumerate() {
                if ui.selectable_label(i == focus, label).clicked() {
                    events.push(SelectionEvent::LabelClicked {
                        axis: free,
                        label: label.clone(),
                    });
                }
            }
        });
    }
}

/// The one gesture a plot response is read as, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlotGesture {
    None,
    Reset,
    BoxZoom,
    Pan,
    Click,
}

impl PlotGesture {
    fn from_response(resp: &egui::Response) -> Self {
        Self::classify(
            resp.double_clicked(),
            resp.drag_stopped_by(egui::PointerButton::Secondary),
            resp.drag_stopped(),
            resp.clicked(),
        )
    }

    fn classify(double_click: bool, box_zoom: bool, drag_end: bool, click: bool) -> Self {
        if double_click {
            Self::Reset
        } else if box_zoom {
            Self::BoxZoom
        } else if drag_end {
            Self::Pan
        } else if click {
            Self::Click
        } else {
            Self::None
        }
    }
}

fn fixed_axis_title(axis: Axis) -> &'static str {
    match axis {
        Axis::Column => "strike",
        Axis::Row => "expiry",
    }
}

/// Focus event for the `index`-th point along `free`.
fn point_selected(free: Axis, index: usize) -> SelectionEvent {
    let index = Some(index as f64);
    match free {
        Axis::Row => SelectionEvent::PointSelected {
            col_index: None,
            row_index: index,
        },
        Axis::Column => SelectionEvent::PointSelected {
            col_index: index,
            row_index: None,
        },
    }
}

/// Axis label for the coordinate nearest `x`, or nothing between points.
fn tick_label(coords: &[f64], labels: &[String], x: f64) -> String {
    coords
        .iter()
        .position(|&c| (c - x).abs() < 1e-6)
        .and_then(|i| labels.get(i))
        .cloned()
        .unwrap_or_default()
}

/// Plot x range shown for the window `[min, max]`: 5% margin on each side,
/// or half a unit around a collapsed window.
fn padded_range(min: f64, max: f64) -> (f64, f64) {
    let pad = if max > min { (max - min) * 0.05 } else { 0.5 };
    (min - pad, max + pad)
}

/// Window after a pan that moved the plot from the padded range of `window`
/// to `shown`. Panning only translates, so the window keeps its width.
fn panned_window(window: (f64, f64), shown: (f64, f64)) -> (f64, f64) {
    let shift = shown.0 - padded_range(window.0, window.1).0;
    (window.0 + shift, window.1 + shift)
}

fn value_bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
