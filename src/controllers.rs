//! Interaction controller: owns the current selection and turns gestures
//! into view refreshes.
//!
//! Every input goes through the same pipeline: translate the
//! [`SelectionEvent`] into a partial [`SelectionUpdate`], merge it onto the
//! current state, normalize, then diff. A window change refreshes the
//! surface; a focus change refreshes both slices. The two checks are
//! independent, so one gesture may trigger both, either, or neither.
//!
//! [`SelectionView`] binds the controller to a [`RenderBackend`] and keeps
//! the backend handles for the three views.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::grid::{Axis, Grid};
use crate::data::selection::{normalize, SelectionState, SelectionUpdate};
use crate::data::slice::{slice_by_column, slice_by_row, Slice};
use crate::data::window::extract_window;
use crate::error::Result;
use crate::events::{ChangeKind, EventController, SelectionChange, SelectionEvent};

/// What a slider move does to the surface window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliderPolicy {
    /// Sliders only move the focus; the window stays as it is.
    #[default]
    KeepWindow,
    /// Sliders move the focus and expand the window to the full grid.
    ResetWindow,
}

/// Data the views need after an accepted candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Refresh {
    pub kinds: ChangeKind,
    /// New surface data when the window changed.
    pub window: Option<Grid>,
    /// New `(by_column, by_row)` slices when the focus changed.
    pub slices: Option<(Slice, Slice)>,
}

impl Refresh {
    pub fn none() -> Self {
        Self {
            kinds: ChangeKind::NONE,
            window: None,
            slices: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_none() && self.slices.is_none()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InteractionController
// ─────────────────────────────────────────────────────────────────────────────

/// Sole owner and writer of the current [`SelectionState`].
pub struct InteractionController {
    grid: Arc<Grid>,
    initial: SelectionState,
    current: SelectionState,
    slider_policy: SliderPolicy,
    events: Option<EventController>,
}

impl InteractionController {
    /// Create a controller. `initial` is normalized and becomes both the
    /// current state and the target of [`SelectionEvent::Reset`].
    pub fn new(grid: Arc<Grid>, initial: SelectionState, slider_policy: SliderPolicy) -> Self {
        let initial = normalize(&grid, &initial.into());
        Self {
            grid,
            initial,
            current: initial,
            slider_policy,
            events: None,
        }
    }

    /// Broadcast every committed change through `events`.
    pub fn with_event_controller(mut self, events: EventController) -> Self {
        self.events = Some(events);
        self
    }

    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    pub fn current(&self) -> &SelectionState {
        &self.current
    }

    pub fn initial(&self) -> &SelectionState {
        &self.initial
    }

    pub fn slider_policy(&self) -> SliderPolicy {
        self.slider_policy
    }

    pub fn set_slider_policy(&mut self, policy: SliderPolicy) {
        self.slider_policy = policy;
    }

    /// Surface data for the current window.
    pub fn window(&self) -> Grid {
        extract_window(&self.grid, &self.current)
    }

    /// `(by_column, by_row)` slices for the current focus.
    pub fn slices(&self) -> (Slice, Slice) {
        (
            slice_by_column(&self.grid, self.current.col_index as f64),
            slice_by_row(&self.grid, self.current.row_index as f64),
        )
    }

    /// Merge `update` onto the current state, normalize, and replace the
    /// current state. Returns the view data that needs refreshing.
    pub fn apply_candidate(&mut self, update: SelectionUpdate) -> Refresh {
        self.commit(update, ChangeKind::NONE)
    }

    /// Translate a gesture into an update and apply it.
    pub fn handle_event(&mut self, event: &SelectionEvent) -> Refresh {
        debug!(?event, "selection event");
        match self.translate(event) {
            Some(update) => {
                let extra = if matches!(event, SelectionEvent::Reset) {
                    ChangeKind::RESET
                } else {
                    ChangeKind::NONE
                };
                self.commit(update, extra)
            }
            None => Refresh::none(),
        }
    }

    /// The partial update a gesture stands for, or `None` if it maps to
    /// nothing (e.g. an unknown label).
    pub fn translate(&self, event: &SelectionEvent) -> Option<SelectionUpdate> {
        let update = match event {
            SelectionEvent::WindowChanged { axis, min, max } => {
                SelectionUpdate::window(*axis, *min, *max)
            }
            SelectionEvent::WindowReset(axis) => {
                let (lo, hi) = self.grid.extent(*axis);
                SelectionUpdate::window(*axis, lo, hi)
            }
            SelectionEvent::PointSelected {
                col_index,
                row_index,
            } => SelectionUpdate::focus(*col_index, *row_index),
            SelectionEvent::SliderChanged {
                col_index,
                row_index,
            } => {
                let focus = SelectionUpdate::focus(Some(*col_index), Some(*row_index));
                match self.slider_policy {
                    SliderPolicy::KeepWindow => focus,
                    SliderPolicy::ResetWindow => self.full_window().merge(focus),
                }
            }
            SelectionEvent::LabelClicked { axis, label } => {
                let index = self.grid.label_index(*axis, label)? as f64;
                match axis {
                    Axis::Column => SelectionUpdate::focus(Some(index), None),
                    Axis::Row => SelectionUpdate::focus(None, Some(index)),
                }
            }
            SelectionEvent::Reset => SelectionUpdate::replace_all(&self.initial),
        };
        Some(update)
    }

    fn full_window(&self) -> SelectionUpdate {
        let (col_lo, col_hi) = self.grid.extent(Axis::Column);
        let (row_lo, row_hi) = self.grid.extent(Axis::Row);
        SelectionUpdate::window(Axis::Column, col_lo, col_hi)
            .merge(SelectionUpdate::window(Axis::Row, row_lo, row_hi))
    }

    fn commit(&mut self, update: SelectionUpdate, extra: ChangeKind) -> Refresh {
        let previous = self.current;
        let next = normalize(&self.grid, &update.apply_to(&previous));
        self.current = next;

        let mut kinds = ChangeKind::NONE;
        let window = if next.window_differs(&previous) {
            kinds |= ChangeKind::WINDOW;
            Some(extract_window(&self.grid, &next))
        } else {
            None
        };
        let slices = if next.focus_differs(&previous) {
            kinds |= ChangeKind::FOCUS;
            Some((
                slice_by_column(&self.grid, next.col_index as f64),
                slice_by_row(&self.grid, next.row_index as f64),
            ))
        } else {
            None
        };

        if kinds.is_empty() {
            return Refresh::none();
        }
        kinds |= extra;

        debug!(
            %kinds,
            col = ?(next.col_min, next.col_max),
            row = ?(next.row_min, next.row_max),
            focus = ?(next.col_index, next.row_index),
            "selection committed"
        );
        if let Some(events) = &self.events {
            events.emit(SelectionChange::new(kinds, previous, next));
        }

        Refresh {
            kinds,
            window,
            slices,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering collaborator
// ─────────────────────────────────────────────────────────────────────────────

/// A backend that can draw the surface and slice views.
///
/// `render_*` creates a view and returns a handle; `update_*` replaces the
/// data of an existing view.
pub trait RenderBackend {
    type SurfaceHandle;
    type SliceHandle;

    fn render_surface(
        &mut self,
        window: &Grid,
        selection: &SelectionState,
    ) -> Result<Self::SurfaceHandle>;
    fn update_surface(
        &mut self,
        handle: &Self::SurfaceHandle,
        window: &Grid,
        selection: &SelectionState,
    ) -> Result<()>;
    fn render_slice(&mut self, slice: &Slice, axis_title: &str) -> Result<Self::SliceHandle>;
    fn update_slice(&mut self, handle: &Self::SliceHandle, slice: &Slice) -> Result<()>;
}

/// Titles used for the two slice views.
#[derive(Debug, Clone)]
pub struct SliceTitles {
    /// Free axis title of the by-column slice (runs along rows).
    pub rows: String,
    /// Free axis title of the by-row slice (runs along columns).
    pub cols: String,
}

impl Default for SliceTitles {
    fn default() -> Self {
        Self {
            rows: "Expiry".to_string(),
            cols: "Strike".to_string(),
        }
    }
}

/// An [`InteractionController`] wired to a mounted [`RenderBackend`].
pub struct SelectionView<R: RenderBackend> {
    controller: InteractionController,
    backend: R,
    surface: R::SurfaceHandle,
    by_column: R::SliceHandle,
    by_row: R::SliceHandle,
}

impl<R: RenderBackend> SelectionView<R> {
    /// Draw all three views for the controller's current state.
    pub fn mount(
        controller: InteractionController,
        mut backend: R,
        titles: &SliceTitles,
    ) -> Result<Self> {
        let current = *controller.current();
        let surface = backend.render_surface(&controller.window(), &current)?;
        let (col_slice, row_slice) = controller.slices();
        let by_column = backend.render_slice(&col_slice, &titles.rows)?;
        let by_row = backend.render_slice(&row_slice, &titles.cols)?;
        Ok(Self {
            controller,
            backend,
            surface,
            by_column,
            by_row,
        })
    }

    /// Run one gesture through the controller and push the refreshed data
    /// to the backend. Backend errors are returned to the caller.
    pub fn dispatch(&mut self, event: &SelectionEvent) -> Result<ChangeKind> {
        let refresh = self.controller.handle_event(event);
        self.push(refresh)
    }

    /// Apply a partial update directly.
    pub fn apply_candidate(&mut self, update: SelectionUpdate) -> Result<ChangeKind> {
        let refresh = self.controller.apply_candidate(update);
        self.push(refresh)
    }

    fn push(&mut self, refresh: Refresh) -> Result<ChangeKind> {
        let current = *self.controller.current();
        if let Some(window) = &refresh.window {
            self.backend.update_surface(&self.surface, window, &current)?;
        }
        if let Some((col_slice, row_slice)) = &refresh.slices {
            self.backend.update_slice(&self.by_column, col_slice)?;
            self.backend.update_slice(&self.by_row, row_slice)?;
        }
        Ok(refresh.kinds)
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut InteractionController {
        &mut self.controller
    }

    pub fn backend(&self) -> &R {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut R {
        &mut self.backend
    }

    pub fn surface_handle(&self) -> &R::SurfaceHandle {
        &self.surface
    }

    /// `(by_column, by_row)` slice handles.
    pub fn slice_handles(&self) -> (&R::SliceHandle, &R::SliceHandle) {
        (&self.by_column, &self.by_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::surface::default_surface;

    fn controller(policy: SliderPolicy) -> InteractionController {
        let grid = Arc::new(default_surface().unwrap());
        let initial = SelectionState::with_focus(&grid, 3.0, 2.0);
        InteractionController::new(grid, initial, policy)
    }

    #[test]
    fn focus_only_change_refreshes_slices() {
        let mut c = controller(SliderPolicy::KeepWindow);
        let r = c.apply_candidate(SelectionUpdate::focus(Some(5.0), None));
        assert_eq!(r.kinds, ChangeKind::FOCUS);
        assert!(r.window.is_none());
        let (by_col, by_row) = r.slices.unwrap();
        assert_eq!(by_col.fixed_index, 5);
        assert_eq!(by_row.fixed_index, 2);
    }

    #[test]
    fn window_only_change_refreshes_surface() {
        let mut c = controller(SliderPolicy::KeepWindow);
        let r = c.handle_event(&SelectionEvent::WindowChanged {
            axis: Axis::Column,
            min: 2.0,
            max: 5.0,
        });
        assert_eq!(r.kinds, ChangeKind::WINDOW);
        assert!(r.slices.is_none());
        assert_eq!(r.window.unwrap().cols(), 4);
    }

    #[test]
    fn no_op_update_refreshes_nothing() {
        let mut c = controller(SliderPolicy::KeepWindow);
        let r = c.apply_candidate(SelectionUpdate::focus(Some(3.2), Some(1.9)));
        assert!(r.is_empty());
        assert!(r.kinds.is_empty());
    }

    #[test]
    fn unknown_label_is_ignored() {
        let mut c = controller(SliderPolicy::KeepWindow);
        let r = c.handle_event(&SelectionEvent::LabelClicked {
            axis: Axis::Row,
            label: "10Y".into(),
        });
        assert!(r.is_empty());
        assert_eq!(c.current().row_index, 2);
    }
}
