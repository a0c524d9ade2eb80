//! [`RenderBackend`] for the egui front end.
//!
//! egui redraws every frame, so "rendering" a view only stores the data the
//! panels read on the next frame. Handles index into the stored views.

use crate::controllers::RenderBackend;
use crate::data::grid::Grid;
use crate::data::selection::SelectionState;
use crate::data::slice::Slice;
use crate::error::{Result, VolSliceError};

/// Data shown by the surface panel.
#[derive(Debug, Clone)]
pub struct SurfaceView {
    pub window: Grid,
    pub selection: SelectionState,
    /// Number of updates since the view was rendered.
    pub revision: u64,
}

/// Data shown by one slice panel.
#[derive(Debug, Clone)]
pub struct SliceView {
    pub slice: Slice,
    pub axis_title: String,
    pub revision: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceHandle(pub usize);

/// Retained view data for the egui panels.
#[derive(Default)]
pub struct EguiBackend {
    surface: Option<SurfaceView>,
    slices: Vec<SliceView>,
}

impl EguiBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(&self) -> Option<&SurfaceView> {
        self.surface.as_ref()
    }

    pub fn slice(&self, handle: SliceHandle) -> Option<&SliceView> {
        self.slices.get(handle.0)
    }
}

impl RenderBackend for EguiBackend {
    type SurfaceHandle = SurfaceHandle;
    type SliceHandle = SliceHandle;

    fn render_surface(&mut self, window: &Grid, selection: &SelectionState) -> Result<SurfaceHandle> {
        self.surface = Some(SurfaceView {
            window: window.clone(),
            selection: *selection,
            revision: 0,
        });
        Ok(SurfaceHandle)
    }

    fn update_surface(
        &mut self,
        _handle: &SurfaceHandle,
        window: &Grid,
        selection: &SelectionState,
    ) -> Result<()> {
        let view = self
            .surface
            .as_mut()
            .ok_or_else(|| VolSliceError::Render("surface view was never rendered".into()))?;
        view.window = window.clone();
        view.selection = *selection;
        view.revision += 1;
        Ok(())
    }

    fn render_slice(&mut self, slice: &Slice, axis_title: &str) -> Result<SliceHandle> {
        self.slices.push(SliceView {
            slice: slice.clone(),
            axis_title: axis_title.to_string(),
            revision: 0,
        });
        Ok(SliceHandle(self.slices.len() - 1))
    }

    fn update_slice(&mut self, handle: &SliceHandle, slice: &Slice) -> Result<()> {
        let view = self
            .slices
            .get_mut(handle.0)
            .ok_or_else(|| VolSliceError::Render(format!("unknown slice view {}", handle.0)))?;
        view.slice = slice.clone();
        view.revision += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::slice::{slice_by_column, slice_by_row};
    use crate::data::surface::default_surface;

    #[test]
    fn slice_handles_are_sequential() {
        let g = default_surface().unwrap();
        let mut b = EguiBackend::new();
        let h0 = b.render_slice(&slice_by_column(&g, 0.0), "Expiry").unwrap();
        let h1 = b.render_slice(&slice_by_row(&g, 0.0), "Strike").unwrap();
        assert_eq!((h0, h1), (SliceHandle(0), SliceHandle(1)));
        b.update_slice(&h1, &slice_by_row(&g, 3.0)).unwrap();
        let v = b.slice(h1).unwrap();
        assert_eq!(v.slice.fixed_index, 3);
        assert_eq!(v.revision, 1);
        assert_eq!(v.axis_title, "Strike");
    }

    #[test]
    fn update_before_render_is_an_error() {
        let g = default_surface().unwrap();
        let mut b = EguiBackend::new();
        let sel = SelectionState::full_extent(&g);
        assert!(b.update_surface(&SurfaceHandle, &g, &sel).is_err());
        assert!(b.update_slice(&SliceHandle(2), &slice_by_row(&g, 0.0)).is_err());
    }
}
