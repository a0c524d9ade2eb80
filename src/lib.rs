//! VolSlice crate root: module wiring and re-exports.
//!
//! The core is four total functions over an immutable [`Grid`]:
//! - [`normalize`] repairs a candidate selection,
//! - [`extract_window`] cuts the surface window,
//! - [`slice_by_column`] / [`slice_by_row`] take full-length cross-sections.
//!
//! [`InteractionController`] owns the live [`SelectionState`] and decides
//! which views refresh; [`SelectionView`] binds it to a [`RenderBackend`].
//! The `app` module is the egui front end.

pub mod app;
pub mod config;
pub mod controllers;
pub mod data;
pub mod error;
pub mod events;

pub use app::{run_volslice, VolSliceApp};
pub use config::VolSliceConfig;
pub use controllers::{
    InteractionController, Refresh, RenderBackend, SelectionView, SliceTitles, SliderPolicy,
};
pub use data::grid::{Axis, Grid};
pub use data::selection::{
    nearest_index, normalize, round_clamp_index, SelectionCandidate, SelectionState,
    SelectionUpdate,
};
pub use data::slice::{slice_by_column, slice_by_row, Slice};
pub use data::surface::{default_surface, generate_option_surface};
pub use data::window::extract_window;
pub use error::{Result, VolSliceError};
pub use events::{ChangeKind, EventController, EventFilter, SelectionChange, SelectionEvent};
