//! egui front end.
//!
//! | Sub-module       | Responsibility |
//! | ---------------- | -------------- |
//! | [`backend`]      | [`RenderBackend`](crate::controllers::RenderBackend) storing view data for the panels |
//! | [`surface_ui`]   | Projected 3D surface painted with the egui painter |
//! | [`slice_ui`]     | Slice charts (egui_plot) and their gestures |
//! | [`controls_ui`]  | Sliders, readout, export buttons, preview table |
//! | `volslice_app`   | [`VolSliceApp`] (eframe) wiring the panels to the controller |
//! | `run`            | [`run_volslice()`] entry point |

pub mod backend;
pub mod controls_ui;
pub mod slice_ui;
pub mod surface_ui;
mod run;
mod volslice_app;

pub use run::run_volslice;
pub use volslice_app::VolSliceApp;
