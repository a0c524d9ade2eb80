//! Native-window entry point.

use eframe::egui;
use tracing::error;

use super::volslice_app::VolSliceApp;
use crate::config::VolSliceConfig;

/// Open the VolSlice window and block until it is closed.
///
/// The surface is built from `cfg` before the window opens; a configuration
/// that yields no valid grid is reported as an [`eframe::Error::AppCreation`].
pub fn run_volslice(mut cfg: VolSliceConfig) -> eframe::Result<()> {
    let app = VolSliceApp::new(&cfg).map_err(|e| {
        error!("cannot build surface: {e}");
        eframe::Error::AppCreation(Box::new(e))
    })?;

    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1400.0, 900.0));
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
