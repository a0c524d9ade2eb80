//! Startup configuration for the VolSlice viewer.
//!
//! The configuration describes the grid axes, the startup focus, colours and
//! a few behaviour switches. It can be stored as YAML; the live selection is
//! never written back.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::controllers::SliderPolicy;
use crate::data::grid::Grid;
use crate::data::selection::SelectionState;
use crate::data::surface::{generate_option_surface, EXPIRY_LABELS, STRIKE_LABELS};
use crate::error::{Result, VolSliceError};

// ─────────────────────────────────────────────────────────────────────────────
// Appearance
// ─────────────────────────────────────────────────────────────────────────────

/// Colours used by the views, as RGB triples.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewColors {
    /// Line colour of the slice taken at the focused column (runs along rows).
    pub column_slice: [u8; 3],
    /// Line colour of the slice taken at the focused row (runs along columns).
    pub row_slice: [u8; 3],
    /// Outline of the selection window drawn under the surface.
    pub window_outline: [u8; 3],
}

impl Default for ViewColors {
    fn default() -> Self {
        Self {
            column_slice: [0x38, 0xbd, 0xf8],
            row_slice: [0xf9, 0x73, 0x16],
            window_outline: [0xfb, 0xbf, 0x24],
        }
    }
}

/// Initial orbit of the surface camera, in radians.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub azimuth: f64,
    pub elevation: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            azimuth: -1.07,
            elevation: 0.63,
        }
    }
}

/// Size of the data preview table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub max_rows: usize,
    pub max_cols: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_rows: 4,
            max_cols: 5,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// VolSliceConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field            | Purpose |
/// |------------------|---------|
/// | `strike_labels`  | Column axis labels |
/// | `expiry_labels`  | Row axis labels |
/// | `initial_*`      | Focus indices at startup and after a reset |
/// | `slider_policy`  | Whether slider moves also reset the window |
/// | `colors`         | Slice and outline colours |
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VolSliceConfig {
    /// Native window title.
    pub title: String,
    pub strike_labels: Vec<String>,
    pub expiry_labels: Vec<String>,
    pub initial_col_index: usize,
    pub initial_row_index: usize,
    pub slider_policy: SliderPolicy,
    pub colors: ViewColors,
    pub camera: CameraConfig,
    pub preview: PreviewConfig,
    /// Optional eframe native-window options.
    #[serde(skip)]
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for VolSliceConfig {
    fn default() -> Self {
        Self {
            title: "VolSlice".to_string(),
            strike_labels: STRIKE_LABELS.iter().map(|s| s.to_string()).collect(),
            expiry_labels: EXPIRY_LABELS.iter().map(|s| s.to_string()).collect(),
            initial_col_index: 3,
            initial_row_index: 2,
            slider_policy: SliderPolicy::default(),
            colors: ViewColors::default(),
            camera: CameraConfig::default(),
            preview: PreviewConfig::default(),
            native_options: None,
        }
    }
}

impl VolSliceConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| VolSliceError::io(path, e))?;
        Self::from_yaml_str(&s)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let s = self.to_yaml_string()?;
        std::fs::write(path, s).map_err(|e| VolSliceError::io(path, e))
    }

    /// Materialize the option surface for the configured labels.
    pub fn build_surface(&self) -> Result<Grid> {
        generate_option_surface(self.strike_labels.as_slice(), self.expiry_labels.as_slice())
    }

    /// Full-extent selection focused on the configured indices.
    pub fn initial_selection(&self, grid: &Grid) -> SelectionState {
        SelectionState::with_focus(
            grid,
            self.initial_col_index as f64,
            self.initial_row_index as f64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_nine_by_six_surface() {
        let cfg = VolSliceConfig::default();
        let grid = cfg.build_surface().unwrap();
        assert_eq!(grid.cols(), 9);
        assert_eq!(grid.rows(), 6);
        let sel = cfg.initial_selection(&grid);
        assert_eq!((sel.col_index, sel.row_index), (3, 2));
        assert_eq!((sel.col_min, sel.col_max), (0.0, 8.0));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg = VolSliceConfig::from_yaml_str(
            "strike_labels: [\"90\", \"100\", \"110\"]\nslider_policy: ResetWindow\n",
        )
        .unwrap();
        assert_eq!(cfg.strike_labels.len(), 3);
        assert_eq!(cfg.expiry_labels.len(), 6);
        assert_eq!(cfg.slider_policy, SliderPolicy::ResetWindow);
        assert_eq!(cfg.preview, PreviewConfig::default());
    }

    #[test]
    fn initial_focus_out_of_range_is_clamped() {
        let cfg = VolSliceConfig {
            strike_labels: vec!["A".into(), "B".into()],
            initial_col_index: 7,
            ..VolSliceConfig::default()
        };
        let grid = cfg.build_surface().unwrap();
        assert_eq!(cfg.initial_selection(&grid).col_index, 1);
    }

    #[test]
    fn empty_axis_is_a_grid_error() {
        let cfg = VolSliceConfig {
            expiry_labels: Vec::new(),
            ..VolSliceConfig::default()
        };
        assert!(matches!(
            cfg.build_surface(),
            Err(VolSliceError::InvalidGrid(_))
        ));
    }

    #[test]
    fn yaml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volslice.yaml");
        let cfg = VolSliceConfig {
            title: "Desk".into(),
            initial_row_index: 4,
            ..VolSliceConfig::default()
        };
        cfg.save_to_path(&path).unwrap();
        let loaded = VolSliceConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.title, "Desk");
        assert_eq!(loaded.initial_row_index, 4);
        assert_eq!(loaded.colors, ViewColors::default());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = VolSliceConfig::load_from_path("/nonexistent/volslice.yaml")
            .err()
            .unwrap();
        assert!(err.to_string().contains("volslice.yaml"));
    }
}
