//! Surface panel: orthographic projection of the windowed grid drawn with
//! the egui painter.
//!
//! Cells are split into two triangles each, coloured by height and sorted
//! back to front (painter's algorithm). The selection window is outlined on
//! the floor of the box. Dragging orbits the camera.

use egui::{epaint, Color32, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};

use super::backend::SurfaceView;
use crate::config::CameraConfig;
use crate::data::grid::Grid;

/// Vertical scale of the value axis relative to the horizontal box.
const Z_SCALE: f64 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Point3 {
    x: f64,
    y: f64,
    z: f64,
}

/// Orbit camera looking at the unit box.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub azimuth: f64,
    pub elevation: f64,
}

impl From<&CameraConfig> for Camera {
    fn from(c: &CameraConfig) -> Self {
        Self {
            azimuth: c.azimuth,
            elevation: c.elevation,
        }
    }
}

impl Camera {
    /// Screen-space `(x, y)` with y pointing up.
    fn project(&self, p: Point3) -> (f64, f64) {
        let (sa, ca) = self.azimuth.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        let sx = -p.x * sa + p.y * ca;
        let sy = -p.x * ca * se - p.y * sa * se + p.z * ce;
        (sx, sy)
    }

    /// Distance along the view direction; larger is further away.
    fn depth(&self, p: Point3) -> f64 {
        let (sa, ca) = self.azimuth.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        -(p.x * ce * ca + p.y * ce * sa + p.z * se)
    }

    fn orbit(&mut self, delta: Vec2) {
        self.azimuth -= delta.x as f64 * 0.01;
        self.elevation = (self.elevation + delta.y as f64 * 0.01).clamp(-1.5, 1.5);
    }
}

/// Viridis-like colour ramp for `t` in `[0, 1]`.
pub fn height_color(t: f64) -> Color32 {
    const STOPS: [[f64; 3]; 5] = [
        [68.0, 1.0, 84.0],
        [59.0, 82.0, 139.0],
        [33.0, 145.0, 140.0],
        [94.0, 201.0, 98.0],
        [253.0, 231.0, 37.0],
    ];
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (STOPS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(STOPS.len() - 2);
    let f = scaled - i as f64;
    let mix = |k: usize| (STOPS[i][k] * (1.0 - f) + STOPS[i + 1][k] * f).round() as u8;
    Color32::from_rgb(mix(0), mix(1), mix(2))
}

/// Maps grid coordinates and values into the unit box `[0, 1]^2 x [0, Z_SCALE]`.
struct BoxMapping {
    col: (f64, f64),
    row: (f64, f64),
    z: (f64, f64),
}

impl BoxMapping {
    fn new(window: &Grid, selection_col: (f64, f64), selection_row: (f64, f64)) -> Self {
        let z = window.value_range();
        Self {
            col: selection_col,
            row: selection_row,
            z,
        }
    }

    fn unit(v: f64, (lo, hi): (f64, f64)) -> f64 {
        if hi > lo {
            (v - lo) / (hi - lo)
        } else {
            0.5
        }
    }

    fn point(&self, col: f64, row: f64, value: f64) -> Point3 {
        Point3 {
            x: Self::unit(col, self.col),
            y: Self::unit(row, self.row),
            z: Self::unit(value, self.z) * Z_SCALE,
        }
    }

    fn floor(&self, col: f64, row: f64) -> Point3 {
        Point3 {
            x: Self::unit(col, self.col),
            y: Self::unit(row, self.row),
            z: 0.0,
        }
    }
}

struct Triangle {
    corners: [Point3; 3],
    depth: f64,
    color: Color32,
}

/// Build the depth-sorted triangle list for `window`.
fn triangles(window: &Grid, mapping: &BoxMapping, camera: &Camera) -> Vec<Triangle> {
    let cols = window.col_coords();
    let rows = window.row_coords();
    let values = window.values();
    let mut out = Vec::new();
    for r in 0..rows.len().saturating_sub(1) {
        for c in 0..cols.len().saturating_sub(1) {
            let p = |rr: usize, cc: usize| mapping.point(cols[cc], rows[rr], values[rr][cc]);
            let quad = [p(r, c), p(r, c + 1), p(r + 1, c + 1), p(r + 1, c)];
            for tri in [[quad[0], quad[1], quad[2]], [quad[0], quad[2], quad[3]]] {
                let zmean = (tri[0].z + tri[1].z + tri[2].z) / (3.0 * Z_SCALE);
                let depth = tri.iter().map(|&v| camera.depth(v)).sum::<f64>() / 3.0;
                out.push(Triangle {
                    corners: tri,
                    depth,
                    color: height_color(zmean),
                });
            }
        }
    }
    out.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    out
}

/// Surface panel state (camera only; data lives in the backend).
pub struct SurfacePanel {
    pub camera: Camera,
    pub outline_color: Color32,
}

impl SurfacePanel {
    pub fn new(camera: &CameraConfig, outline: [u8; 3]) -> Self {
        Self {
            camera: camera.into(),
            outline_color: Color32::from_rgb(outline[0], outline[1], outline[2]),
        }
    }

    pub fn show(&mut self, ui: &mut Ui, view: &SurfaceView) {
        let size = ui.available_size().max(Vec2::splat(120.0));
        let (rect, response) = ui.allocate_exact_size(size, Sense::drag());
        if response.dragged() {
            self.camera.orbit(response.drag_delta());
        }

        let sel = &view.selection;
        let mapping = BoxMapping::new(&view.window, (sel.col_min, sel.col_max), (sel.row_min, sel.row_max));
        let tris = triangles(&view.window, &mapping, &self.camera);

        let corners = [
            mapping.floor(sel.col_min, sel.row_min),
            mapping.floor(sel.col_max, sel.row_min),
            mapping.floor(sel.col_max, sel.row_max),
            mapping.floor(sel.col_min, sel.row_max),
        ];
        let to_screen = ScreenFit::new(rect, &self.camera);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);

        let outline: Vec<Pos2> = corners
            .iter()
            .chain(std::iter::once(&corners[0]))
            .map(|&p| to_screen.pos(&self.camera, p))
            .collect();
        painter.add(Shape::line(outline, Stroke::new(2.5, self.outline_color)));

        if tris.is_empty() {
            // Single row or column: draw the polyline of values instead.
            let pts: Vec<Pos2> = single_line_points(&view.window, &mapping)
                .into_iter()
                .map(|p| to_screen.pos(&self.camera, p))
                .collect();
            let color = height_color(0.5);
            for p in &pts {
                painter.circle_filled(*p, 3.0, color);
            }
            painter.add(Shape::line(pts, Stroke::new(2.0, color)));
        } else {
            let mut mesh = epaint::Mesh::default();
            for tri in &tris {
                let base = mesh.vertices.len() as u32;
                for &corner in &tri.corners {
                    mesh.colored_vertex(to_screen.pos(&self.camera, corner), tri.color);
                }
                mesh.add_triangle(base, base + 1, base + 2);
            }
            painter.add(Shape::mesh(mesh));
        }

        let info = format!(
            "{} x {} cells   drag to orbit",
            view.window.cols(),
            view.window.rows()
        );
        painter.text(
            rect.left_top() + Vec2::new(6.0, 6.0),
            egui::Align2::LEFT_TOP,
            info,
            egui::FontId::proportional(12.0),
            ui.visuals().weak_text_color(),
        );
    }
}

fn single_line_points(window: &Grid, mapping: &BoxMapping) -> Vec<Point3> {
    let cols = window.col_coords();
    let rows = window.row_coords();
    let values = window.values();
    let mut pts = Vec::new();
    for (r, &row) in rows.iter().enumerate() {
        for (c, &col) in cols.iter().enumerate() {
            pts.push(mapping.point(col, row, values[r][c]));
        }
    }
    pts
}

/// Fits the projected unit box into the panel rectangle.
struct ScreenFit {
    center: Pos2,
    scale: f32,
    mid: (f64, f64),
}

impl ScreenFit {
    fn new(rect: Rect, camera: &Camera) -> Self {
        let mut min = (f64::INFINITY, f64::INFINITY);
        let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &x in &[0.0, 1.0] {
            for &y in &[0.0, 1.0] {
                for &z in &[0.0, Z_SCALE] {
                    let (sx, sy) = camera.project(Point3 { x, y, z });
                    min = (min.0.min(sx), min.1.min(sy));
                    max = (max.0.max(sx), max.1.max(sy));
                }
            }
        }
        let span_x = (max.0 - min.0).max(1e-9);
        let span_y = (max.1 - min.1).max(1e-9);
        let scale = ((rect.width() as f64 / span_x).min(rect.height() as f64 / span_y) * 0.85) as f32;
        Self {
            center: rect.center(),
            scale,
            mid: ((min.0 + max.0) / 2.0, (min.1 + max.1) / 2.0),
        }
    }

    fn pos(&self, camera: &Camera, p: Point3) -> Pos2 {
        let (sx, sy) = camera.project(p);
        Pos2::new(
            self.center.x + ((sx - self.mid.0) as f32) * self.scale,
            self.center.y - ((sy - self.mid.1) as f32) * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::surface::default_surface;

    #[test]
    fn color_ramp_endpoints() {
        assert_eq!(height_color(0.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(height_color(1.0), Color32::from_rgb(253, 231, 37));
        assert_eq!(height_color(f64::NAN), height_color(0.0));
    }

    #[test]
    fn two_triangles_per_cell_sorted_back_to_front() {
        let g = default_surface().unwrap();
        let camera = Camera::from(&CameraConfig::default());
        let mapping = BoxMapping::new(&g, (0.0, 8.0), (0.0, 5.0));
        let tris = triangles(&g, &mapping, &camera);
        assert_eq!(tris.len(), 2 * 8 * 5);
        assert!(tris.windows(2).all(|w| w[0].depth >= w[1].depth));
    }

    #[test]
    fn collapsed_window_maps_to_box_center() {
        let g = default_surface().unwrap();
        let mapping = BoxMapping::new(&g, (3.0, 3.0), (0.0, 5.0));
        assert_eq!(mapping.floor(3.0, 0.0).x, 0.5);
    }
}
