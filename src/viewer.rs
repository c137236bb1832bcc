//! Terminal wireframe viewer
//!
//! Pushes a unit cube through the full model, view and projection chain
//! every frame and rasterises its edges into a character grid:
//!
//! - `model = tilt * spin(frame)`
//! - `view = look_at(eye, target, up)`
//! - `proj = perspective(fov, aspect, near, far)`
//! - `clip = proj * view * model * corner`

use r2_math::{Mat4, Vec3, EPSILON};
use r2_term::escape::{self, TextStyle};
use r2_term::Utf8Str;

use crate::config::{AppConfig, CameraConfig, ModelConfig, ViewerConfig};

/// Fill character for empty cells
pub const BLANK: char = ' ';

/// Corner index pairs joined by the twelve cube edges
pub const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0), // back face
    (4, 5), (5, 7), (7, 6), (6, 4), // front face
    (0, 4), (1, 5), (2, 6), (3, 7), // sides
];

/// Corners of an axis-aligned cube centred on the origin
///
/// Bit 0 of the index selects +x, bit 1 +y, bit 2 +z.
pub fn cube_corners(size: f32) -> [Vec3; 8] {
    let h = size * 0.5;
    let mut corners = [Vec3::ZERO; 8];
    for (i, c) in corners.iter_mut().enumerate() {
        *c = Vec3::new(
            if i & 1 != 0 { h } else { -h },
            if i & 2 != 0 { h } else { -h },
            if i & 4 != 0 { h } else { -h },
        );
    }
    corners
}

/// Fixed-size character grid, row 0 at the top
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<char>,
}

impl Grid {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![BLANK; columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Write `ch` at `(col, row)`; cells outside the grid are ignored
    pub fn put(&mut self, col: i32, row: i32, ch: char) {
        if col < 0 || row < 0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col < self.columns && row < self.rows {
            self.cells[row * self.columns + col] = ch;
        }
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        if col < self.columns && row < self.rows {
            Some(self.cells[row * self.columns + col])
        } else {
            None
        }
    }

    /// Bresenham line between two cells, endpoints included
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), ch: char) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x, y, ch);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// One row as a string
    pub fn line(&self, row: usize) -> String {
        let start = row * self.columns;
        self.cells[start..start + self.columns].iter().collect()
    }

    /// Number of cells holding `ch`
    pub fn count(&self, ch: char) -> usize {
        self.cells.iter().filter(|&&c| c == ch).count()
    }
}

/// Draws the spinning cube frame by frame
pub struct Viewer {
    model: ModelConfig,
    viewer: ViewerConfig,
    view_proj: Mat4,
    /// Smallest clip-space `w` still in front of the near plane
    near: f32,
    corners: [Vec3; 8],
    title: Utf8Str,
    grid: Grid,
}

impl Viewer {
    pub fn new(config: &AppConfig) -> Self {
        let viewer = config.viewer.clone();
        let view_proj = view_projection(&config.camera, viewer.aspect());
        let grid = Grid::new(usize::from(viewer.columns), usize::from(viewer.rows));
        let title = Utf8Str::from(viewer.title.as_str());

        log::info!(
            "Viewer ready: {}x{} cells, {} frames, fov {} degrees",
            viewer.columns, viewer.rows, viewer.frames, config.camera.fov
        );
        log::debug!("View-projection:\n{}", view_proj);

        Self {
            model: config.model.clone(),
            corners: cube_corners(config.model.size),
            viewer,
            view_proj,
            near: config.camera.near.max(EPSILON),
            title,
            grid,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn frame_count(&self) -> u32 {
        self.viewer.frames
    }

    /// Model matrix for `frame`: the spin is applied first, then the tilt
    pub fn model_matrix(&self, frame: u32) -> Mat4 {
        self.model.tilt().to_mat4() * self.model.spin_at(frame).to_mat4()
    }

    pub fn mvp(&self, frame: u32) -> Mat4 {
        self.view_proj * self.model_matrix(frame)
    }

    /// Grid cell for a model-space point, or `None` closer than the near plane
    ///
    /// Clip-space `w` is the view depth, so points between the eye and the
    /// near plane are dropped along with those behind it. Cells may lie
    /// outside the grid; [`Grid::put`] clips them.
    pub fn project(&self, mvp: &Mat4, p: Vec3) -> Option<(i32, i32)> {
        let clip = *mvp * p.extend(1.0);
        if clip.w.is_nan() || clip.w < self.near {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        let max_col = self.grid.columns().saturating_sub(1) as f32;
        let max_row = self.grid.rows().saturating_sub(1) as f32;
        let col = ((ndc.x + 1.0) * 0.5 * max_col).round() as i32;
        let row = ((1.0 - ndc.y) * 0.5 * max_row).round() as i32;
        Some((col, row))
    }

    /// Rasterise frame `frame` into the grid
    pub fn render_frame(&mut self, frame: u32) -> &Grid {
        let mvp = self.mvp(frame);
        let projected: Vec<Option<(i32, i32)>> =
            self.corners.iter().map(|&c| self.project(&mvp, c)).collect();

        self.grid.clear();
        for &(a, b) in CUBE_EDGES.iter() {
            if let (Some(pa), Some(pb)) = (projected[a], projected[b]) {
                self.grid.draw_line(pa, pb, self.viewer.glyph);
            }
        }
        for p in projected.iter().flatten() {
            self.grid.put(p.0, p.1, self.viewer.corner_glyph);
        }

        log::debug!(
            "Frame {}: {} of 8 corners in front of the camera",
            frame,
            projected.iter().flatten().count()
        );
        &self.grid
    }

    /// 1-based column that centres the title over the grid
    pub fn title_column(&self) -> u16 {
        let free = self.grid.columns().saturating_sub(self.title.len());
        (free / 2 + 1) as u16
    }

    /// Escape-coded text that redraws the title and the current grid
    pub fn compose(&self) -> String {
        let mut out = String::new();
        out.push_str(&escape::cursor_pos(1, self.title_column()));
        out.push_str(&escape::set_style(TextStyle::BOLD));
        out.push_str(&self.title.to_string());
        out.push_str(escape::RESET);

        let color = escape::foreground(self.viewer.glyph_color);
        for row in 0..self.grid.rows() {
            out.push_str(&escape::cursor_pos(row as u16 + 2, 1));
            out.push_str(&color);
            out.push_str(&self.grid.line(row));
            out.push_str(escape::RESET);
        }
        out
    }
}

/// `proj * view` for a camera and screen aspect ratio
pub fn view_projection(camera: &CameraConfig, aspect: f32) -> Mat4 {
    let view = Mat4::look_at(camera.eye(), camera.target(), camera.up());
    let proj = Mat4::perspective(camera.fov_radians(), aspect, camera.near, camera.far);
    proj * view
}
