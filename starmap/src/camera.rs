//! Perspective projection onto a terminal grid, and picking.

use crate::layout::Vec3;
use crate::model::EntityId;
use crate::scene::StarMap;

/// Width / height of one terminal cell.
pub const CELL_ASPECT: f64 = 0.5;
pub const NEAR: f64 = 0.1;
/// Smallest pickable radius, in rows.
const MIN_HIT_RADIUS: f64 = 0.6;

/// Camera on the +z axis looking at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub distance: f64,
    pub fov_deg: f64,
    /// Viewport size in cells.
    pub cols: f64,
    pub rows: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    /// Column (fractional).
    pub x: f64,
    /// Row (fractional).
    pub y: f64,
    /// Distance in front of the camera.
    pub depth: f64,
    /// Apparent radius, in rows.
    pub radius: f64,
}

/// Euler rotation, x after y (the scene container's rotation).
pub fn rotate(p: Vec3, rot_x: f64, rot_y: f64) -> Vec3 {
    let (sy, cy) = rot_y.sin_cos();
    let (sx, cx) = rot_x.sin_cos();
    let x = cy * p.x + sy * p.z;
    let z = -sy * p.x + cy * p.z;
    Vec3::new(x, cx * p.y - sx * z, sx * p.y + cx * z)
}

impl Camera {
    fn aspect(&self) -> f64 {
        (self.cols * CELL_ASPECT) / self.rows.max(1.0)
    }

    /// `None` when the point is behind the near plane or the viewport is empty.
    pub fn project(&self, p: Vec3, size: f64) -> Option<Projected> {
        if self.cols < 1.0 || self.rows < 1.0 {
            return None;
        }
        let depth = self.distance - p.z;
        if depth <= NEAR {
            return None;
        }
        let half_h = (self.fov_deg.to_radians() * 0.5).tan() * depth;
        let ndc_y = p.y / half_h;
        let ndc_x = p.x / (half_h * self.aspect());
        Some(Projected {
            x: (ndc_x + 1.0) * 0.5 * self.cols,
            y: (1.0 - ndc_y) * 0.5 * self.rows,
            depth,
            radius: size / half_h * self.rows * 0.5,
        })
    }

    /// Nearest body whose projected disc covers the cell at (`col`, `row`).
    pub fn pick(&self, map: &StarMap, rot_x: f64, rot_y: f64, col: u16, row: u16) -> Option<EntityId> {
        let cx = col as f64 + 0.5;
        let cy = row as f64 + 0.5;

        let mut best: Option<(EntityId, f64)> = None;
        for id in map.ids() {
            let Some(body) = map.body(id) else {
                continue;
            };
            let Some(pr) = self.project(rotate(body.position, rot_x, rot_y), body.size) else {
                continue;
            };
            let dx = (cx - pr.x) * CELL_ASPECT;
            let dy = cy - pr.y;
            let r = pr.radius.max(MIN_HIT_RADIUS);
            if dx * dx + dy * dy > r * r {
                continue;
            }
            if best.map_or(true, |(_, d)| pr.depth < d) {
                best = Some((id, pr.depth));
            }
        }
        best.map(|(id, _)| id)
    }
}
