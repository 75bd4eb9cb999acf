//! Interaction state: drag-to-rotate, wheel zoom, viewport size and picking.
//!
//! Every [`Interaction`] is one discrete update applied to completion.

use crate::camera::Camera;
use crate::model::EntityId;
use crate::scene::StarMap;
use crate::selection::SelectionController;

/// Approximate pixel size of a terminal cell, so drag speed reads in pixels.
pub const CELL_PX_W: f64 = 8.0;
pub const CELL_PX_H: f64 = 16.0;

/// Width of the detail panel docked on the right edge.
pub const PANEL_W: u16 = 44;

/// Left column of the detail panel, or `None` when the viewport is too small to show it.
pub fn panel_left(cols: u16, rows: u16) -> Option<u16> {
    let w = PANEL_W.min(cols);
    (w >= 12 && rows >= 6).then(|| cols - w)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    PointerDown { col: u16, row: u16 },
    PointerMove { col: u16, row: u16 },
    /// Ends a drag; a press and release without movement is a pick.
    PointerUp { col: u16, row: u16 },
    PointerLeave,
    /// Negative zooms in.
    Wheel { delta: f64 },
    Pick { col: u16, row: u16 },
    Dismiss,
    Resize { cols: u16, rows: u16 },
    /// Rotate by a pixel delta without a pointer.
    Nudge { dx: f64, dy: f64 },
    SelectNext,
    SelectPrev,
    SelectCentral,
    ResetView,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewParams {
    pub camera_distance: f64,
    pub fov: f64,
    pub fov_min: f64,
    pub fov_max: f64,
    pub zoom_speed: f64,
    pub zoom_damping: f64,
    /// Radians per pixel of drag.
    pub rotate_speed: f64,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            camera_distance: 150.0,
            fov: 75.0,
            fov_min: 10.0,
            fov_max: 100.0,
            zoom_speed: 1.0,
            zoom_damping: 0.1,
            rotate_speed: 0.005,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    last: (u16, u16),
    moved: bool,
}

pub struct Viewer {
    params: ViewParams,
    pub rot_x: f64,
    pub rot_y: f64,
    pub fov: f64,
    pub target_fov: f64,
    cols: u16,
    rows: u16,
    drag: Option<Drag>,
    selection: SelectionController,
}

impl Viewer {
    pub fn new(params: ViewParams, cols: u16, rows: u16) -> Self {
        let fov = params.fov.clamp(params.fov_min, params.fov_max);
        Self {
            params,
            rot_x: 0.0,
            rot_y: 0.0,
            fov,
            target_fov: fov,
            cols,
            rows,
            drag: None,
            selection: SelectionController::new(),
        }
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn camera(&self) -> Camera {
        Camera {
            distance: self.params.camera_distance,
            fov_deg: self.fov,
            cols: self.cols as f64,
            rows: self.rows as f64,
        }
    }

    /// One frame of zoom easing toward the target.
    pub fn tick(&mut self) {
        self.fov += (self.target_fov - self.fov) * self.params.zoom_damping;
    }

    pub fn handle(&mut self, map: &StarMap, ev: Interaction) {
        match ev {
            Interaction::PointerDown { col, row } => {
                self.drag = Some(Drag {
                    last: (col, row),
                    moved: false,
                });
            }
            Interaction::PointerMove { col, row } => {
                if let Some(drag) = self.drag.as_mut() {
                    let dx = (col as f64 - drag.last.0 as f64) * CELL_PX_W;
                    let dy = (row as f64 - drag.last.1 as f64) * CELL_PX_H;
                    if dx != 0.0 || dy != 0.0 {
                        drag.moved = true;
                    }
                    drag.last = (col, row);
                    self.rotate_by(dx, dy);
                }
            }
            Interaction::PointerUp { col, row } => {
                if let Some(drag) = self.drag.take() {
                    if !drag.moved {
                        self.pick(map, col, row);
                    }
                }
            }
            Interaction::PointerLeave => self.drag = None,
            Interaction::Wheel { delta } => {
                if delta < 0.0 {
                    self.target_fov -= self.params.zoom_speed;
                } else if delta > 0.0 {
                    self.target_fov += self.params.zoom_speed;
                }
                self.target_fov = self.target_fov.clamp(self.params.fov_min, self.params.fov_max);
            }
            Interaction::Pick { col, row } => self.pick(map, col, row),
            Interaction::Dismiss => {
                self.selection.clear();
            }
            Interaction::Resize { cols, rows } => {
                self.cols = cols;
                self.rows = rows;
            }
            Interaction::Nudge { dx, dy } => self.rotate_by(dx, dy),
            Interaction::SelectNext => self.cycle(map, true),
            Interaction::SelectPrev => self.cycle(map, false),
            Interaction::SelectCentral => {
                self.selection.select(EntityId::Central);
            }
            Interaction::ResetView => {
                self.rot_x = 0.0;
                self.rot_y = 0.0;
                self.target_fov = self.params.fov.clamp(self.params.fov_min, self.params.fov_max);
            }
        }
    }

    fn rotate_by(&mut self, dx: f64, dy: f64) {
        self.rot_y += dx * self.params.rotate_speed;
        self.rot_x += dy * self.params.rotate_speed;
    }

    /// Clicking empty space leaves the selection alone. While the panel is
    /// open it owns its columns; only its bottom row closes it.
    fn pick(&mut self, map: &StarMap, col: u16, row: u16) {
        if self.selection.current().is_some() {
            if let Some(x0) = panel_left(self.cols, self.rows) {
                if col >= x0 {
                    if row + 1 == self.rows {
                        self.selection.clear();
                    }
                    return;
                }
            }
        }
        if let Some(id) = self.camera().pick(map, self.rot_x, self.rot_y, col, row) {
            self.selection.select(id);
        }
    }

    fn cycle(&mut self, map: &StarMap, forward: bool) {
        let ids: Vec<EntityId> = map.ids().collect();
        if ids.is_empty() {
            return;
        }
        let n = ids.len();
        let next = match self.selection.current().and_then(|c| ids.iter().position(|&i| i == c)) {
            Some(pos) if forward => (pos + 1) % n,
            Some(pos) => (pos + n - 1) % n,
            None if forward => 0,
            None => n - 1,
        };
        self.selection.select(ids[next]);
    }
}
