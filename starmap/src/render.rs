//! Cell-buffer drawing of the scene, detail panel and comparison charts.

use crate::camera::{rotate, CELL_ASPECT};
use crate::compare::{Comparison, SizeComparison, TemperatureComparison, SIZE_SCALE_RANGE};
use crate::model::EntityId;
use crate::panel::PanelText;
use crate::scene::StarMap;
use crate::view::{panel_left, Viewer};
use crossterm::style::Color;

pub const BG: Color = Color::Black;

const SELECTED_COLOR: u32 = 0x1e90ff;
const CENTRAL_COLOR: u32 = 0xff8c42;
const CENTRAL_SELECTED_COLOR: u32 = 0xffd700;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: BG,
        }
    }
}

pub struct CellBuffer {
    pub w: u16,
    pub h: u16,
    pub cells: Vec<Cell>,
}

impl CellBuffer {
    pub fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }

    pub fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        if x < self.w && y < self.h {
            Some(self.cells[self.idx(x, y)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Text on row `y` from column `x`, clipped at the right edge.
    pub fn text(&mut self, x: u16, y: u16, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            let xx = x.saturating_add(i as u16);
            if xx >= self.w || y >= self.h {
                break;
            }
            self.set(xx, y, Cell { ch, fg, bg: BG });
        }
    }

    /// The row as a string; handy for assertions.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.w).filter_map(|x| self.get(x, y)).map(|c| c.ch).collect()
    }
}

pub fn hex(c: u32) -> Color {
    Color::Rgb {
        r: (c >> 16) as u8,
        g: (c >> 8) as u8,
        b: c as u8,
    }
}

fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8
}

/// Cold (deep blue) → magenta → hot (yellow).
pub fn heat_color(t: f64) -> Color {
    const STOPS: [(u8, u8, u8); 3] = [(13, 8, 135), (204, 71, 120), (240, 249, 33)];
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let (a, b, k) = if t < 0.5 {
        (STOPS[0], STOPS[1], t * 2.0)
    } else {
        (STOPS[1], STOPS[2], (t - 0.5) * 2.0)
    };
    Color::Rgb {
        r: lerp_u8(a.0, b.0, k),
        g: lerp_u8(a.1, b.1, k),
        b: lerp_u8(a.2, b.2, k),
    }
}

fn box_draw(buf: &mut CellBuffer, x0: u16, y0: u16, bw: u16, bh: u16, fg: Color) {
    if bw < 2 || bh < 2 {
        return;
    }
    let x1 = x0.saturating_add(bw - 1);
    let y1 = y0.saturating_add(bh - 1);
    let put = |buf: &mut CellBuffer, x: u16, y: u16, ch: char| buf.set(x, y, Cell { ch, fg, bg: BG });

    for y in y0..=y1 {
        for x in x0..=x1 {
            put(buf, x, y, ' ');
        }
    }
    for x in x0 + 1..x1 {
        put(buf, x, y0, '─');
        put(buf, x, y1, '─');
    }
    for y in y0 + 1..y1 {
        put(buf, x0, y, '│');
        put(buf, x1, y, '│');
    }
    put(buf, x0, y0, '┌');
    put(buf, x1, y0, '┐');
    put(buf, x0, y1, '└');
    put(buf, x1, y1, '┘');
}

fn body_color(map: &StarMap, viewer: &Viewer, id: EntityId) -> Color {
    let selected = viewer.selection().is_selected(id);
    match id {
        EntityId::Central if selected => hex(CENTRAL_SELECTED_COLOR),
        EntityId::Central => hex(CENTRAL_COLOR),
        EntityId::Placed(_) if selected => hex(SELECTED_COLOR),
        EntityId::Placed(i) => {
            let g = map.entities().get(i).map_or(200, |e| e.seed.shade);
            Color::Rgb { r: g, g, b: g }
        }
    }
}

/// Far bodies first so near ones overwrite them. Only the selection gets a label.
pub fn draw_scene(buf: &mut CellBuffer, map: &StarMap, viewer: &Viewer) {
    let cam = viewer.camera();
    let mut visible = Vec::new();
    for id in map.ids() {
        let Some(body) = map.body(id) else {
            continue;
        };
        if let Some(pr) = cam.project(rotate(body.position, viewer.rot_x, viewer.rot_y), body.size) {
            visible.push((id, pr));
        }
    }
    visible.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));

    for (id, pr) in &visible {
        let fg = body_color(map, viewer, *id);
        if pr.radius < 0.75 {
            let ch = match pr.radius {
                r if r < 0.25 => '·',
                r if r < 0.5 => '•',
                _ => '●',
            };
            if pr.x >= 0.0 && pr.y >= 0.0 {
                buf.set(pr.x as u16, pr.y as u16, Cell { ch, fg, bg: BG });
            }
            continue;
        }
        let r = pr.radius;
        let rx = r / CELL_ASPECT;
        let (y_lo, y_hi) = ((pr.y - r).floor().max(0.0), (pr.y + r).ceil().min(buf.h as f64));
        let (x_lo, x_hi) = ((pr.x - rx).floor().max(0.0), (pr.x + rx).ceil().min(buf.w as f64));
        let mut y = y_lo;
        while y < y_hi {
            let mut x = x_lo;
            while x < x_hi {
                let dx = (x + 0.5 - pr.x) * CELL_ASPECT;
                let dy = y + 0.5 - pr.y;
                if dx * dx + dy * dy <= r * r {
                    buf.set(x as u16, y as u16, Cell { ch: '█', fg, bg: BG });
                }
                x += 1.0;
            }
            y += 1.0;
        }
    }

    if let Some((id, pr)) = visible
        .iter()
        .find(|(id, _)| viewer.selection().is_selected(*id))
    {
        if let Some(rec) = map.record(*id) {
            let name = rec.display_name();
            let ly = pr.y - pr.radius.max(0.5) - 1.0;
            let lx = pr.x - name.chars().count() as f64 / 2.0;
            if ly >= 0.0 {
                buf.text(lx.max(0.0) as u16, ly as u16, name, Color::White);
            }
        }
    }
}

/// Right-hand overlay with the detail rows and both charts.
pub fn draw_panel(buf: &mut CellBuffer, text: &PanelText, cmp: Option<&Comparison>) {
    let Some(x0) = panel_left(buf.w, buf.h) else {
        return;
    };
    let bw = buf.w - x0;
    let inner = (bw - 4) as usize;
    box_draw(buf, x0, 0, bw, buf.h, Color::Grey);

    let tx = x0 + 2;
    let bottom = buf.h - 1;
    let mut y = 1u16;
    let line = |buf: &mut CellBuffer, y: &mut u16, s: &str, fg: Color| {
        if *y < bottom {
            buf.text(tx, *y, &clip(s, inner), fg);
            *y += 1;
        }
    };

    line(buf, &mut y, &text.title, Color::White);
    y += 1;
    for (label, value) in &text.rows {
        line(buf, &mut y, &format!("{}: {}", label, value), Color::Grey);
    }

    if let Some(cmp) = cmp {
        y += 1;
        if let Some(t) = &cmp.temperature {
            draw_temperature_chart(buf, tx, &mut y, inner, bottom, t);
            y += 1;
        }
        draw_size_chart(buf, tx, &mut y, inner, bottom, &cmp.size);
    }

    buf.text(tx, bottom, "─ Esc close ", Color::DarkGrey);
}

fn draw_temperature_chart(
    buf: &mut CellBuffer,
    x: u16,
    y: &mut u16,
    inner: usize,
    bottom: u16,
    t: &TemperatureComparison,
) {
    if *y >= bottom {
        return;
    }
    buf.text(x, *y, &clip("Temperature Comparison (Kelvin)", inner), Color::White);
    *y += 1;
    let (lo, hi) = t.color_domain;
    for bar in t.bars() {
        if *y + 1 >= bottom {
            return;
        }
        buf.text(x, *y, &clip(&bar.label, inner), Color::Grey);
        let len = ((bar.value / t.ceiling).clamp(0.0, 1.0) * inner as f64).round() as usize;
        let fg = heat_color((bar.value - lo) / (hi - lo));
        buf.text(x, *y + 1, &"█".repeat(len), fg);
        *y += 2;
    }
}

fn draw_size_chart(buf: &mut CellBuffer, x: u16, y: &mut u16, inner: usize, bottom: u16, s: &SizeComparison) {
    if *y >= bottom {
        return;
    }
    buf.text(x, *y, &clip("Size Comparison (Earth radii)", inner), Color::White);
    *y += 1;
    for e in s.entries() {
        if *y >= bottom {
            return;
        }
        let label = format!("{} ({}× Earth)", e.name, e.value);
        let avail = inner.saturating_sub(label.chars().count() + 1);
        let len = ((e.display_radius() / SIZE_SCALE_RANGE.1) * avail as f64).round().max(1.0) as usize;
        buf.text(x, *y, &"●".repeat(len.min(avail.max(1))), hex(e.color));
        buf.text(x + len.min(avail.max(1)) as u16 + 1, *y, &clip(&label, inner), Color::Grey);
        *y += 1;
    }
}

/// Bottom status line.
pub fn draw_hud(buf: &mut CellBuffer, map: &StarMap, viewer: &Viewer) {
    if buf.h == 0 {
        return;
    }
    let status = if map.is_empty() {
        "no data loaded".to_string()
    } else {
        format!("{} bodies", map.entities().len())
    };
    let s = format!(
        " {} | fov {:.0} | drag rotate, wheel zoom, click select, Tab cycle, 0 sun, r reset, q quit",
        status, viewer.fov
    );
    buf.text(0, buf.h - 1, &s, Color::DarkGrey);
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
