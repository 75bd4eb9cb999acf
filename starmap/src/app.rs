use crate::input::{collect_input_nonblocking, AppEvent};
use crossterm::{
    cursor,
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute, queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use log::info;
use starmap::compare;
use starmap::config::Settings;
use starmap::panel;
use starmap::render::{draw_hud, draw_panel, draw_scene, CellBuffer};
use starmap::scene::StarMap;
use starmap::view::{Interaction, Viewer};
use std::io::{self, Write};
use std::time::{Duration, Instant};

struct Terminal {
    out: io::Stdout,
    cols: u16,
    rows: u16,
    prev: CellBuffer,
    cur: CellBuffer,
}

impl Terminal {
    fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            EnableMouseCapture,
            EnableFocusChange,
            Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
        })
    }

    fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            DisableFocusChange,
            DisableMouseCapture,
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        queue!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    /// Writes only the cells that changed since the last frame.
    fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;

                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }

                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

struct App<'a> {
    map: &'a StarMap,
    viewer: Viewer,
    term: Terminal,
    frame_dt: Duration,
    should_quit: bool,
}

impl<'a> App<'a> {
    fn init(map: &'a StarMap, settings: &Settings) -> anyhow::Result<Self> {
        let term = Terminal::begin()?;
        let viewer = Viewer::new(settings.view_params(), term.cols, term.rows);
        let fps = settings.frame_rate();
        Ok(Self {
            map,
            viewer,
            term,
            frame_dt: Duration::from_secs_f32(1.0 / fps as f32),
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        while !self.should_quit {
            let frame_start = Instant::now();

            if self.term.resize_if_needed()? {
                let (cols, rows) = (self.term.cols, self.term.rows);
                self.viewer.handle(self.map, Interaction::Resize { cols, rows });
            }

            for ev in collect_input_nonblocking(self.frame_dt)? {
                match ev {
                    AppEvent::Quit => {
                        self.should_quit = true;
                        break;
                    }
                    AppEvent::View(i) => self.viewer.handle(self.map, i),
                }
            }

            self.viewer.tick();
            self.render_frame()?;

            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_dt {
                std::thread::sleep(self.frame_dt - elapsed);
            }
        }
        Ok(())
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        let buf = &mut self.term.cur;
        buf.clear();

        draw_scene(buf, self.map, &self.viewer);
        draw_hud(buf, self.map, &self.viewer);

        let selected = self.viewer.selection().current();
        if let Some(rec) = selected.and_then(|id| self.map.record(id)) {
            let text = panel::details(rec);
            let cmp = compare::derive(self.map, selected);
            draw_panel(buf, &text, cmp.as_ref());
        }

        self.term.present()
    }
}

pub(crate) fn run(map: &StarMap, settings: &Settings) -> anyhow::Result<()> {
    let mut app = App::init(map, settings)?;
    let res = app.run();
    app.term.end()?;
    info!("session ended");
    res
}
