use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use starmap::view::{Interaction, CELL_PX_H, CELL_PX_W};
use std::time::Duration;

/// Arrow keys rotate by this many cells' worth of drag.
const NUDGE_CELLS: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum AppEvent {
    Quit,
    View(Interaction),
}

pub(crate) fn collect_input_nonblocking(max_frame_time: Duration) -> anyhow::Result<Vec<AppEvent>> {
    let mut out = Vec::new();

    // poll with a tiny timeout so we stay responsive
    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        if let Some(ev) = map_event(event::read()?) {
            out.push(ev);
            if out.len() >= 64 {
                break;
            }
        }
    }
    Ok(out)
}

pub(crate) fn map_event(ev: Event) -> Option<AppEvent> {
    match ev {
        Event::Key(k) => {
            if k.kind != KeyEventKind::Press && k.kind != KeyEventKind::Repeat {
                return None;
            }
            if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL) {
                return Some(AppEvent::Quit);
            }
            let view = |i| Some(AppEvent::View(i));
            match k.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => Some(AppEvent::Quit),
                KeyCode::Esc => view(Interaction::Dismiss),
                KeyCode::Tab => view(Interaction::SelectNext),
                KeyCode::BackTab => view(Interaction::SelectPrev),
                KeyCode::Char('0') => view(Interaction::SelectCentral),
                KeyCode::Char('+') | KeyCode::Char('=') => view(Interaction::Wheel { delta: -1.0 }),
                KeyCode::Char('-') => view(Interaction::Wheel { delta: 1.0 }),
                KeyCode::Char('r') | KeyCode::Char('R') => view(Interaction::ResetView),
                KeyCode::Left => view(Interaction::Nudge {
                    dx: -NUDGE_CELLS * CELL_PX_W,
                    dy: 0.0,
                }),
                KeyCode::Right => view(Interaction::Nudge {
                    dx: NUDGE_CELLS * CELL_PX_W,
                    dy: 0.0,
                }),
                KeyCode::Up => view(Interaction::Nudge {
                    dx: 0.0,
                    dy: -NUDGE_CELLS * CELL_PX_H,
                }),
                KeyCode::Down => view(Interaction::Nudge {
                    dx: 0.0,
                    dy: NUDGE_CELLS * CELL_PX_H,
                }),
                _ => None,
            }
        }
        Event::Mouse(m) => {
            let (col, row) = (m.column, m.row);
            let i = match m.kind {
                MouseEventKind::Down(MouseButton::Left) => Interaction::PointerDown { col, row },
                MouseEventKind::Drag(MouseButton::Left) => Interaction::PointerMove { col, row },
                MouseEventKind::Up(MouseButton::Left) => Interaction::PointerUp { col, row },
                MouseEventKind::ScrollUp => Interaction::Wheel { delta: -1.0 },
                MouseEventKind::ScrollDown => Interaction::Wheel { delta: 1.0 },
                MouseEventKind::Down(MouseButton::Right) => Interaction::Dismiss,
                _ => return None,
            };
            Some(AppEvent::View(i))
        }
        Event::FocusLost => Some(AppEvent::View(Interaction::PointerLeave)),
        Event::Resize(cols, rows) => Some(AppEvent::View(Interaction::Resize { cols, rows })),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn mouse_maps_to_pointer_events() {
        assert_eq!(
            map_event(mouse(MouseEventKind::Down(MouseButton::Left), 3, 4)),
            Some(AppEvent::View(Interaction::PointerDown { col: 3, row: 4 }))
        );
        assert_eq!(
            map_event(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 4)),
            Some(AppEvent::View(Interaction::PointerMove { col: 5, row: 4 }))
        );
        assert_eq!(
            map_event(mouse(MouseEventKind::ScrollUp, 0, 0)),
            Some(AppEvent::View(Interaction::Wheel { delta: -1.0 }))
        );
        assert_eq!(map_event(mouse(MouseEventKind::Moved, 1, 1)), None);
    }

    #[test]
    fn keys_map_to_actions() {
        let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(map_event(key(KeyCode::Char('q'))), Some(AppEvent::Quit));
        assert_eq!(
            map_event(key(KeyCode::Esc)),
            Some(AppEvent::View(Interaction::Dismiss))
        );
        assert_eq!(
            map_event(key(KeyCode::Tab)),
            Some(AppEvent::View(Interaction::SelectNext))
        );
        assert_eq!(
            map_event(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))),
            Some(AppEvent::Quit)
        );
    }

    #[test]
    fn focus_and_resize() {
        assert_eq!(
            map_event(Event::FocusLost),
            Some(AppEvent::View(Interaction::PointerLeave))
        );
        assert_eq!(
            map_event(Event::Resize(100, 30)),
            Some(AppEvent::View(Interaction::Resize { cols: 100, rows: 30 }))
        );
    }
}
