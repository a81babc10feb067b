//! Terminal event abstraction.
//!
//! Wraps crossterm events into the few inputs the path cares about and runs a
//! background reader that forwards them over a channel so the main loop stays
//! non-blocking.  Mouse motion and wheel events are split apart here so the
//! handler never has to look at raw `MouseEventKind`s.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    /// One wheel notch.  `down` = towards the end of the document.
    Wheel { down: bool },
    /// Pointer moved (or dragged) to a cell.
    Pointer { column: u16, row: u16 },
    Resize(u16, u16),
    Tick,
}

impl AppEvent {
    /// Translate a raw crossterm event.  `None` for events nothing listens to.
    pub fn from_crossterm(ev: CtEvent) -> Option<Self> {
        match ev {
            // Only presses; release/repeat events would double-scroll on
            // terminals that report them.
            CtEvent::Key(k) if k.kind == KeyEventKind::Press => Some(AppEvent::Key(k)),
            CtEvent::Mouse(m) => Self::from_mouse(m),
            CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    }

    fn from_mouse(m: MouseEvent) -> Option<Self> {
        match m.kind {
            MouseEventKind::ScrollDown => Some(AppEvent::Wheel { down: true }),
            MouseEventKind::ScrollUp => Some(AppEvent::Wheel { down: false }),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(AppEvent::Pointer {
                column: m.column,
                row: m.row,
            }),
            _ => None,
        }
    }
}

/// Spawns a blocking reader that polls the terminal for events and sends
/// them through the returned channel.  Sends `Tick` when nothing happens
/// within `tick_rate`.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let has_event = event::poll(tick_rate).unwrap_or(false);
        let app_event = if has_event {
            match event::read().ok().and_then(AppEvent::from_crossterm) {
                Some(e) => e,
                None => continue,
            }
        } else {
            AppEvent::Tick
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton};

    fn mouse(kind: MouseEventKind) -> CtEvent {
        CtEvent::Mouse(MouseEvent {
            kind,
            column: 7,
            row: 3,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn wheel_and_motion_are_split() {
        assert_eq!(
            AppEvent::from_crossterm(mouse(MouseEventKind::ScrollDown)),
            Some(AppEvent::Wheel { down: true })
        );
        assert_eq!(
            AppEvent::from_crossterm(mouse(MouseEventKind::Drag(MouseButton::Left))),
            Some(AppEvent::Pointer { column: 7, row: 3 })
        );
        assert_eq!(AppEvent::from_crossterm(mouse(MouseEventKind::Down(MouseButton::Left))), None);
    }

    #[test]
    fn key_releases_are_dropped() {
        let mut release = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(AppEvent::from_crossterm(CtEvent::Key(release)), None);

        let press = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(AppEvent::from_crossterm(CtEvent::Key(press)), Some(AppEvent::Key(press)));
    }
}
