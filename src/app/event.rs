//! Terminal event abstraction.
//!
//! Crossterm's reader is blocking, so it runs on a blocking thread and
//! forwards translated events over a channel; the main loop only ever awaits
//! the receiver.  Wheel motion is lifted out of the raw mouse stream because
//! it is the terminal's equivalent of a page scroll.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wheel {
    Up,
    Down,
}

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Wheel(Wheel),
    /// Non-wheel mouse activity (clicks on the navigation rail).
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

impl AppEvent {
    /// Translate a raw crossterm event; `None` for events the app ignores.
    pub fn from_crossterm(ev: CtEvent) -> Option<Self> {
        match ev {
            // Windows reports key releases too.
            CtEvent::Key(k) if k.kind == KeyEventKind::Release => None,
            CtEvent::Key(k) => Some(AppEvent::Key(k)),
            CtEvent::Mouse(m) => Some(match m.kind {
                MouseEventKind::ScrollUp => AppEvent::Wheel(Wheel::Up),
                MouseEventKind::ScrollDown => AppEvent::Wheel(Wheel::Down),
                _ => AppEvent::Mouse(m),
            }),
            CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Spawns a blocking reader that polls the terminal and sends events through
/// the returned channel.  A `Tick` is sent whenever `tick_rate` passes quietly.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let next = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(ev) => match AppEvent::from_crossterm(ev) {
                    Some(app_event) => app_event,
                    None => continue,
                },
                Err(err) => {
                    tracing::warn!(%err, "terminal read failed");
                    continue;
                }
            },
            Ok(false) => AppEvent::Tick,
            Err(err) => {
                tracing::warn!(%err, "terminal poll failed; stopping event reader");
                break;
            }
        };
        if tx.send(next).is_err() {
            break; // receiver dropped
        }
    });

    rx
}
