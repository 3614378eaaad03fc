//! Core algorithms – margin controller, throttling, and the page model.
//!
//! Nothing in this module depends on any TUI or rendering crate, and nothing
//! here reads environment globals: viewport width, time, and the stylable
//! target are all handed in by the caller.

pub mod margin;
pub mod page;
pub mod target;
pub mod throttle;
