//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the core page model and the latest margin and turns them
//! into cells on the terminal.  No scroll state is mutated here.

pub mod layout;
pub mod page_widget;
pub mod rail;
pub mod status;
pub mod theme;
