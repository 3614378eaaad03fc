//! Application orchestration — scroll plumbing, state, event loop input.

pub mod event;
pub mod handler;
pub mod scroll_source;
pub mod state;
