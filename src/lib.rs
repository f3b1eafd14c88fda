//! Terminal task manager with locally persisted sessions.
//!
//! The crate is split the same way the binary runs: [`state`] holds
//! everything the UI renders, [`events`] turns key presses and backend
//! results into state changes, and [`task`] and [`session`] are the shared
//! stores both sides read.

pub mod app;
pub mod backend;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod session;
pub mod state;
pub mod task;
pub mod ui;
pub mod utils;
