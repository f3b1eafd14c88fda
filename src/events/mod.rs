//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: backend calls and store mutations
//! - Terminal events: key presses and ticks

pub mod network;
pub mod terminal;
