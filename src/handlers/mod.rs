//! Event handling: translates raw terminal events into application state
//! changes.

pub mod keys;
