//! Command queue and worker runtime bridging the UI thread to the controller.

pub mod commands;
pub mod runtime;
