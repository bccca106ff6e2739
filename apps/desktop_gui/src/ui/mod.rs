//! UI layer: the egui app shell.

pub mod app;

pub use app::UserDirectoryApp;
