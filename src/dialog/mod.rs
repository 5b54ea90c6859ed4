//! High-level entry points tying configuration, assets, planning and export together.

/// Parallel rendering of many independent texts.
pub mod batch;
/// JSON dialog configuration.
pub mod config;
pub mod drawer;
