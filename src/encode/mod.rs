//! Animated container output.

/// Looping GIF export via `image`.
pub mod gif;
