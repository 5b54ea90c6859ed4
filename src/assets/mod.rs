//! Asset loading: background images and fonts.

pub mod decode;
/// Parley-backed font registration and text measurement.
pub mod text;
