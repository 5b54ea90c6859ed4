/// Geometry and color primitives.
pub mod core;
/// Crate error type.
pub mod error;
