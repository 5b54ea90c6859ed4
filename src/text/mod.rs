//! Line breaking and the scrolling two-line view.

pub mod window;
pub mod wrap;
