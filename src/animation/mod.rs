//! Frame budgets, reveal cursors and the per-paragraph animation plan.

/// Frame planning over wrapped paragraphs.
pub mod planner;
/// Evenly spaced reveal cursors.
pub mod schedule;
