/// Palette-indexed frames.
pub mod indexed;
/// Inter-frame transparency compression.
pub mod optimize;
