/// CPU glyph rasterization into the dialog window.
pub mod cpu;
