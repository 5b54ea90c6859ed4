use std::sync::Arc;

use crate::{
    animation::planner::FrameRenderer,
    assets::{
        decode::Background,
        text::{TextBrushRgba8, TextLayoutEngine},
    },
    foundation::{
        core::{FrameWindow, Rgba8},
        error::{DialogError, DialogResult},
    },
    raster::indexed::{IndexedImage, Palette},
};

/// How dialog lines are placed inside the frame window.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    /// Font size as a fraction of the frame window height.
    #[serde(default = "TextStyle::default_size_ratio")]
    pub size_ratio: f32,
    /// Distance between baselines, in multiples of the font size.
    #[serde(default = "TextStyle::default_line_spacing")]
    pub line_spacing: f32,
    #[serde(default = "TextStyle::default_color")]
    pub color: Rgba8,
}

impl TextStyle {
    fn default_size_ratio() -> f32 {
        0.33
    }

    fn default_line_spacing() -> f32 {
        1.5
    }

    fn default_color() -> Rgba8 {
        Rgba8::BLACK
    }

    pub fn validate(&self) -> DialogResult<()> {
        if !self.size_ratio.is_finite() || self.size_ratio <= 0.0 {
            return Err(DialogError::validation(
                "text size_ratio must be finite and > 0",
            ));
        }
        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            return Err(DialogError::validation(
                "text line_spacing must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Font size in pixels for a window of the given height.
    pub fn size_px(&self, window: FrameWindow) -> f32 {
        window.height as f32 * self.size_ratio
    }

    /// Baseline of visible line `n`, relative to the window top.
    pub fn baseline_px(&self, size_px: f32, n: usize) -> f32 {
        size_px + size_px * self.line_spacing * n as f32
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size_ratio: Self::default_size_ratio(),
            line_spacing: Self::default_line_spacing(),
            color: Self::default_color(),
        }
    }
}

/// CPU glyph renderer: shapes lines with Parley, rasterizes them with `vello_cpu` inside
/// the frame window and folds the coverage back onto the background palette.
pub struct DialogRenderer {
    background: Arc<Background>,
    window: FrameWindow,
    width_u16: u16,
    height_u16: u16,
    style: TextStyle,
    size_px: f32,
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl DialogRenderer {
    pub fn new(
        background: Arc<Background>,
        window: FrameWindow,
        font_bytes: Arc<Vec<u8>>,
        style: TextStyle,
    ) -> DialogResult<Self> {
        window.validate_within(background.width(), background.height())?;
        style.validate()?;

        let width_u16: u16 = window
            .width
            .try_into()
            .map_err(|_| DialogError::validation("frame window width exceeds u16"))?;
        let height_u16: u16 = window
            .height
            .try_into()
            .map_err(|_| DialogError::validation("frame window height exceeds u16"))?;

        let engine = TextLayoutEngine::new(Arc::clone(&font_bytes))?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.as_ref().clone()),
            0,
        );

        Ok(Self {
            background,
            window,
            width_u16,
            height_u16,
            style,
            size_px: style.size_px(window),
            engine,
            font,
        })
    }

    pub fn window(&self) -> FrameWindow {
        self.window
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Window-sized premultiplied RGBA8 coverage of `visible`.
    fn rasterize_lines(&mut self, visible: &[String]) -> vello_cpu::Pixmap {
        let mut ctx = vello_cpu::RenderContext::new(self.width_u16, self.height_u16);
        let brush = TextBrushRgba8::from(self.style.color);

        for (n, text) in visible.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            let layout = self.engine.layout_line(text, self.size_px, brush);
            let baseline = self.style.baseline_px(self.size_px, n);

            for line in layout.lines() {
                let shift = f64::from(baseline - line.metrics().baseline);
                ctx.set_transform(vello_cpu::kurbo::Affine::translate((0.0, shift)));

                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };

                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));

                    // Line-absolute pen positions; `glyphs()` only carries cluster offsets.
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&self.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width_u16, self.height_u16);
        ctx.render_to_pixmap(&mut pixmap);
        pixmap
    }
}

impl FrameRenderer for DialogRenderer {
    fn render(&mut self, visible: &[String]) -> IndexedImage {
        let mut frame = self.background.image.clone();
        if visible.iter().all(|l| l.is_empty()) {
            return frame;
        }

        let pixmap = self.rasterize_lines(visible);
        composite_coverage(
            &mut frame,
            self.window,
            pixmap.data_as_u8_slice(),
            &self.background.palette,
        );
        frame
    }
}

/// Blend premultiplied RGBA8 `coverage` (window-sized) over `frame` inside `window`, then
/// snap each touched pixel back to the nearest palette entry.
pub fn composite_coverage(
    frame: &mut IndexedImage,
    window: FrameWindow,
    coverage: &[u8],
    palette: &Palette,
) {
    let w = window.width as usize;
    for (i, px) in coverage.chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let x = window.x + (i % w) as u32;
        let y = window.y + (i / w) as u32;
        let Some(idx) = frame.get(x, y) else {
            continue;
        };
        let blended = palette.color(idx).under_premul([px[0], px[1], px[2], px[3]]);
        frame.set(x, y, palette.nearest(blended));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
