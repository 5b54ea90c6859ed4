use std::{io::Write, path::Path, sync::Arc};

use crate::{
    animation::planner::{AnimateConfig, AnimationPlan, AnimationPlanner, FrameRenderer},
    assets::{
        decode::{Background, classic_background, load_background, load_font_bytes},
        text::{ParleyMeasure, system_sans_font},
    },
    dialog::config::DialogConfig,
    encode::gif::{encode_gif, write_gif_file},
    foundation::{
        core::FrameWindow,
        error::{DialogError, DialogResult},
    },
    raster::indexed::{IndexedImage, Palette},
    render::cpu::{DialogRenderer, TextStyle},
    text::wrap::TextMeasure,
};

/// Planner wired to the Parley measure and the CPU glyph renderer.
pub type DialogPlanner = AnimationPlanner<ParleyMeasure, DialogRenderer>;

/// Loaded dialog assets. Cheap to share: every request builds its own planner, so one
/// drawer can serve many concurrent animations.
#[derive(Clone, Debug)]
pub struct DialogDrawer {
    background: Arc<Background>,
    window: FrameWindow,
    font_bytes: Arc<Vec<u8>>,
    style: TextStyle,
}

impl DialogDrawer {
    /// Load every asset named by `cfg`, falling back to the system sans-serif face when no
    /// font is configured. Unreadable or unparsable files are [`DialogError::ResourceLoad`].
    pub fn from_config(cfg: &DialogConfig) -> DialogResult<Self> {
        cfg.validate()?;
        let font_bytes = match cfg.font_path() {
            Some(path) => load_font_bytes(&path)?,
            None => {
                let font = system_sans_font()?;
                tracing::info!(family = %font.family, "no font configured, using system font");
                font.bytes
            }
        };

        let (background, window) = match cfg.background_path() {
            Some(path) => {
                let bg = load_background(&path, &Palette::classic())?;
                let window = cfg.window.ok_or_else(|| {
                    DialogError::validation("a background image needs an explicit frame window")
                })?;
                (bg, window)
            }
            None => {
                let (bg, derived) = classic_background(cfg.box_size.width, cfg.box_size.height)?;
                (bg, cfg.window.unwrap_or(derived))
            }
        };

        Self::new(Arc::new(background), window, font_bytes, cfg.text)
    }

    pub fn new(
        background: Arc<Background>,
        window: FrameWindow,
        font_bytes: Arc<Vec<u8>>,
        style: TextStyle,
    ) -> DialogResult<Self> {
        window.validate_within(background.width(), background.height())?;
        style.validate()?;
        let drawer = Self {
            background,
            window,
            font_bytes,
            style,
        };
        // Fail on a bad font now rather than on the first request.
        drawer.planner()?;
        Ok(drawer)
    }

    pub fn palette(&self) -> &Palette {
        &self.background.palette
    }

    pub fn window(&self) -> FrameWindow {
        self.window
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Fresh planner with its own shaping state.
    pub fn planner(&self) -> DialogResult<DialogPlanner> {
        let size_px = self.style.size_px(self.window);
        let measure = ParleyMeasure::new(Arc::clone(&self.font_bytes), size_px)?;
        let renderer = DialogRenderer::new(
            Arc::clone(&self.background),
            self.window,
            Arc::clone(&self.font_bytes),
            self.style,
        )?;
        Ok(AnimationPlanner::new(
            measure,
            renderer,
            self.window.width as f32,
        ))
    }

    /// Plan, render and transparency-compress the animation for `text`.
    #[tracing::instrument(skip_all)]
    pub fn animate(&self, text: &str, cfg: &AnimateConfig) -> DialogResult<AnimationPlan> {
        let mut planner = self.planner()?;
        Ok(animate_with(&mut planner, text, cfg))
    }

    /// Render a single paragraph at `cursor` revealed characters.
    pub fn frame_at(&self, paragraph: &str, cursor: usize) -> DialogResult<IndexedImage> {
        let mut planner = self.planner()?;
        let (image, _) = planner.render_at(paragraph, cursor);
        Ok(image)
    }

    /// Animate `text` and stream it as a GIF into `writer`.
    pub fn render_gif<W: Write>(
        &self,
        text: &str,
        cfg: &AnimateConfig,
        writer: W,
    ) -> DialogResult<AnimationPlan> {
        let plan = self.animate(text, cfg)?;
        encode_gif(&plan, self.palette(), writer)?;
        Ok(plan)
    }

    /// Animate `text` into a GIF file.
    pub fn render_gif_file(
        &self,
        text: &str,
        cfg: &AnimateConfig,
        path: &Path,
    ) -> DialogResult<AnimationPlan> {
        let plan = self.animate(text, cfg)?;
        write_gif_file(&plan, self.palette(), path)?;
        Ok(plan)
    }
}

/// Plan with any planner, then run the frame diff pass over the result.
pub fn animate_with<M, R>(
    planner: &mut AnimationPlanner<M, R>,
    text: &str,
    cfg: &AnimateConfig,
) -> AnimationPlan
where
    M: TextMeasure,
    R: FrameRenderer,
{
    let mut plan = planner.plan(text, cfg);
    plan.optimize();
    plan
}

#[cfg(test)]
#[path = "../../tests/unit/dialog/drawer.rs"]
mod tests;
