use std::{fmt, time::Duration};

use crate::{
    animation::schedule::{RevealSchedule, paragraph_frame_budget},
    raster::{indexed::IndexedImage, optimize::optimize_frames},
    text::{
        window::visible_window,
        wrap::{TextMeasure, split_paragraphs, wrap},
    },
};

/// Hold frames appended after each paragraph when the caller does not choose a count.
pub const DEFAULT_END_PARAGRAPH_FRAMES: usize = 5;

/// Display time per character when no total duration is requested.
pub const DEFAULT_TIME_PER_CHAR: Duration = Duration::from_millis(250);

/// Draws the visible dialog lines onto a fresh copy of the background.
pub trait FrameRenderer {
    /// Render `visible` (at most two lines, top to bottom) into a new raster.
    fn render(&mut self, visible: &[String]) -> IndexedImage;
}

impl<F> FrameRenderer for F
where
    F: FnMut(&[String]) -> IndexedImage,
{
    fn render(&mut self, visible: &[String]) -> IndexedImage {
        self(visible)
    }
}

/// Knobs for one animation request. Zero values mean "pick automatically".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimateConfig {
    /// Requested reveal frame count; 0 or anything above the character count uses one
    /// frame per character.
    pub frame_count: usize,
    /// Requested total duration; zero uses 250ms per character.
    pub duration: Duration,
    /// Hold frames after each paragraph; `None` uses [`DEFAULT_END_PARAGRAPH_FRAMES`].
    pub end_paragraph_frames: Option<usize>,
}

/// A configuration value that was corrected rather than rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanNotice {
    /// The requested frame count exceeded the number of characters.
    FrameCountAdjusted { requested: usize, used: usize },
    /// No frame count was requested; one frame per character is used.
    FrameCountDefaulted { used: usize },
    /// No duration was requested.
    DurationDefaulted { used: Duration },
}

impl fmt::Display for PlanNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameCountAdjusted { requested, used } => write!(
                f,
                "frame count adjusted: requested {requested}, maximum is {used}"
            ),
            Self::FrameCountDefaulted { used } => {
                write!(f, "frame count adjusted: none requested, using {used}")
            }
            Self::DurationDefaulted { used } => {
                write!(f, "duration defaulted to {:.2}s", used.as_secs_f64())
            }
        }
    }
}

/// Why a frame exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    /// Shows the paragraph partially or fully typed.
    Reveal,
    /// Repeats the paragraph's last reveal frame.
    Hold,
}

/// One still of the animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Palette-indexed raster; after [`AnimationPlan::optimize`] unchanged pixels are
    /// transparent.
    pub image: IndexedImage,
    /// Display time in hundredths of a second, always >= 1.
    pub delay_cs: u16,
    /// Paragraph this frame belongs to.
    pub paragraph: usize,
    /// Characters of the paragraph revealed.
    pub cursor: usize,
    /// Reveal step or end-of-paragraph hold.
    pub kind: FrameKind,
    /// Lines drawn on this frame.
    pub visible: Vec<String>,
}

/// Ordered frames for a whole text plus the notices raised while planning them.
#[derive(Clone, Debug)]
pub struct AnimationPlan {
    /// Frames in display order, paragraph by paragraph.
    pub frames: Vec<Frame>,
    /// Settings that were clamped or defaulted, in the order they were applied.
    pub notices: Vec<PlanNotice>,
    /// Frame count the schedule was computed from, after clamping.
    pub frame_count: usize,
    /// Duration the delays were derived from.
    pub duration: Duration,
}

impl AnimationPlan {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn delays(&self) -> Vec<u16> {
        self.frames.iter().map(|f| f.delay_cs).collect()
    }

    /// Sum of all delays; approximates [`AnimationPlan::duration`].
    pub fn total_delay(&self) -> Duration {
        let cs: u64 = self.frames.iter().map(|f| u64::from(f.delay_cs)).sum();
        Duration::from_millis(cs * 10)
    }

    /// Frames belonging to paragraph `k`, in order.
    pub fn paragraph_frames(&self, k: usize) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(move |f| f.paragraph == k)
    }

    /// Rewrite unchanged pixels to the transparent sentinel; see [`optimize_frames`].
    pub fn optimize(&mut self) {
        optimize_frames(self.frames.iter_mut().map(|f| &mut f.image));
    }

    pub fn into_parts(self) -> (Vec<IndexedImage>, Vec<u16>) {
        self.frames
            .into_iter()
            .map(|f| (f.image, f.delay_cs))
            .unzip()
    }
}

/// Turns text into a frame plan using injected measurement and rendering.
pub struct AnimationPlanner<M, R> {
    measure: M,
    renderer: R,
    max_line_width_px: f32,
}

impl<M, R> AnimationPlanner<M, R>
where
    M: TextMeasure,
    R: FrameRenderer,
{
    pub fn new(measure: M, renderer: R, max_line_width_px: f32) -> Self {
        Self {
            measure,
            renderer,
            max_line_width_px,
        }
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Wrap one paragraph with this planner's measurement and line width.
    pub fn wrap_paragraph(&mut self, paragraph: &str) -> Vec<String> {
        wrap(paragraph, self.max_line_width_px, &mut self.measure)
    }

    /// Render one paragraph at a given reveal cursor.
    pub fn render_at(&mut self, paragraph: &str, cursor: usize) -> (IndexedImage, Vec<String>) {
        let lines = self.wrap_paragraph(paragraph);
        let visible = visible_window(&lines, cursor);
        (self.renderer.render(&visible), visible)
    }

    /// Build the full frame sequence for `text`. Never fails; out-of-range settings are
    /// corrected and reported through [`AnimationPlan::notices`].
    #[tracing::instrument(skip_all, fields(chars = text.chars().count()))]
    pub fn plan(&mut self, text: &str, cfg: &AnimateConfig) -> AnimationPlan {
        let text_len = text.chars().count();
        let mut notices = Vec::new();

        let frame_count = if cfg.frame_count == 0 {
            notices.push(PlanNotice::FrameCountDefaulted { used: text_len });
            text_len
        } else if cfg.frame_count > text_len {
            notices.push(PlanNotice::FrameCountAdjusted {
                requested: cfg.frame_count,
                used: text_len,
            });
            text_len
        } else {
            cfg.frame_count
        };

        let duration = if cfg.duration.is_zero() {
            let used = DEFAULT_TIME_PER_CHAR * u32::try_from(text_len).unwrap_or(u32::MAX);
            notices.push(PlanNotice::DurationDefaulted { used });
            used
        } else {
            cfg.duration
        };

        for notice in &notices {
            match notice {
                PlanNotice::FrameCountAdjusted { .. } => tracing::warn!("{notice}"),
                _ => tracing::debug!("{notice}"),
            }
        }

        let paragraphs = split_paragraphs(text);
        let hold = cfg
            .end_paragraph_frames
            .unwrap_or(DEFAULT_END_PARAGRAPH_FRAMES);
        let delay_cs = frame_delay_cs(duration, frame_count + paragraphs.len() * hold);

        let mut frames = Vec::with_capacity(frame_count + paragraphs.len() * (hold + 1));
        for (k, paragraph) in paragraphs.iter().enumerate() {
            let para_len = paragraph.chars().count();
            let budget = paragraph_frame_budget(frame_count, para_len, text_len);
            let lines = self.wrap_paragraph(paragraph);

            tracing::debug!(
                paragraph = k,
                chars = para_len,
                frames = budget,
                lines = lines.len(),
                "planning paragraph"
            );

            for cursor in RevealSchedule::new(para_len, budget) {
                let visible = visible_window(&lines, cursor);
                let image = self.renderer.render(&visible);
                frames.push(Frame {
                    image,
                    delay_cs,
                    paragraph: k,
                    cursor,
                    kind: FrameKind::Reveal,
                    visible,
                });
            }

            let Some(last) = frames.last().cloned() else {
                continue;
            };
            for _ in 0..hold {
                frames.push(Frame {
                    kind: FrameKind::Hold,
                    ..last.clone()
                });
            }
        }

        tracing::debug!(
            frames = frames.len(),
            frame_count,
            delay_cs,
            paragraphs = paragraphs.len(),
            "animation planned"
        );

        AnimationPlan {
            frames,
            notices,
            frame_count,
            duration,
        }
    }
}

/// Per-frame delay in centiseconds, `round(100 * secs / frames)`, never below 1.
pub fn frame_delay_cs(duration: Duration, frames: usize) -> u16 {
    let frames = frames.max(1) as f64;
    let cs = (duration.as_secs_f64() * 100.0 / frames).round();
    cs.clamp(1.0, f64::from(u16::MAX)) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/animation/planner.rs"]
mod tests;
