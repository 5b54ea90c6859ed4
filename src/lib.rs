//! Pokedialog renders typewriter-style dialog box animations, the kind of text box classic
//! handheld RPGs use, and exports them as looping GIFs.
//!
//! # Pipeline overview
//!
//! 1. **Wrap**: each paragraph (text split on `\n`) is greedily broken into lines that fit
//!    the dialog window, measured with the configured font ([`wrap`]).
//! 2. **Schedule**: the paragraph gets a share of the frame budget proportional to its
//!    length, and reveal cursors are spaced evenly across it ([`RevealSchedule`]).
//! 3. **Render**: for every cursor the two-line scrolling view ([`visible_window`]) is drawn
//!    into the window of the background ([`DialogRenderer`]), then held for a few frames at
//!    the end of the paragraph.
//! 4. **Optimize**: pixels unchanged since the last opaque value become transparent
//!    ([`optimize_frames`]).
//! 5. **Encode**: frames are written as an infinitely looping GIF ([`encode_gif`]).
//!
//! Frames are palette-indexed end to end. Index [`TRANSPARENT_INDEX`] is always fully
//! transparent so the diff pass can punch holes without touching the palette.
//!
//! [`DialogDrawer`] wires everything together from a [`DialogConfig`]. The planner itself is
//! generic over [`TextMeasure`] and [`FrameRenderer`], so it can be driven without fonts.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod dialog;
mod encode;
mod foundation;
mod raster;
mod render;
mod text;

pub use animation::planner::{
    AnimateConfig, AnimationPlan, AnimationPlanner, DEFAULT_END_PARAGRAPH_FRAMES,
    DEFAULT_TIME_PER_CHAR, Frame, FrameKind, FrameRenderer, PlanNotice, frame_delay_cs,
};
pub use animation::schedule::{RevealSchedule, paragraph_frame_budget};
pub use assets::decode::{
    Background, classic_background, decode_background, load_background, load_font_bytes,
};
pub use assets::text::{FontAsset, ParleyMeasure, TextBrushRgba8, TextLayoutEngine};
pub use dialog::batch::{
    BatchJob, read_jobs_json, render_batch, render_batch_with, write_batch,
};
pub use dialog::config::{BoxSize, DialogConfig};
pub use dialog::drawer::{DialogDrawer, DialogPlanner, animate_with};
pub use encode::gif::{encode_gif, ensure_parent_dir, gif_path_in, write_gif_file};
pub use foundation::core::{FrameWindow, Rgba8};
pub use foundation::error::{DialogError, DialogResult};
pub use raster::indexed::{IndexedImage, Palette, TRANSPARENT_INDEX};
pub use raster::optimize::optimize_frames;
pub use render::cpu::{DialogRenderer, TextStyle, composite_coverage};
pub use text::window::{prefix_chars, visible_window};
pub use text::wrap::{TextMeasure, split_paragraphs, wrap};
