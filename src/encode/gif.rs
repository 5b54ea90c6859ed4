use std::{
    io::Write,
    path::{Path, PathBuf},
};

use image::codecs::gif::{GifEncoder, Repeat};

use crate::{
    animation::planner::AnimationPlan,
    foundation::error::{DialogError, DialogResult},
    raster::indexed::Palette,
};

/// Write `plan` as an infinitely looping GIF.
///
/// Palette index 0 becomes a fully transparent pixel. Frames keep the previous frame in
/// place, so pixels the optimizer cleared show the earlier content through.
#[tracing::instrument(skip_all, fields(frames = plan.len()))]
pub fn encode_gif<W: Write>(plan: &AnimationPlan, palette: &Palette, writer: W) -> DialogResult<()> {
    if plan.is_empty() {
        return Err(DialogError::encode("animation plan has no frames"));
    }

    let mut encoder = GifEncoder::new(writer);
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| DialogError::encode(format!("set gif repeat: {e}")))?;

    for (i, frame) in plan.frames.iter().enumerate() {
        let (width, height) = (frame.image.width(), frame.image.height());
        let rgba = image::RgbaImage::from_raw(width, height, frame.image.to_rgba8(palette))
            .ok_or_else(|| DialogError::encode(format!("frame {i} buffer size mismatch")))?;
        let delay = image::Delay::from_numer_denom_ms(u32::from(frame.delay_cs) * 10, 1);

        encoder
            .encode_frame(image::Frame::from_parts(rgba, 0, 0, delay))
            .map_err(|e| DialogError::encode(format!("encode gif frame {i}: {e}")))?;
    }

    tracing::debug!(frames = plan.len(), "gif encoded");
    Ok(())
}

/// Encode to a file, creating parent directories as needed.
pub fn write_gif_file(plan: &AnimationPlan, palette: &Palette, path: &Path) -> DialogResult<()> {
    ensure_parent_dir(path)?;
    let file = std::fs::File::create(path)
        .map_err(|e| DialogError::encode(format!("create '{}': {e}", path.display())))?;
    let mut out = std::io::BufWriter::new(file);
    encode_gif(plan, palette, &mut out)?;
    out.flush()
        .map_err(|e| DialogError::encode(format!("flush '{}': {e}", path.display())))
}

/// Create the directory `path` will be written into. A bare file name needs nothing.
pub fn ensure_parent_dir(path: &Path) -> DialogResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir).map_err(|e| {
            DialogError::encode(format!("create output directory '{}': {e}", dir.display()))
        }),
        _ => Ok(()),
    }
}

/// `<dir>/<stem>.gif`.
pub fn gif_path_in(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}.gif"))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
