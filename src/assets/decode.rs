use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    foundation::{
        core::{FrameWindow, Rgba8},
        error::{DialogError, DialogResult},
    },
    raster::indexed::{IndexedImage, Palette},
};

/// Background raster already mapped onto the shared palette.
#[derive(Clone, Debug)]
pub struct Background {
    pub image: IndexedImage,
    pub palette: Palette,
}

impl Background {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Decode an encoded image (PNG, GIF, ...) and map it onto `palette`.
pub fn decode_background(bytes: &[u8], palette: &Palette) -> DialogResult<Background> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| DialogError::resource_load(format!("decode background image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let image = IndexedImage::quantize_rgba8(width, height, rgba.as_raw(), palette)?;
    tracing::debug!(width, height, "background decoded");
    Ok(Background {
        image,
        palette: palette.clone(),
    })
}

pub fn load_background(path: &Path, palette: &Palette) -> DialogResult<Background> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read background '{}'", path.display()))
        .map_err(|e| DialogError::resource_load(format!("{e:#}")))?;
    decode_background(&bytes, palette)
}

pub fn load_font_bytes(path: &Path) -> DialogResult<Arc<Vec<u8>>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read font '{}'", path.display()))
        .map_err(|e| DialogError::resource_load(format!("{e:#}")))?;
    Ok(Arc::new(bytes))
}

/// Border thickness of the generated dialog box, in pixels.
const CLASSIC_BORDER_PX: u32 = 6;

/// A generated dialog box: white panel, double black border, and a frame window inset
/// from the border. Used when no background image is configured.
pub fn classic_background(width: u32, height: u32) -> DialogResult<(Background, FrameWindow)> {
    let min_side = CLASSIC_BORDER_PX * 10;
    if width < min_side || height < min_side {
        return Err(DialogError::validation(format!(
            "classic background must be at least {min_side}x{min_side}"
        )));
    }

    let palette = Palette::classic();
    let white = palette.nearest(Rgba8::WHITE);
    let black = palette.nearest(Rgba8::BLACK);

    let mut image = IndexedImage::filled(width, height, white);
    let b = CLASSIC_BORDER_PX;
    // Outer border.
    image.fill_rect(FrameWindow::new(0, 0, width, b), black);
    image.fill_rect(FrameWindow::new(0, height - b, width, b), black);
    image.fill_rect(FrameWindow::new(0, 0, b, height), black);
    image.fill_rect(FrameWindow::new(width - b, 0, b, height), black);
    // Inner rule.
    let inner = 2 * b;
    image.fill_rect(FrameWindow::new(inner, inner, width - 2 * inner, 2), black);
    image.fill_rect(
        FrameWindow::new(inner, height - inner - 2, width - 2 * inner, 2),
        black,
    );
    image.fill_rect(FrameWindow::new(inner, inner, 2, height - 2 * inner), black);
    image.fill_rect(
        FrameWindow::new(width - inner - 2, inner, 2, height - 2 * inner),
        black,
    );

    let pad = 4 * b;
    let window = FrameWindow::new(pad, pad, width - 2 * pad, height - 2 * pad);
    Ok((Background { image, palette }, window))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
