use std::sync::Arc;

use crate::foundation::{
    core::{FrameWindow, Rgba8},
    error::{DialogError, DialogResult},
};

/// Palette index reserved for "transparent, keep what the previous frame showed".
pub const TRANSPARENT_INDEX: u8 = 0;

/// Shared color table. Index 0 is always the transparent sentinel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Arc<Vec<Rgba8>>,
}

impl Palette {
    /// Build a palette from opaque colors; the transparent sentinel is prepended.
    pub fn new(colors: impl IntoIterator<Item = Rgba8>) -> DialogResult<Self> {
        let mut all = vec![Rgba8::TRANSPARENT];
        all.extend(colors);
        if all.len() > 256 {
            return Err(DialogError::validation(format!(
                "palette has {} entries, at most 256 are addressable",
                all.len()
            )));
        }
        Ok(Self {
            colors: Arc::new(all),
        })
    }

    /// The classic 9 entry palette: transparent, black, then the primaries and white.
    pub fn classic() -> Self {
        Self {
            colors: Arc::new(vec![
                Rgba8::TRANSPARENT,
                Rgba8::opaque(0x00, 0x00, 0x00),
                Rgba8::opaque(0x00, 0x00, 0xff),
                Rgba8::opaque(0x00, 0xff, 0x00),
                Rgba8::opaque(0x00, 0xff, 0xff),
                Rgba8::opaque(0xff, 0x00, 0x00),
                Rgba8::opaque(0xff, 0x00, 0xff),
                Rgba8::opaque(0xff, 0xff, 0x00),
                Rgba8::opaque(0xff, 0xff, 0xff),
            ]),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgba8] {
        &self.colors
    }

    pub fn color(&self, index: u8) -> Rgba8 {
        self.colors
            .get(usize::from(index))
            .copied()
            .unwrap_or(Rgba8::TRANSPARENT)
    }

    /// Index of the nearest entry by squared RGBA distance; first match wins ties.
    pub fn nearest(&self, c: Rgba8) -> u8 {
        let mut best = 0usize;
        let mut best_d = u32::MAX;
        for (i, p) in self.colors.iter().enumerate() {
            let d = p.distance_sq(c);
            if d < best_d {
                best = i;
                best_d = d;
                if d == 0 {
                    break;
                }
            }
        }
        best as u8
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}

/// Paletted raster: one palette index per pixel, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl IndexedImage {
    /// Image filled with a single palette index.
    pub fn filled(width: u32, height: u32, index: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![index; width as usize * height as usize],
        }
    }

    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> DialogResult<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(DialogError::validation(format!(
                "indexed image byte length {} does not match {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Map straight RGBA8 pixels onto the nearest palette entries.
    pub fn quantize_rgba8(
        width: u32,
        height: u32,
        rgba: &[u8],
        palette: &Palette,
    ) -> DialogResult<Self> {
        if rgba.len() != width as usize * height as usize * 4 {
            return Err(DialogError::validation("rgba byte length mismatch"));
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| palette.nearest(Rgba8::new(px[0], px[1], px[2], px[3])))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    pub fn set(&mut self, x: u32, y: u32, index: u8) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = index;
        }
    }

    /// Fill the intersection of `rect` with the image.
    pub fn fill_rect(&mut self, rect: FrameWindow, index: u8) {
        let x1 = rect.right().min(self.width);
        let y1 = rect.bottom().min(self.height);
        for y in rect.y.min(y1)..y1 {
            let row = y as usize * self.width as usize;
            self.pixels[row + rect.x.min(x1) as usize..row + x1 as usize].fill(index);
        }
    }

    /// Expand to straight RGBA8; the transparent sentinel becomes alpha 0.
    pub fn to_rgba8(&self, palette: &Palette) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for &idx in &self.pixels {
            out.extend_from_slice(&palette.color(idx).to_array());
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/indexed.rs"]
mod tests;
