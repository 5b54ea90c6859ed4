use crate::foundation::error::{DialogError, DialogResult};

/// Writable rectangle inside the background where dialog text is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FrameWindow {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Window from corner coordinates, `max` exclusive.
    pub fn from_corners(min: (u32, u32), max: (u32, u32)) -> DialogResult<Self> {
        if max.0 < min.0 || max.1 < min.1 {
            return Err(DialogError::validation(
                "frame window max corner must be >= min corner",
            ));
        }
        Ok(Self::new(min.0, min.1, max.0 - min.0, max.1 - min.1))
    }

    pub fn right(self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Checks that the window is non-empty and lies inside a `width x height` raster.
    pub fn validate_within(self, width: u32, height: u32) -> DialogResult<()> {
        if self.is_empty() {
            return Err(DialogError::validation(
                "frame window width/height must be non-zero",
            ));
        }
        if self.right() > width || self.bottom() > height {
            return Err(DialogError::validation(format!(
                "frame window {}x{}+{}+{} exceeds background {width}x{height}",
                self.width, self.height, self.x, self.y
            )));
        }
        Ok(())
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::opaque(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::opaque(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xff)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Squared euclidean distance over all four channels.
    pub fn distance_sq(self, other: Self) -> u32 {
        let d = |a: u8, b: u8| {
            let v = i32::from(a) - i32::from(b);
            (v * v) as u32
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b) + d(self.a, other.a)
    }

    /// Source-over of a premultiplied pixel onto this opaque-or-not straight color.
    pub fn under_premul(self, src_premul: [u8; 4]) -> Self {
        let inv = 255 - u16::from(src_premul[3]);
        let mix = |dst: u8, src: u8| -> u8 {
            let v = u16::from(src) + (u16::from(dst) * inv + 127) / 255;
            v.min(255) as u8
        };
        Self {
            r: mix(self.r, src_premul[0]),
            g: mix(self.g, src_premul[1]),
            b: mix(self.b, src_premul[2]),
            a: (u16::from(src_premul[3]) + (u16::from(self.a) * inv + 127) / 255).min(255) as u8,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
