use std::{borrow::Cow, sync::Arc};

use parley::fontique::{Collection, CollectionOptions, GenericFamily, SourceCache};

use crate::{
    foundation::{
        core::Rgba8,
        error::{DialogError, DialogResult},
    },
    text::wrap::TextMeasure,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Font bytes plus the family name Parley resolved from them.
#[derive(Clone)]
pub struct FontAsset {
    pub bytes: Arc<Vec<u8>>,
    pub family: String,
}

impl std::fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontAsset")
            .field("bytes_len", &self.bytes.len())
            .field("family", &self.family)
            .finish()
    }
}

/// Stateful helper for building single-line Parley layouts with one registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    font: FontAsset,
}

impl TextLayoutEngine {
    /// Register `font_bytes` with a fresh font context.
    pub fn new(font_bytes: Arc<Vec<u8>>) -> DialogResult<Self> {
        // Only the registered font: glyph ids must come from the face we rasterize with.
        let mut font_ctx = parley::FontContext {
            collection: Collection::new(CollectionOptions {
                shared: false,
                system_fonts: false,
            }),
            source_cache: SourceCache::default(),
        };
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.as_ref().clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            DialogError::resource_load("no font families registered from font bytes")
        })?;

        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| DialogError::resource_load("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            font: FontAsset {
                bytes: font_bytes,
                family,
            },
        })
    }

    pub fn font(&self) -> &FontAsset {
        &self.font
    }

    /// Shape `text` as one unbroken line.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

/// Load the platform's default sans-serif face.
///
/// Families are tried in the system's preference order; collection files whose default
/// face is not the first one are skipped. [`DialogError::ResourceLoad`] if none loads.
pub fn system_sans_font() -> DialogResult<FontAsset> {
    let mut collection = Collection::new(CollectionOptions {
        shared: false,
        system_fonts: true,
    });
    let ids: Vec<_> = collection
        .generic_families(GenericFamily::SansSerif)
        .collect();

    for id in ids {
        let Some(family) = collection.family(id) else {
            continue;
        };
        let Some(font) = family.default_font() else {
            continue;
        };
        if font.index() != 0 {
            continue;
        }
        let Some(blob) = font.load(None) else {
            continue;
        };
        tracing::debug!(family = family.name(), "resolved system sans-serif");
        return Ok(FontAsset {
            bytes: Arc::new(blob.data().to_vec()),
            family: family.name().to_string(),
        });
    }

    Err(DialogError::resource_load(
        "no font configured and no system sans-serif font found",
    ))
}

/// [`TextMeasure`] backed by Parley shaping at a fixed size.
pub struct ParleyMeasure {
    engine: TextLayoutEngine,
    size_px: f32,
}

impl ParleyMeasure {
    pub fn new(font_bytes: Arc<Vec<u8>>, size_px: f32) -> DialogResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(DialogError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        Ok(Self {
            engine: TextLayoutEngine::new(font_bytes)?,
            size_px,
        })
    }

    pub fn family(&self) -> &str {
        &self.engine.font().family
    }
}

impl TextMeasure for ParleyMeasure {
    fn width_px(&mut self, text: &str) -> f32 {
        self.engine
            .layout_line(text, self.size_px, TextBrushRgba8::default())
            .width()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
