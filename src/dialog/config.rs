use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    foundation::{
        core::FrameWindow,
        error::{DialogError, DialogResult},
    },
    render::cpu::TextStyle,
};

/// Size of the generated dialog box when no background image is configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoxSize {
    pub width: u32,
    pub height: u32,
}

impl Default for BoxSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 192,
        }
    }
}

/// Look of the dialog box: background, writable window, font and text style.
///
/// Relative paths are resolved against [`DialogConfig::root`], which is the directory of
/// the JSON file when loaded with [`DialogConfig::from_json_file`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DialogConfig {
    /// Background image. `None` draws a plain bordered box of [`DialogConfig::box_size`].
    #[serde(default)]
    pub background: Option<PathBuf>,
    /// Writable rectangle. Required with a background image; derived for the generated box.
    #[serde(default)]
    pub window: Option<FrameWindow>,
    /// TrueType/OpenType font file. `None` uses the system sans-serif face.
    #[serde(default)]
    pub font: Option<PathBuf>,
    #[serde(default)]
    pub box_size: BoxSize,
    #[serde(default)]
    pub text: TextStyle,
    #[serde(skip)]
    pub root: PathBuf,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            background: None,
            window: None,
            font: None,
            box_size: BoxSize::default(),
            text: TextStyle::default(),
            root: PathBuf::from("."),
        }
    }
}

impl DialogConfig {
    pub fn from_json_file(path: &Path) -> DialogResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open dialog config '{}'", path.display()))?;
        let mut cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            DialogError::validation(format!("parse dialog config '{}': {e}", path.display()))
        })?;
        cfg.root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> DialogResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| DialogError::validation(format!("parse dialog config: {e}")))
    }

    pub fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }

    pub fn font_path(&self) -> Option<PathBuf> {
        self.font.as_deref().map(|p| self.resolve(p))
    }

    pub fn background_path(&self) -> Option<PathBuf> {
        self.background.as_deref().map(|p| self.resolve(p))
    }

    pub fn validate(&self) -> DialogResult<()> {
        self.text.validate()?;
        if self.background.is_some() && self.window.is_none() {
            return Err(DialogError::validation(
                "a background image needs an explicit frame window",
            ));
        }
        if let Some(w) = self.window
            && w.is_empty()
        {
            return Err(DialogError::validation(
                "frame window width/height must be non-zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dialog/config.rs"]
mod tests;
