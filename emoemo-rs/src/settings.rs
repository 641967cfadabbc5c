//! User-facing emoji settings and the per-render request built from them.

use crate::color::Rgb;
use crate::error::EmojiResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default font family for new settings.
pub const DEFAULT_FONT_FAMILY: &str = "'Noto Sans JP'";

/// Text and colors, without the font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Text to render; `'\n'` separates lines.
    pub text: String,
    pub text_color: Rgb,
    pub background_color: Rgb,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            text: String::new(),
            text_color: Rgb::BLACK,
            background_color: Rgb::WHITE,
        }
    }
}

impl TextStyle {
    /// Whether the text has nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Everything the user picks for one emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmojiSettings {
    #[serde(flatten)]
    pub style: TextStyle,
    /// CSS font family list, e.g. `'Noto Sans JP', sans-serif`.
    pub font_family: String,
}

impl Default for EmojiSettings {
    fn default() -> Self {
        Self {
            style: TextStyle::default(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

impl EmojiSettings {
    /// Default settings with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            style: TextStyle {
                text: text.into(),
                ..TextStyle::default()
            },
            ..Self::default()
        }
    }

    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> EmojiResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Input to one render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Lines in display order.
    pub lines: Vec<String>,
    pub font_family: String,
    pub text_color: Rgb,
    pub background_color: Rgb,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl RenderRequest {
    /// Build a request by splitting the settings text on `'\n'`.
    pub fn from_settings(settings: &EmojiSettings, canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            lines: split_lines(&settings.style.text),
            font_family: settings.font_family.clone(),
            text_color: settings.style.text_color,
            background_color: settings.style.background_color,
            canvas_width,
            canvas_height,
        }
    }

    /// True when every line is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }

    /// The lines joined back with `'\n'`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Split text into lines on `'\n'`, dropping a trailing `'\r'` from each.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}
