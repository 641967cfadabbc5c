//! Render configuration.

use crate::error::{EmojiError, EmojiResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Largest canvas edge the raster surface accepts.
pub const MAX_CANVAS_DIMENSION: u32 = 32767;

/// How text is fitted onto the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    /// Trim each line to its ink box, stack the lines and center each one.
    #[default]
    PerLine,
    /// Trim all lines together as one block.
    Block,
    /// Largest font whose lines fit vertically; compress horizontally if too wide.
    HeightFirst,
    /// Largest font whose lines fit both horizontally and vertically.
    FitBoth,
}

impl FitMode {
    pub const ALL: [FitMode; 4] = [
        FitMode::PerLine,
        FitMode::Block,
        FitMode::HeightFirst,
        FitMode::FitBoth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FitMode::PerLine => "per-line",
            FitMode::Block => "block",
            FitMode::HeightFirst => "height-first",
            FitMode::FitBoth => "fit-both",
        }
    }

    /// Whether this mode crops rasters to their ink box.
    pub fn is_trimming(&self) -> bool {
        matches!(self, FitMode::PerLine | FitMode::Block)
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitMode {
    type Err = EmojiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        FitMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| EmojiError::InvalidFitMode(s.to_string()))
    }
}

/// Layout parameters for rendering. Every field has a default, so a JSON
/// file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Logical canvas width in pixels.
    pub canvas_width: u32,
    /// Logical canvas height in pixels.
    pub canvas_height: u32,
    /// Fraction of each canvas edge left empty on either side when trimming.
    pub padding: f32,
    /// Offscreen font size as a multiple of the canvas width when trimming.
    pub oversize: f32,
    /// Line advance as a multiple of the font size in whole-block trimming.
    pub line_height_ratio: f32,
    /// Gap between stacked lines as a fraction of the tallest trimmed line.
    pub line_gap_ratio: f32,
    /// Font weight used for all text.
    pub font_weight: u16,
    pub mode: FitMode,
    /// Draw a grey hint instead of nothing when the text is blank.
    pub placeholder: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: 128,
            canvas_height: 128,
            padding: 0.04,
            oversize: 1.5,
            line_height_ratio: 1.15,
            line_gap_ratio: 0.05,
            font_weight: 700,
            mode: FitMode::default(),
            placeholder: false,
        }
    }
}

impl RenderConfig {
    /// Parse a config from JSON text and validate it.
    pub fn from_json_str(json: &str) -> EmojiResult<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> EmojiResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check that every value can produce a layout.
    pub fn validate(&self) -> EmojiResult<()> {
        let invalid = |msg: String| Err(EmojiError::InvalidConfig(msg));
        if self.canvas_width == 0
            || self.canvas_height == 0
            || self.canvas_width > MAX_CANVAS_DIMENSION
            || self.canvas_height > MAX_CANVAS_DIMENSION
        {
            return invalid(format!(
                "canvas size {}x{} must be between 1 and {}",
                self.canvas_width, self.canvas_height, MAX_CANVAS_DIMENSION
            ));
        }
        if !(0.0..0.5).contains(&self.padding) {
            return invalid(format!("padding {} must be in [0, 0.5)", self.padding));
        }
        if !self.oversize.is_finite() || self.oversize <= 0.0 {
            return invalid(format!("oversize {} must be positive", self.oversize));
        }
        if !self.line_height_ratio.is_finite() || self.line_height_ratio <= 0.0 {
            return invalid(format!(
                "line_height_ratio {} must be positive",
                self.line_height_ratio
            ));
        }
        if !self.line_gap_ratio.is_finite() || self.line_gap_ratio < 0.0 {
            return invalid(format!(
                "line_gap_ratio {} must not be negative",
                self.line_gap_ratio
            ));
        }
        if !(100..=900).contains(&self.font_weight) {
            return invalid(format!(
                "font_weight {} must be between 100 and 900",
                self.font_weight
            ));
        }
        Ok(())
    }

    /// Font size for offscreen rasterization in the trimming modes.
    pub fn oversize_px(&self, canvas_width: u32) -> u32 {
        ((canvas_width as f32 * self.oversize).round() as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!((config.canvas_width, config.canvas_height), (128, 128));
        assert_eq!(config.mode, FitMode::PerLine);
        assert_eq!(config.oversize_px(128), 192);
        assert_eq!(config.oversize_px(1), 2);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case("per-line", FitMode::PerLine)]
    #[case("Block", FitMode::Block)]
    #[case("height_first", FitMode::HeightFirst)]
    #[case(" fit-both ", FitMode::FitBoth)]
    fn test_fit_mode_from_str(#[case] input: &str, #[case] expected: FitMode) {
        assert_eq!(input.parse::<FitMode>().unwrap(), expected);
    }

    #[test]
    fn test_fit_mode_rejects_unknown() {
        assert!(matches!(
            "shrink".parse::<FitMode>(),
            Err(EmojiError::InvalidFitMode(_))
        ));
    }

    #[test]
    fn test_fit_mode_display_round_trips() {
        for mode in FitMode::ALL {
            assert_eq!(mode.to_string().parse::<FitMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            RenderConfig::from_json_str(r#"{"mode": "height-first", "canvas_width": 64}"#).unwrap();
        assert_eq!(config.mode, FitMode::HeightFirst);
        assert_eq!(config.canvas_width, 64);
        assert_eq!(config.canvas_height, 128);
        assert_eq!(config.padding, 0.04);
    }

    #[rstest]
    #[case(r#"{"canvas_width": 0}"#)]
    #[case(r#"{"canvas_height": 40000}"#)]
    #[case(r#"{"padding": 0.5}"#)]
    #[case(r#"{"padding": -0.1}"#)]
    #[case(r#"{"oversize": 0}"#)]
    #[case(r#"{"line_gap_ratio": -1}"#)]
    #[case(r#"{"font_weight": 1000}"#)]
    fn test_invalid_json_values(#[case] json: &str) {
        assert!(matches!(
            RenderConfig::from_json_str(json),
            Err(EmojiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            RenderConfig::from_json_str("{"),
            Err(EmojiError::Json(_))
        ));
    }
}
