//! Hex RGB colors used for text and background.

use crate::error::EmojiError;
use emoemo_canvas2d::CanvasColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque sRGB color, parsed from `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = EmojiError;

    /// Accepts only `#rgb` and `#rrggbb`; named colors, functions and alpha
    /// forms that CSS allows are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EmojiError::InvalidColor(s.to_string());
        let value = s.trim();
        let hex = value.strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(hex.len(), 3 | 6) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let parsed = csscolorparser::parse(value).map_err(|err| {
            log::debug!(target: "emoemo", "color {:?}: {}", value, err);
            invalid()
        })?;
        let [r, g, b, _a] = parsed.to_rgba8();
        Ok(Rgb::new(r, g, b))
    }
}

impl TryFrom<String> for Rgb {
    type Error = EmojiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for CanvasColor {
    fn from(value: Rgb) -> Self {
        CanvasColor::from_rgb8(value.r, value.g, value.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#000000", Rgb::new(0, 0, 0))]
    #[case("#FF0000", Rgb::new(255, 0, 0))]
    #[case("#ea580c", Rgb::new(0xEA, 0x58, 0x0C))]
    #[case("#fff", Rgb::new(255, 255, 255))]
    #[case("#a3c", Rgb::new(0xAA, 0x33, 0xCC))]
    #[case("  #16A34A ", Rgb::new(0x16, 0xA3, 0x4A))]
    fn test_parse_valid(#[case] input: &str, #[case] expected: Rgb) {
        assert_eq!(input.parse::<Rgb>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("000000")]
    #[case("#12345")]
    #[case("#1234567")]
    #[case("#gggggg")]
    #[case("#+12345")]
    #[case("red")]
    #[case("#ff000080")]
    #[case("#f008")]
    #[case("rgb(255, 0, 0)")]
    fn test_parse_invalid(#[case] input: &str) {
        assert!(matches!(
            input.parse::<Rgb>(),
            Err(EmojiError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_display_is_uppercase_hex() {
        assert_eq!(Rgb::new(0xea, 0xb3, 0x08).to_string(), "#EAB308");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Rgb::new(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#FF0000\"");
        let parsed: Rgb = serde_json::from_str("\"#0f0\"").unwrap();
        assert_eq!(parsed, Rgb::new(0, 255, 0));
        assert!(serde_json::from_str::<Rgb>("\"green\"").is_err());
    }
}
