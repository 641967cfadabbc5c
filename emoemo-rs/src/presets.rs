//! Built-in font and color choices.

use crate::color::Rgb;

/// A named font family choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontPreset {
    /// Short ASCII name for command lines and file names.
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
    /// CSS font family list.
    pub family: &'static str,
}

/// A named text color choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    pub id: &'static str,
    pub label: &'static str,
    pub color: Rgb,
}

pub static FONT_PRESETS: [FontPreset; 6] = [
    FontPreset {
        id: "gothic",
        label: "ゴシック",
        family: "'Noto Sans JP'",
    },
    FontPreset {
        id: "rounded",
        label: "丸ゴシック",
        family: "'M PLUS Rounded 1c'",
    },
    FontPreset {
        id: "mincho",
        label: "明朝体",
        family: "'Noto Serif JP'",
    },
    FontPreset {
        id: "modern",
        label: "モダン",
        family: "'Zen Kaku Gothic New'",
    },
    FontPreset {
        id: "pop",
        label: "ポップ",
        family: "'Mochiy Pop One'",
    },
    FontPreset {
        id: "handwritten",
        label: "手書き",
        family: "'Hachi Maru Pop'",
    },
];

pub static COLOR_PRESETS: [ColorPreset; 10] = [
    ColorPreset {
        id: "black",
        label: "黒",
        color: Rgb::new(0x00, 0x00, 0x00),
    },
    ColorPreset {
        id: "red",
        label: "赤",
        color: Rgb::new(0xFF, 0x00, 0x00),
    },
    ColorPreset {
        id: "yellow",
        label: "黄",
        color: Rgb::new(0xEA, 0xB3, 0x08),
    },
    ColorPreset {
        id: "lime",
        label: "黄緑",
        color: Rgb::new(0x84, 0xCC, 0x16),
    },
    ColorPreset {
        id: "green",
        label: "緑",
        color: Rgb::new(0x16, 0xA3, 0x4A),
    },
    ColorPreset {
        id: "cyan",
        label: "水色",
        color: Rgb::new(0x06, 0xB6, 0xD4),
    },
    ColorPreset {
        id: "blue",
        label: "青",
        color: Rgb::new(0x25, 0x63, 0xEB),
    },
    ColorPreset {
        id: "purple",
        label: "紫",
        color: Rgb::new(0x93, 0x33, 0xEA),
    },
    ColorPreset {
        id: "pink",
        label: "ピンク",
        color: Rgb::new(0xEC, 0x48, 0x99),
    },
    ColorPreset {
        id: "orange",
        label: "オレンジ",
        color: Rgb::new(0xEA, 0x58, 0x0C),
    },
];

/// Hint shown on a blank canvas when placeholders are enabled.
pub const PLACEHOLDER_TEXT: &str = "テキストを\n入力してね";

/// Color of the placeholder hint.
pub const PLACEHOLDER_COLOR: Rgb = Rgb::new(0xAA, 0xAA, 0xAA);

/// Find a font preset by id or label.
pub fn font_preset(name: &str) -> Option<&'static FontPreset> {
    let name = name.trim();
    FONT_PRESETS
        .iter()
        .find(|preset| preset.id.eq_ignore_ascii_case(name) || preset.label == name)
}

/// Find a color preset by id or label.
pub fn color_preset(name: &str) -> Option<&'static ColorPreset> {
    let name = name.trim();
    COLOR_PRESETS
        .iter()
        .find(|preset| preset.id.eq_ignore_ascii_case(name) || preset.label == name)
}

/// Font family for a preset name, or the input itself when it is not a preset.
pub fn resolve_font_family(value: &str) -> String {
    match font_preset(value) {
        Some(preset) => preset.family.to_string(),
        None => value.to_string(),
    }
}
