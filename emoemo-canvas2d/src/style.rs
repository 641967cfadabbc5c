//! Paint and text settings held in the drawing state.

/// How shapes and glyphs are painted.
#[derive(Debug, Clone, Copy)]
pub enum FillStyle {
    Color(tiny_skia::Color),
}

impl Default for FillStyle {
    fn default() -> Self {
        FillStyle::Color(tiny_skia::Color::BLACK)
    }
}

/// Horizontal anchor of drawn text relative to the x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
}

/// Vertical anchor of drawn text relative to the y coordinate.
///
/// `Top`, `Middle` and `Bottom` refer to the font's ascent/descent box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}
