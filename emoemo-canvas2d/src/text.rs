//! Text shaping and measurement using cosmic-text.

use crate::font::FontDescriptor;
use crate::font_config::has_family;
use crate::style::{TextAlign, TextBaseline};
use cosmic_text::{Attrs, Buffer, CacheKeyFlags, Family, FontSystem, Metrics, Shaping, Weight};

/// Text metrics returned by measureText().
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the text in pixels.
    pub width: f32,
    /// Distance from baseline to the top of the line box.
    pub ascent: f32,
    /// Distance from baseline to the bottom of the line box.
    pub descent: f32,
}

/// A font family resolved against the font database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResolvedFamily {
    Named(String),
    SansSerif,
    Serif,
    Monospace,
    Cursive,
    Fantasy,
}

impl ResolvedFamily {
    fn as_family(&self) -> Family<'_> {
        match self {
            ResolvedFamily::Named(name) => Family::Name(name),
            ResolvedFamily::SansSerif => Family::SansSerif,
            ResolvedFamily::Serif => Family::Serif,
            ResolvedFamily::Monospace => Family::Monospace,
            ResolvedFamily::Cursive => Family::Cursive,
            ResolvedFamily::Fantasy => Family::Fantasy,
        }
    }
}

/// Pick the first family from the list that the database can serve.
///
/// Generic names map to the database's generic families. Unknown names are
/// skipped; if nothing matches, sans-serif is used.
pub(crate) fn resolve_family(db: &fontdb::Database, families: &[String]) -> ResolvedFamily {
    for family in families {
        let generic = match family.to_ascii_lowercase().as_str() {
            "sans-serif" | "system-ui" => Some(ResolvedFamily::SansSerif),
            "serif" => Some(ResolvedFamily::Serif),
            "monospace" => Some(ResolvedFamily::Monospace),
            "cursive" => Some(ResolvedFamily::Cursive),
            "fantasy" => Some(ResolvedFamily::Fantasy),
            _ => None,
        };
        if let Some(generic) = generic {
            return generic;
        }
        if has_family(db, family) {
            return ResolvedFamily::Named(family.clone());
        }
    }
    log::debug!(target: "canvas", "no face for {:?}, using sans-serif", families);
    ResolvedFamily::SansSerif
}

/// Shape a single line of text into a layout buffer.
pub(crate) fn shape_text(
    font_system: &mut FontSystem,
    text: &str,
    font: &FontDescriptor,
    hinting_enabled: bool,
) -> Buffer {
    let size = font.size_px.max(1.0);
    let metrics = Metrics::new(size, size * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);

    let family = resolve_family(font_system.db(), &font.families);
    let flags = if hinting_enabled {
        CacheKeyFlags::empty()
    } else {
        CacheKeyFlags::DISABLE_HINTING
    };
    let attrs = Attrs::new()
        .family(family.as_family())
        .weight(Weight(font.weight))
        .cache_key_flags(flags);

    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);
    buffer
}

/// Width, ascent and descent of a shaped buffer.
pub(crate) fn buffer_metrics(buffer: &Buffer, font: &FontDescriptor) -> TextMetrics {
    let mut metrics = TextMetrics::default();
    for run in buffer.layout_runs() {
        metrics.width = metrics.width.max(run.line_w);
        metrics.ascent = metrics.ascent.max(run.line_y - run.line_top);
        metrics.descent = metrics
            .descent
            .max((run.line_top + run.line_height) - run.line_y);
    }
    if metrics.ascent == 0.0 && metrics.descent == 0.0 {
        metrics.ascent = font.size_px * 0.8;
        metrics.descent = font.size_px * 0.2;
    }
    metrics
}

/// Measure text using cosmic-text.
pub fn measure_text(
    font_system: &mut FontSystem,
    text: &str,
    font: &FontDescriptor,
    hinting_enabled: bool,
) -> TextMetrics {
    let buffer = shape_text(font_system, text, font, hinting_enabled);
    buffer_metrics(&buffer, font)
}

/// Calculate X offset for text alignment.
pub fn calculate_text_x_offset(width: f32, align: TextAlign) -> f32 {
    match align {
        TextAlign::Left => 0.0,
        TextAlign::Right => -width,
        TextAlign::Center => -width / 2.0,
    }
}

/// Calculate Y offset from the anchor to the alphabetic baseline.
pub fn calculate_text_y_offset(ascent: f32, descent: f32, baseline: TextBaseline) -> f32 {
    match baseline {
        TextBaseline::Top => ascent,
        TextBaseline::Middle => (ascent - descent) / 2.0,
        TextBaseline::Alphabetic => 0.0,
        TextBaseline::Bottom => -descent,
    }
}
