//! Oversized offscreen rasterization and cropping to the ink box.

use crate::bounds::{find_bounds, GlyphBounds};
use crate::config::MAX_CANVAS_DIMENSION;
use crate::error::EmojiResult;
use crate::fit::widest_line;
use emoemo_canvas2d::{
    Canvas2dContext, CanvasColor, FontDescriptor, ImageCropParams, ResolvedFontConfig,
    TextBaseline,
};

/// An offscreen raster together with the tight bounds of its ink.
pub struct TrimmedLine {
    raster: Canvas2dContext,
    bounds: GlyphBounds,
    font_size: f32,
}

impl TrimmedLine {
    /// Font size the raster was drawn at. Smaller than the requested size
    /// when the text would not fit on the largest surface.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn raster(&self) -> &Canvas2dContext {
        &self.raster
    }

    pub fn bounds(&self) -> GlyphBounds {
        self.bounds
    }

    /// Width of the ink box in raster pixels.
    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    /// Height of the ink box in raster pixels.
    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    /// Crop parameters that draw the ink box into a destination rectangle.
    pub fn crop_to(&self, dx: f32, dy: f32, dw: f32, dh: f32) -> ImageCropParams {
        ImageCropParams {
            sx: self.bounds.left as f32,
            sy: self.bounds.top as f32,
            sw: self.width() as f32,
            sh: self.height() as f32,
            dx,
            dy,
            dw,
            dh,
        }
    }
}

impl std::fmt::Debug for TrimmedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrimmedLine")
            .field("raster", &(self.raster.width(), self.raster.height()))
            .field("bounds", &self.bounds)
            .field("font_size", &self.font_size)
            .finish()
    }
}

/// Rasterize all lines into one offscreen canvas and crop it as a block.
///
/// Returns `Ok(None)` when nothing was inked.
pub fn trim_block(
    fonts: &ResolvedFontConfig,
    lines: &[String],
    font: &FontDescriptor,
    color: CanvasColor,
    line_height_ratio: f32,
) -> EmojiResult<Option<TrimmedLine>> {
    let mut measurer = Canvas2dContext::with_resolved(1, 1, fonts)?;
    let font = fit_offscreen(&mut measurer, lines, lines.len(), font, line_height_ratio);
    rasterize(fonts, &mut measurer, lines, &font, color, line_height_ratio)
}

/// Rasterize and crop each non-empty line on its own.
///
/// Lines that are blank or leave no ink are skipped, so the result may be
/// shorter than `lines`.
pub fn trim_lines(
    fonts: &ResolvedFontConfig,
    lines: &[String],
    font: &FontDescriptor,
    color: CanvasColor,
    line_height_ratio: f32,
) -> EmojiResult<Vec<TrimmedLine>> {
    let mut measurer = Canvas2dContext::with_resolved(1, 1, fonts)?;
    // Every line shares one size so their relative scale is preserved
    let font = fit_offscreen(&mut measurer, lines, 1, font, line_height_ratio);
    let mut trimmed = Vec::with_capacity(lines.len());
    for line in lines.iter().filter(|line| !line.trim().is_empty()) {
        let single = std::slice::from_ref(line);
        match rasterize(fonts, &mut measurer, single, &font, color, line_height_ratio)? {
            Some(line) => trimmed.push(line),
            None => log::debug!(target: "emoemo", "line {:?} left no ink", line),
        }
    }
    Ok(trimmed)
}

/// Offscreen raster size for `line_count` lines no wider than `widest`.
fn offscreen_size(widest: f32, line_count: usize, size: f32, line_height_ratio: f32) -> (f32, f32) {
    // One em of margin on each side keeps overhanging glyphs inside the raster
    let width = widest + 2.0 * size;
    let height = size * line_height_ratio * line_count as f32 + size;
    (width, height)
}

/// Shrink `font` until `line_count` lines of the widest of `lines` fit on
/// a surface of at most `MAX_CANVAS_DIMENSION` pixels per edge.
fn fit_offscreen(
    measurer: &mut Canvas2dContext,
    lines: &[String],
    line_count: usize,
    font: &FontDescriptor,
    line_height_ratio: f32,
) -> FontDescriptor {
    let limit = MAX_CANVAS_DIMENSION as f32;
    let mut font = font.clone();
    for _ in 0..8 {
        let widest = widest_line(measurer, lines, &font);
        let (width, height) = offscreen_size(widest, line_count, font.size_px, line_height_ratio);
        if width.ceil() <= limit && height.round() <= limit {
            break;
        }
        let factor = (limit / width).min(limit / height);
        let size = (font.size_px * factor * 0.99).floor().max(1.0);
        log::warn!(
            target: "emoemo",
            "text needs a {}x{} offscreen raster; drawing at {}px instead of {}px",
            width.ceil(), height.round(), size, font.size_px
        );
        if size >= font.size_px {
            break;
        }
        font = font.with_size(size);
    }
    font
}

fn rasterize(
    fonts: &ResolvedFontConfig,
    measurer: &mut Canvas2dContext,
    lines: &[String],
    font: &FontDescriptor,
    color: CanvasColor,
    line_height_ratio: f32,
) -> EmojiResult<Option<TrimmedLine>> {
    let size = font.size_px;
    let line_height = size * line_height_ratio;

    let margin = size;
    let widest = widest_line(measurer, lines, font);
    let (width, height) = offscreen_size(widest, lines.len(), size, line_height_ratio);
    let width = (width.ceil() as u32).clamp(1, MAX_CANVAS_DIMENSION);
    let height = (height.round() as u32).clamp(1, MAX_CANVAS_DIMENSION);

    log::debug!(target: "emoemo", "offscreen {}x{} for {} line(s) at {}px", width, height, lines.len(), size);

    let mut raster = Canvas2dContext::with_resolved(width, height, fonts)?;
    raster.set_font(font.clone());
    raster.set_fill_style_color(color);
    raster.set_text_baseline(TextBaseline::Top);
    for (index, line) in lines.iter().enumerate() {
        raster.fill_text(line, margin, index as f32 * line_height);
    }

    let bounds = find_bounds(raster.data(), raster.width(), raster.height());
    Ok(bounds.map(|bounds| TrimmedLine {
        raster,
        bounds,
        font_size: size,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use emoemo_canvas2d::FontConfig;
    use std::sync::OnceLock;

    fn fonts() -> &'static ResolvedFontConfig {
        static FONTS: OnceLock<ResolvedFontConfig> = OnceLock::new();
        FONTS.get_or_init(|| FontConfig::default().resolve())
    }

    macro_rules! skip_if_no_fonts {
        () => {
            if fonts().face_count() == 0 {
                eprintln!("Skipping test: no system fonts available");
                return;
            }
        };
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn font() -> FontDescriptor {
        FontDescriptor::new(["sans-serif"], 96.0).with_weight(700)
    }

    #[test]
    fn test_trim_block_crops_to_ink() {
        skip_if_no_fonts!();
        let trimmed = trim_block(fonts(), &lines(&["A"]), &font(), CanvasColor::from_rgb8(0, 0, 0), 1.15)
            .unwrap()
            .expect("A should leave ink");
        let bounds = trimmed.bounds();
        // The margin keeps the glyph away from the raster edges
        assert!(bounds.left > 0 && bounds.top > 0);
        assert!(bounds.right < trimmed.raster().width() - 1);
        assert!(bounds.bottom < trimmed.raster().height() - 1);
        // A cap letter is much smaller than the line box it was drawn in
        assert!(trimmed.height() < 96);
        assert!(trimmed.height() > 48);
    }

    #[test]
    fn test_trim_block_stacks_lines_in_one_raster() {
        skip_if_no_fonts!();
        let color = CanvasColor::from_rgb8(0, 0, 0);
        let one = trim_block(fonts(), &lines(&["H"]), &font(), color, 1.15)
            .unwrap()
            .unwrap();
        let two = trim_block(fonts(), &lines(&["H", "H"]), &font(), color, 1.15)
            .unwrap()
            .unwrap();
        // Second line adds one line advance (110.4px) to the block
        let extra = two.height() as f32 - one.height() as f32;
        assert!((extra - 110.4).abs() <= 2.0, "extra height was {extra}");
    }

    #[test]
    fn test_trim_lines_skips_blank_lines() {
        skip_if_no_fonts!();
        let color = CanvasColor::from_rgb8(255, 0, 0);
        let trimmed = trim_lines(fonts(), &lines(&["AB", "", "  ", "C"]), &font(), color, 1.15).unwrap();
        assert_eq!(trimmed.len(), 2);
        assert!(trimmed[0].width() > trimmed[1].width());
    }

    #[test]
    fn test_whitespace_only_has_no_ink() {
        let color = CanvasColor::from_rgb8(0, 0, 0);
        let block = trim_block(fonts(), &lines(&["   "]), &font(), color, 1.15).unwrap();
        assert!(block.is_none());
        assert!(trim_lines(fonts(), &lines(&[" "]), &font(), color, 1.15)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_overlong_line_is_drawn_whole() {
        skip_if_no_fonts!();
        let oversized = FontDescriptor::new(["sans-serif"], 192.0).with_weight(700);
        let long = "x".repeat(400);
        let trimmed = trim_lines(fonts(), &lines(&["x", long.as_str()]), &oversized, CanvasColor::from_rgb8(0, 0, 0), 1.15)
            .unwrap();
        assert_eq!(trimmed.len(), 2);
        let line = &trimmed[1];
        assert!(line.font_size() < 192.0);
        assert_eq!(trimmed[0].font_size(), line.font_size());
        assert!(line.raster().width() <= MAX_CANVAS_DIMENSION);
        // Ink stays clear of the right edge, so nothing was clipped
        assert!(line.bounds().right < line.raster().width() - 1);

        let mut measurer = Canvas2dContext::with_resolved(1, 1, fonts()).unwrap();
        let measured = widest_line(&mut measurer, &lines(&[long.as_str()]), &oversized.with_size(line.font_size()));
        let ink = line.width() as f32;
        assert!(ink >= measured * 0.97, "ink {ink} of measured {measured}");
    }

    #[test]
    fn test_short_lines_keep_requested_size() {
        skip_if_no_fonts!();
        let trimmed = trim_block(fonts(), &lines(&["AB"]), &font(), CanvasColor::from_rgb8(0, 0, 0), 1.15)
            .unwrap()
            .unwrap();
        assert_eq!(trimmed.font_size(), 96.0);
    }

    #[test]
    fn test_crop_to_uses_bounds() {
        skip_if_no_fonts!();
        let trimmed = trim_block(fonts(), &lines(&["I"]), &font(), CanvasColor::from_rgb8(0, 0, 0), 1.15)
            .unwrap()
            .unwrap();
        let params = trimmed.crop_to(1.0, 2.0, 3.0, 4.0);
        assert_eq!(params.sx, trimmed.bounds().left as f32);
        assert_eq!(params.sh, trimmed.height() as f32);
        assert_eq!((params.dx, params.dy, params.dw, params.dh), (1.0, 2.0, 3.0, 4.0));
    }
}
