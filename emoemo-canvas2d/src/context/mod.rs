//! Canvas 2D rendering context implementation.

mod drawing;
mod image_ops;
mod text_rendering;
mod transform;

use crate::drawing_state::DrawingState;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::font_config::ResolvedFontConfig;
use crate::geometry::CanvasColor;
use crate::style::FillStyle;
use cosmic_text::{FontSystem, SwashCache};
use tiny_skia::{Pixmap, Transform};

/// Maximum canvas dimension (same as Chrome).
pub(crate) const MAX_DIMENSION: u32 = 32767;

/// Canvas 2D rendering context.
pub struct Canvas2dContext {
    /// Width of the backing raster in pixels.
    pub(crate) width: u32,
    /// Height of the backing raster in pixels.
    pub(crate) height: u32,
    /// Device pixel ratio between backing pixels and logical units.
    pub(crate) pixel_ratio: f32,
    /// Pixel buffer (premultiplied RGBA).
    pub(crate) pixmap: Pixmap,
    /// Font system for text rendering.
    pub(crate) font_system: FontSystem,
    /// Swash cache for glyph outlines.
    pub(crate) swash_cache: SwashCache,
    /// Current drawing state.
    pub(crate) state: DrawingState,
    /// Stack of saved drawing states.
    state_stack: Vec<DrawingState>,
    /// Whether font hinting is enabled for text rendering.
    pub(crate) hinting_enabled: bool,
}

impl Canvas2dContext {
    /// Create a new Canvas2dContext using a pre-resolved font configuration.
    ///
    /// This clones the cached font database rather than rescanning fonts.
    pub fn with_resolved(
        width: u32,
        height: u32,
        resolved: &ResolvedFontConfig,
    ) -> Canvas2dResult<Self> {
        Self::new_internal(
            width,
            height,
            1.0,
            resolved.fontdb.clone(),
            resolved.hinting_enabled,
        )
    }

    /// Create a context for on-screen display on a high density screen.
    ///
    /// The backing raster is `round(width * pixel_ratio)` by
    /// `round(height * pixel_ratio)` pixels, and the transform is pre-scaled
    /// by `pixel_ratio` so drawing coordinates stay in logical units.
    pub fn with_pixel_ratio(
        width: u32,
        height: u32,
        pixel_ratio: f32,
        resolved: &ResolvedFontConfig,
    ) -> Canvas2dResult<Self> {
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(Canvas2dError::InvalidPixelRatio(pixel_ratio));
        }
        let backing_width = (width as f32 * pixel_ratio).round() as u32;
        let backing_height = (height as f32 * pixel_ratio).round() as u32;
        let mut ctx = Self::new_internal(
            backing_width,
            backing_height,
            pixel_ratio,
            resolved.fontdb.clone(),
            resolved.hinting_enabled,
        )?;
        ctx.state.transform = Transform::from_scale(pixel_ratio, pixel_ratio);
        Ok(ctx)
    }

    fn new_internal(
        width: u32,
        height: u32,
        pixel_ratio: f32,
        font_db: fontdb::Database,
        hinting_enabled: bool,
    ) -> Canvas2dResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Canvas2dError::InvalidDimensions { width, height });
        }

        let pixmap =
            Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })?;

        let font_system = FontSystem::new_with_locale_and_db("en".to_string(), font_db);

        Ok(Self {
            width,
            height,
            pixel_ratio,
            pixmap,
            font_system,
            swash_cache: SwashCache::new(),
            state: DrawingState::default(),
            state_stack: Vec::new(),
            hinting_enabled,
        })
    }

    /// Get backing raster width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get backing raster height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Device pixel ratio this context was created with (1.0 unless
    /// created by [`with_pixel_ratio`](Self::with_pixel_ratio)).
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Save the current drawing state.
    pub fn save(&mut self) {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(self.state.clone());
    }

    /// Restore the previously saved drawing state.
    pub fn restore(&mut self) {
        log::debug!(target: "canvas", "restore");
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    // --- Style setters ---

    /// Set the fill style from a CSS color string.
    pub fn set_fill_style(&mut self, style: &str) -> Canvas2dResult<()> {
        let color = parse_color(style)?;
        self.state.fill_style = FillStyle::Color(color);
        Ok(())
    }

    /// Set the fill style from a CanvasColor.
    pub fn set_fill_style_color(&mut self, color: CanvasColor) {
        self.state.fill_style = FillStyle::Color(color.into());
    }
}

/// Parse a CSS color string into a tiny_skia::Color.
pub(crate) fn parse_color(s: &str) -> Canvas2dResult<tiny_skia::Color> {
    let parsed = csscolorparser::parse(s)
        .map_err(|e| Canvas2dError::ColorParseError(format!("{}: {}", s, e)))?;

    let [r, g, b, a] = parsed.to_array();
    Ok(tiny_skia::Color::from_rgba(r, g, b, a).unwrap_or(tiny_skia::Color::BLACK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_config::FontConfig;
    use crate::geometry::RectParams;

    fn empty_fonts() -> ResolvedFontConfig {
        FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        }
        .resolve()
    }

    #[test]
    fn test_new_context_defaults() {
        let ctx = Canvas2dContext::with_resolved(200, 150, &empty_fonts()).unwrap();
        assert_eq!(ctx.width(), 200);
        assert_eq!(ctx.height(), 150);
        assert_eq!(ctx.pixel_ratio(), 1.0);
        // Canvas should be fully transparent
        assert!(ctx.pixmap.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invalid_dimensions() {
        let fonts = empty_fonts();
        assert!(matches!(
            Canvas2dContext::with_resolved(0, 100, &fonts),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Canvas2dContext::with_resolved(100, 0, &fonts),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Canvas2dContext::with_resolved(MAX_DIMENSION + 1, 10, &fonts),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_invalid_pixel_ratio() {
        let fonts = empty_fonts();
        for ratio in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                Canvas2dContext::with_pixel_ratio(128, 128, ratio, &fonts),
                Err(Canvas2dError::InvalidPixelRatio(_))
            ));
        }
    }

    #[test]
    fn test_pixel_ratio_scales_backing_store() {
        let mut ctx = Canvas2dContext::with_pixel_ratio(128, 128, 2.0, &empty_fonts()).unwrap();
        assert_eq!(ctx.width(), 256);
        assert_eq!(ctx.height(), 256);

        // Logical coordinates cover the whole backing raster.
        ctx.set_fill_style("#00ff00").unwrap();
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: 128.0,
            height: 128.0,
        });
        let data = ctx.get_image_data(0, 0, 256, 256);
        let last = (255 * 256 + 255) * 4;
        assert_eq!(&data[last..last + 4], &[0, 255, 0, 255]);
    }

    #[test]
    fn test_save_restore_fill_and_transform() {
        let mut ctx = Canvas2dContext::with_resolved(100, 100, &empty_fonts()).unwrap();
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.translate(10.0, 20.0);
        ctx.save();

        ctx.set_fill_style("#0000ff").unwrap();
        ctx.scale(0.5, 1.0);
        ctx.restore();

        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: 5.0,
            height: 5.0,
        });
        let data = ctx.get_image_data(12, 22, 1, 1);
        assert_eq!(data, vec![255, 0, 0, 255]);
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("not-a-color").is_err());
        assert!(parse_color("#FF0000").is_ok());
    }
}
