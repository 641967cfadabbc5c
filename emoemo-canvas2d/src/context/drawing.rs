//! Fill and paint helper operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::geometry::RectParams;
use crate::style::FillStyle;

impl Canvas2dContext {
    /// Fill a rectangle with the current fill style.
    pub fn fill_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "fillRect {} {} {} {}", params.x, params.y, params.width, params.height);
        let Some(rect) = tiny_skia::Rect::from_xywh(params.x, params.y, params.width, params.height)
        else {
            return;
        };
        let transform = self.state.transform;
        self.with_fill_paint(|ctx, paint| {
            ctx.pixmap.fill_rect(rect, paint, transform, None);
        });
    }

    // --- Private paint helpers ---

    pub(crate) fn with_fill_paint<R>(
        &mut self,
        draw: impl for<'a> FnOnce(&mut Self, &tiny_skia::Paint<'a>) -> R,
    ) -> R {
        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            ..Default::default()
        };

        match self.state.fill_style {
            FillStyle::Color(color) => paint.set_color(color),
        }
        draw(self, &paint)
    }
}

#[cfg(test)]
mod tests {
    use crate::font_config::FontConfig;
    use crate::geometry::RectParams;
    use crate::Canvas2dContext;

    fn canvas(width: u32, height: u32) -> Canvas2dContext {
        let fonts = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        }
        .resolve();
        Canvas2dContext::with_resolved(width, height, &fonts).unwrap()
    }

    #[test]
    fn test_fill_rect_pixels() {
        let mut ctx = canvas(100, 100);
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.fill_rect(&RectParams {
            x: 10.0,
            y: 10.0,
            width: 50.0,
            height: 50.0,
        });

        let data = ctx.get_image_data(0, 0, 100, 100);
        let idx = (30 * 100 + 30) * 4;
        assert_eq!(&data[idx..idx + 4], &[255, 0, 0, 255]);

        let idx_out = (5 * 100 + 5) * 4;
        assert_eq!(data[idx_out + 3], 0);
    }

    #[test]
    fn test_degenerate_rect_is_ignored() {
        let mut ctx = canvas(10, 10);
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 10.0,
        });
        assert!(ctx.get_image_data(0, 0, 10, 10).iter().all(|&b| b == 0));
    }
}
