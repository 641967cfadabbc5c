//! Text rendering operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::font::FontDescriptor;
use crate::style::{TextAlign, TextBaseline};
use crate::text::{buffer_metrics, shape_text, TextMetrics};
use cosmic_text::Command;
use tiny_skia::Transform;

impl Canvas2dContext {
    /// Set the current font.
    pub fn set_font(&mut self, font: FontDescriptor) {
        log::debug!(target: "canvas", "font {:?} {}px {}", font.families, font.size_px, font.weight);
        self.state.font = font;
    }

    /// Set the text alignment.
    pub fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    /// Set the text baseline.
    pub fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    /// Measure text with the current font.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        crate::text::measure_text(
            &mut self.font_system,
            text,
            &self.state.font,
            self.hinting_enabled,
        )
    }

    /// Fill text at the specified position with the current font, fill
    /// style, alignment and baseline. Glyphs are drawn as vector outlines.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "fillText \"{}\" {} {}", text, x, y);
        if text.is_empty() {
            return;
        }

        let font = self.state.font.clone();
        let buffer = shape_text(&mut self.font_system, text, &font, self.hinting_enabled);
        let metrics = buffer_metrics(&buffer, &font);

        let x_offset = crate::text::calculate_text_x_offset(metrics.width, self.state.text_align);
        let y_offset = crate::text::calculate_text_y_offset(
            metrics.ascent,
            metrics.descent,
            self.state.text_baseline,
        );
        let base_x = x + x_offset;
        let base_y = y + y_offset;

        let transform = self.state.transform;

        self.with_fill_paint(|ctx, paint| {
            for run in buffer.layout_runs() {
                for glyph in run.glyphs.iter() {
                    let physical_glyph = glyph.physical((base_x, base_y), 1.0);

                    // Floating-point glyph position for sub-pixel placement
                    let glyph_x = base_x + glyph.x + glyph.font_size * glyph.x_offset;
                    let glyph_y = base_y + glyph.y - glyph.font_size * glyph.y_offset;

                    let Some(commands) = ctx
                        .swash_cache
                        .get_outline_commands(&mut ctx.font_system, physical_glyph.cache_key)
                    else {
                        continue;
                    };

                    // Font outlines are Y-up, the raster is Y-down
                    let mut path_builder = tiny_skia::PathBuilder::new();
                    for cmd in commands {
                        match cmd {
                            Command::MoveTo(p) => path_builder.move_to(p.x, -p.y),
                            Command::LineTo(p) => path_builder.line_to(p.x, -p.y),
                            Command::QuadTo(ctrl, end) => {
                                path_builder.quad_to(ctrl.x, -ctrl.y, end.x, -end.y)
                            }
                            Command::CurveTo(c1, c2, end) => {
                                path_builder.cubic_to(c1.x, -c1.y, c2.x, -c2.y, end.x, -end.y)
                            }
                            Command::Close => path_builder.close(),
                        }
                    }

                    if let Some(path) = path_builder.finish() {
                        let glyph_transform =
                            Transform::from_translate(glyph_x, glyph_y).post_concat(transform);
                        ctx.pixmap.fill_path(
                            &path,
                            paint,
                            tiny_skia::FillRule::Winding,
                            glyph_transform,
                            None,
                        );
                    }
                }
            }
        });
    }
}
