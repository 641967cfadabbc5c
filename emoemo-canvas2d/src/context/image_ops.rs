//! Image drawing, pixel data, and PNG output operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::Canvas2dResult;
use crate::geometry::ImageCropParams;
use tiny_skia::PixmapRef;

impl Canvas2dContext {
    // --- Internal image drawing ---

    /// Draw a premultiplied-alpha pixmap scaled into a destination rectangle
    /// with bilinear filtering.
    fn draw_pixmap_scaled(&mut self, pixmap: PixmapRef<'_>, dx: f32, dy: f32, dw: f32, dh: f32) {
        if dw <= 0.0 || dh <= 0.0 || !dw.is_finite() || !dh.is_finite() {
            return;
        }
        let paint = tiny_skia::PixmapPaint {
            opacity: 1.0,
            blend_mode: tiny_skia::BlendMode::SourceOver,
            quality: tiny_skia::FilterQuality::Bilinear,
        };

        let scale_x = dw / pixmap.width() as f32;
        let scale_y = dh / pixmap.height() as f32;

        // Translate to destination position, then scale
        let transform = self
            .state
            .transform
            .pre_translate(dx, dy)
            .pre_scale(scale_x, scale_y);

        self.pixmap
            .draw_pixmap(0, 0, pixmap, &paint, transform, None);
    }

    /// Draw a cropped region of another canvas to a destination rectangle.
    ///
    /// The source rectangle is expanded to whole pixels and clamped to the
    /// source bounds; destination coordinates may be fractional.
    pub fn draw_canvas_cropped(&mut self, source: &Canvas2dContext, params: &ImageCropParams) {
        let ImageCropParams {
            sx,
            sy,
            sw,
            sh,
            dx,
            dy,
            dw,
            dh,
        } = *params;
        log::debug!(target: "canvas", "drawImage crop {} {} {} {} -> {} {} {} {}", sx, sy, sw, sh, dx, dy, dw, dh);

        let left = sx.max(0.0).floor();
        let top = sy.max(0.0).floor();
        let right = (sx + sw).min(source.width as f32).ceil();
        let bottom = (sy + sh).min(source.height as f32).ceil();
        if right <= left || bottom <= top {
            return;
        }

        let Some(rect) = tiny_skia::IntRect::from_xywh(
            left as i32,
            top as i32,
            (right - left) as u32,
            (bottom - top) as u32,
        ) else {
            return;
        };
        let Some(sub_pixmap) = source.pixmap.clone_rect(rect) else {
            return;
        };
        self.draw_pixmap_scaled(sub_pixmap.as_ref(), dx, dy, dw, dh);
    }

    // --- Image data ---

    /// Raw premultiplied RGBA bytes of the backing raster, row-major.
    ///
    /// The alpha channel is identical to the straight-alpha image data, so
    /// this is enough for coverage scans without a conversion pass.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Get straight-alpha RGBA image data for a region of the canvas.
    ///
    /// Pixels outside the canvas are transparent black.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0u8; (width as usize) * (height as usize) * 4];
        let src = self.pixmap.data();

        for dy in 0..height {
            let src_y = y + dy as i32;
            if src_y < 0 || src_y >= self.height as i32 {
                continue;
            }
            for dx in 0..width {
                let src_x = x + dx as i32;
                if src_x < 0 || src_x >= self.width as i32 {
                    continue;
                }

                let src_idx = (src_y as usize * self.width as usize + src_x as usize) * 4;
                let dst_idx = (dy as usize * width as usize + dx as usize) * 4;
                let pixel = &src[src_idx..src_idx + 4];

                // Convert from premultiplied alpha to straight alpha
                let a = pixel[3];
                if a == 255 {
                    data[dst_idx..dst_idx + 4].copy_from_slice(pixel);
                } else if a > 0 {
                    let alpha_f = a as f32 / 255.0;
                    for channel in 0..3 {
                        data[dst_idx + channel] =
                            (pixel[channel] as f32 / alpha_f).round().min(255.0) as u8;
                    }
                    data[dst_idx + 3] = a;
                }
            }
        }

        data
    }

    /// Export the canvas as PNG data.
    ///
    /// # Arguments
    /// * `ppi` - Optional pixels per inch for PNG metadata. Defaults to 72 if not specified.
    pub fn to_png(&self, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        let ppi = ppi.unwrap_or(72.0);

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            // Set pixel density metadata (pixels per meter)
            let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            let data = self.get_image_data(0, 0, self.width, self.height);
            writer.write_image_data(&data)?;
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use crate::font_config::FontConfig;
    use crate::geometry::{ImageCropParams, RectParams};
    use crate::Canvas2dContext;

    fn canvas(width: u32, height: u32) -> Canvas2dContext {
        let fonts = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        }
        .resolve();
        Canvas2dContext::with_resolved(width, height, &fonts).unwrap()
    }

    fn filled(width: u32, height: u32, color: &str) -> Canvas2dContext {
        let mut ctx = canvas(width, height);
        ctx.set_fill_style(color).unwrap();
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
        });
        ctx
    }

    #[test]
    fn test_get_image_data_out_of_bounds_is_transparent() {
        let ctx = filled(4, 4, "#ffffff");
        let data = ctx.get_image_data(-2, -2, 4, 4);
        // Top-left 2x2 block is outside the canvas
        assert_eq!(&data[0..4], &[0, 0, 0, 0]);
        // (2, 2) maps to canvas (0, 0)
        let idx = (2 * 4 + 2) * 4;
        assert_eq!(&data[idx..idx + 4], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_draw_canvas_cropped_takes_only_source_region() {
        // Left half red, right half blue
        let mut source = filled(20, 10, "#ff0000");
        source.set_fill_style("#0000ff").unwrap();
        source.fill_rect(&RectParams {
            x: 10.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        });

        let mut dest = canvas(30, 30);
        dest.draw_canvas_cropped(
            &source,
            &ImageCropParams {
                sx: 10.0,
                sy: 0.0,
                sw: 10.0,
                sh: 10.0,
                dx: 0.0,
                dy: 0.0,
                dw: 30.0,
                dh: 30.0,
            },
        );
        let data = dest.get_image_data(0, 0, 30, 30);
        assert!(
            data.chunks(4).all(|px| px[0] == 0 && px[2] > 250 && px[3] > 250),
            "crop leaked red pixels"
        );
    }

    #[test]
    fn test_draw_canvas_cropped_outside_source_is_noop() {
        let source = filled(10, 10, "#ff0000");
        let mut dest = canvas(10, 10);
        dest.draw_canvas_cropped(
            &source,
            &ImageCropParams {
                sx: 20.0,
                sy: 20.0,
                sw: 5.0,
                sh: 5.0,
                dx: 0.0,
                dy: 0.0,
                dw: 10.0,
                dh: 10.0,
            },
        );
        assert!(dest.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_to_png_signature_and_size() {
        let ctx = filled(16, 8, "#336699");
        let png_data = ctx.to_png(None).unwrap();
        assert_eq!(&png_data[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

        let decoder = png::Decoder::new(std::io::Cursor::new(png_data));
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 16);
        assert_eq!(reader.info().height, 8);
    }
}
