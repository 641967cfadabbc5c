//! Composes background and fitted text onto the target canvas.

use crate::color::Rgb;
use crate::config::{FitMode, RenderConfig};
use crate::error::EmojiResult;
use crate::fit::{
    compute_font_size, horizontal_scale, widest_line, FitConstraint, FitParams, TextMeasure,
};
use crate::presets::{FontPreset, PLACEHOLDER_COLOR, PLACEHOLDER_TEXT};
use crate::settings::{split_lines, EmojiSettings, RenderRequest};
use crate::trim::{trim_block, trim_lines};
use emoemo_canvas2d::{
    Canvas2dContext, FontConfig, FontDescriptor, RectParams, ResolvedFontConfig, TextAlign,
    TextBaseline,
};

/// Uniform scale and top-left offset for drawing a box centered on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Placement {
    /// Largest scale that fits `content` inside the canvas minus `padding`
    /// on every side, centered. `None` for an empty box.
    pub fn fit(
        content_width: f32,
        content_height: f32,
        canvas_width: f32,
        canvas_height: f32,
        padding: f32,
    ) -> Option<Self> {
        if content_width <= 0.0 || content_height <= 0.0 {
            return None;
        }
        let keep = 1.0 - 2.0 * padding;
        let max_width = canvas_width * keep;
        let max_height = canvas_height * keep;

        let scale = (max_width / content_width).min(max_height / content_height);
        Some(Self {
            scale,
            offset_x: (canvas_width - content_width * scale) / 2.0,
            offset_y: (canvas_height - content_height * scale) / 2.0,
        })
    }
}

/// Destination rectangle of one drawn block or line, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// What a render call drew.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSummary {
    pub mode: FitMode,
    /// Font size the text was rasterized at.
    pub font_size: u32,
    /// Scale from raster pixels to canvas pixels (1.0 for the metric modes).
    pub scale: f32,
    /// Extra compression on the X axis (height-first only).
    pub horizontal_scale: f32,
    /// One region per drawn block or line, top to bottom.
    pub regions: Vec<DrawnRegion>,
}

/// Result of one render call. The canvas holds the background in every case.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// Every line was empty or whitespace.
    Blank,
    /// The text was blank and the placeholder hint was drawn.
    Placeholder,
    /// The text produced no visible pixels, e.g. no installed font has the glyphs.
    NoInk,
    Drawn(LayoutSummary),
}

impl RenderOutcome {
    pub fn summary(&self) -> Option<&LayoutSummary> {
        match self {
            RenderOutcome::Drawn(summary) => Some(summary),
            _ => None,
        }
    }
}

/// A rendered canvas and what was drawn on it.
pub struct Rendered {
    pub canvas: Canvas2dContext,
    pub outcome: RenderOutcome,
}

/// A font preset and the canvas rendered with it.
pub struct Variant {
    pub preset: FontPreset,
    pub rendered: Rendered,
}

/// Renders emoji requests with a fixed font database and layout config.
pub struct EmojiRenderer {
    fonts: ResolvedFontConfig,
    config: RenderConfig,
}

impl EmojiRenderer {
    pub fn new(fonts: ResolvedFontConfig, config: RenderConfig) -> EmojiResult<Self> {
        config.validate()?;
        log::debug!(target: "emoemo", "renderer with {} font faces, mode {}", fonts.face_count(), config.mode);
        Ok(Self { fonts, config })
    }

    /// Resolve the font configuration (scanning system fonts if enabled) and
    /// create a renderer.
    pub fn with_font_config(font_config: &FontConfig, config: RenderConfig) -> EmojiResult<Self> {
        Self::new(font_config.resolve(), config)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn fonts(&self) -> &ResolvedFontConfig {
        &self.fonts
    }

    /// Request for the given settings at the configured canvas size.
    pub fn request(&self, settings: &EmojiSettings) -> RenderRequest {
        RenderRequest::from_settings(settings, self.config.canvas_width, self.config.canvas_height)
    }

    /// Render onto a new canvas of the request's size, for export.
    pub fn render(&self, request: &RenderRequest) -> EmojiResult<Rendered> {
        let mut canvas =
            Canvas2dContext::with_resolved(request.canvas_width, request.canvas_height, &self.fonts)?;
        let outcome = self.render_into(&mut canvas, request)?;
        Ok(Rendered { canvas, outcome })
    }

    /// Render for a display with the given device pixel ratio.
    ///
    /// The canvas backing raster is `round(size * pixel_ratio)`; layout stays
    /// in logical pixels.
    pub fn render_for_display(
        &self,
        request: &RenderRequest,
        pixel_ratio: f32,
    ) -> EmojiResult<Rendered> {
        let mut canvas = Canvas2dContext::with_pixel_ratio(
            request.canvas_width,
            request.canvas_height,
            pixel_ratio,
            &self.fonts,
        )?;
        let outcome = self.render_into(&mut canvas, request)?;
        Ok(Rendered { canvas, outcome })
    }

    /// Render the same settings once per font preset.
    pub fn render_variants(
        &self,
        settings: &EmojiSettings,
        presets: &[FontPreset],
    ) -> EmojiResult<Vec<Variant>> {
        presets
            .iter()
            .map(|preset| {
                let settings = EmojiSettings {
                    font_family: preset.family.to_string(),
                    ..settings.clone()
                };
                let rendered = self.render(&self.request(&settings))?;
                Ok(Variant {
                    preset: *preset,
                    rendered,
                })
            })
            .collect()
    }

    /// Draw the request onto an existing canvas whose logical size matches
    /// the request. The canvas drawing state is left as it was.
    pub fn render_into(
        &self,
        canvas: &mut Canvas2dContext,
        request: &RenderRequest,
    ) -> EmojiResult<RenderOutcome> {
        canvas.save();
        let outcome = self.compose(canvas, request);
        canvas.restore();

        match &outcome {
            Ok(RenderOutcome::NoInk) => {
                log::warn!(target: "emoemo", "no visible pixels for {:?} in {}", request.text(), request.font_family)
            }
            Ok(outcome) => log::debug!(target: "emoemo", "rendered {:?}: {:?}", request.text(), outcome),
            Err(err) => log::debug!(target: "emoemo", "render of {:?} failed: {}", request.text(), err),
        }
        outcome
    }

    fn compose(
        &self,
        canvas: &mut Canvas2dContext,
        request: &RenderRequest,
    ) -> EmojiResult<RenderOutcome> {
        canvas.set_fill_style_color(request.background_color.into());
        canvas.fill_rect(&RectParams::sized(
            request.canvas_width as f32,
            request.canvas_height as f32,
        ));

        if request.is_blank() {
            if !self.config.placeholder {
                return Ok(RenderOutcome::Blank);
            }
            let lines = split_lines(PLACEHOLDER_TEXT);
            let params = FitParams::height_first(request.canvas_width, request.canvas_height);
            self.draw_metric_fit(canvas, request, &lines, PLACEHOLDER_COLOR, &params);
            return Ok(RenderOutcome::Placeholder);
        }

        self.warn_missing_family(&request.font_family);

        let summary = match self.config.mode {
            FitMode::PerLine => self.draw_per_line(canvas, request)?,
            FitMode::Block => self.draw_block(canvas, request)?,
            FitMode::HeightFirst => {
                let params = FitParams::height_first(request.canvas_width, request.canvas_height);
                Some(self.draw_metric_fit(canvas, request, &request.lines, request.text_color, &params))
            }
            FitMode::FitBoth => {
                let params = FitParams::fit_both(request.canvas_width, request.canvas_height);
                Some(self.draw_metric_fit(canvas, request, &request.lines, request.text_color, &params))
            }
        };

        Ok(summary.map_or(RenderOutcome::NoInk, RenderOutcome::Drawn))
    }

    fn oversized_font(&self, request: &RenderRequest) -> FontDescriptor {
        let size = self.config.oversize_px(request.canvas_width);
        FontDescriptor::from_family_list(&request.font_family, size as f32)
            .with_weight(self.config.font_weight)
    }

    /// Whole-block trimming: one raster, one crop, centered as a block.
    fn draw_block(
        &self,
        canvas: &mut Canvas2dContext,
        request: &RenderRequest,
    ) -> EmojiResult<Option<LayoutSummary>> {
        let font = self.oversized_font(request);
        let Some(trimmed) = trim_block(
            &self.fonts,
            &request.lines,
            &font,
            request.text_color.into(),
            self.config.line_height_ratio,
        )?
        else {
            return Ok(None);
        };

        let (content_width, content_height) = (trimmed.width() as f32, trimmed.height() as f32);
        let Some(placement) = Placement::fit(
            content_width,
            content_height,
            request.canvas_width as f32,
            request.canvas_height as f32,
            self.config.padding,
        ) else {
            return Ok(None);
        };

        let region = DrawnRegion {
            x: placement.offset_x,
            y: placement.offset_y,
            width: content_width * placement.scale,
            height: content_height * placement.scale,
        };
        canvas.draw_canvas_cropped(
            trimmed.raster(),
            &trimmed.crop_to(region.x, region.y, region.width, region.height),
        );

        Ok(Some(LayoutSummary {
            mode: FitMode::Block,
            font_size: trimmed.font_size() as u32,
            scale: placement.scale,
            horizontal_scale: 1.0,
            regions: vec![region],
        }))
    }

    /// Per-line trimming: each line cropped on its own, stacked with a
    /// uniform gap and centered horizontally.
    fn draw_per_line(
        &self,
        canvas: &mut Canvas2dContext,
        request: &RenderRequest,
    ) -> EmojiResult<Option<LayoutSummary>> {
        let font = self.oversized_font(request);
        let trimmed = trim_lines(
            &self.fonts,
            &request.lines,
            &font,
            request.text_color.into(),
            self.config.line_height_ratio,
        )?;
        if trimmed.is_empty() {
            return Ok(None);
        }

        let tallest = trimmed.iter().map(|line| line.height()).max().unwrap_or(0);
        let gap = tallest as f32 * self.config.line_gap_ratio;
        let content_width = trimmed.iter().map(|line| line.width()).max().unwrap_or(0) as f32;
        let content_height = trimmed.iter().map(|line| line.height() as f32).sum::<f32>()
            + gap * (trimmed.len() - 1) as f32;

        let canvas_width = request.canvas_width as f32;
        let Some(placement) = Placement::fit(
            content_width,
            content_height,
            canvas_width,
            request.canvas_height as f32,
            self.config.padding,
        ) else {
            return Ok(None);
        };

        let mut regions = Vec::with_capacity(trimmed.len());
        let mut y = placement.offset_y;
        for line in &trimmed {
            let width = line.width() as f32 * placement.scale;
            let height = line.height() as f32 * placement.scale;
            let region = DrawnRegion {
                x: (canvas_width - width) / 2.0,
                y,
                width,
                height,
            };
            canvas.draw_canvas_cropped(
                line.raster(),
                &line.crop_to(region.x, region.y, region.width, region.height),
            );
            regions.push(region);
            y += height + gap * placement.scale;
        }

        Ok(Some(LayoutSummary {
            mode: FitMode::PerLine,
            font_size: trimmed[0].font_size() as u32,
            scale: placement.scale,
            horizontal_scale: 1.0,
            regions,
        }))
    }

    /// Font-metric fitting without trimming: lines centered with a middle
    /// baseline, compressed horizontally in the height-only variant.
    fn draw_metric_fit(
        &self,
        canvas: &mut Canvas2dContext,
        request: &RenderRequest,
        lines: &[String],
        color: Rgb,
        params: &FitParams,
    ) -> LayoutSummary {
        let base = FontDescriptor::from_family_list(&request.font_family, params.initial_size as f32)
            .with_weight(self.config.font_weight);
        let size = compute_font_size(canvas, lines, &base, params);
        let font = base.with_size(size as f32);

        let widest = widest_line(canvas, lines, &font);
        let scale_x = match params.constraint {
            FitConstraint::Height => horizontal_scale(widest, params.max_width),
            FitConstraint::WidthAndHeight => 1.0,
        };

        let width = request.canvas_width as f32;
        let height = request.canvas_height as f32;
        let line_height = size as f32 * params.line_height_ratio;
        let total_height = lines.len() as f32 * line_height;
        let start_y = (height - total_height) / 2.0 + line_height / 2.0;

        let mut regions = Vec::with_capacity(lines.len());
        canvas.set_font(font.clone());
        canvas.set_fill_style_color(color.into());
        canvas.set_text_align(TextAlign::Center);
        canvas.set_text_baseline(TextBaseline::Middle);

        canvas.save();
        canvas.translate(width / 2.0, 0.0);
        canvas.scale(scale_x, 1.0);
        for (index, line) in lines.iter().enumerate() {
            let y = start_y + index as f32 * line_height;
            canvas.fill_text(line, 0.0, y);

            let line_width = canvas.measure_width(line, &font) * scale_x;
            regions.push(DrawnRegion {
                x: (width - line_width) / 2.0,
                y: y - line_height / 2.0,
                width: line_width,
                height: line_height,
            });
        }
        canvas.restore();

        log::debug!(target: "emoemo", "metric fit {}px, scale_x {:.3}", size, scale_x);
        LayoutSummary {
            mode: match params.constraint {
                FitConstraint::Height => FitMode::HeightFirst,
                FitConstraint::WidthAndHeight => FitMode::FitBoth,
            },
            font_size: size,
            scale: 1.0,
            horizontal_scale: scale_x,
            regions,
        }
    }

    fn warn_missing_family(&self, family_list: &str) {
        let families = emoemo_canvas2d::parse_family_list(family_list);
        let generic = |name: &str| {
            matches!(
                name.to_ascii_lowercase().as_str(),
                "sans-serif" | "serif" | "monospace" | "cursive" | "fantasy" | "system-ui"
            )
        };
        let available = families
            .iter()
            .any(|family| generic(family) || self.fonts.has_family(family));
        if !available {
            log::warn!(target: "emoemo", "font family {} is not installed, falling back to sans-serif", family_list);
        }
    }
}
