//! Font size search for the metric based (non-trimming) fit modes.

use emoemo_canvas2d::{Canvas2dContext, FontDescriptor};

/// Anything that can report the advance width of a line of text.
pub trait TextMeasure {
    fn measure_width(&mut self, text: &str, font: &FontDescriptor) -> f32;
}

impl TextMeasure for Canvas2dContext {
    fn measure_width(&mut self, text: &str, font: &FontDescriptor) -> f32 {
        self.save();
        self.set_font(font.clone());
        let width = self.measure_text(text).width;
        self.restore();
        width
    }
}

/// Which dimensions a font size must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitConstraint {
    /// Only the stacked line height must fit.
    Height,
    /// Both the stacked line height and the widest line must fit.
    WidthAndHeight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    /// First candidate size; the search counts down from here.
    pub initial_size: u32,
    pub max_width: f32,
    pub max_height: f32,
    pub line_height_ratio: f32,
    pub constraint: FitConstraint,
}

impl FitParams {
    /// Height-only fit from 200px with 1.15 line height inside 95% of the canvas.
    pub fn height_first(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            initial_size: 200,
            max_width: canvas_width as f32 * 0.95,
            max_height: canvas_height as f32 * 0.95,
            line_height_ratio: 1.15,
            constraint: FitConstraint::Height,
        }
    }

    /// Width and height fit from 100px with 1.2 line height inside 90% of the canvas.
    pub fn fit_both(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            initial_size: 100,
            max_width: canvas_width as f32 * 0.9,
            max_height: canvas_height as f32 * 0.9,
            line_height_ratio: 1.2,
            constraint: FitConstraint::WidthAndHeight,
        }
    }
}

/// Largest integer font size, counting down from `initial_size`, whose layout
/// satisfies the constraint. Never returns less than 1.
pub fn compute_font_size<M: TextMeasure + ?Sized>(
    measure: &mut M,
    lines: &[String],
    font: &FontDescriptor,
    params: &FitParams,
) -> u32 {
    let line_count = lines.len().max(1) as f32;
    let mut size = params.initial_size.max(1);

    while size > 1 {
        let size_px = size as f32;
        let fits_height = line_count * size_px * params.line_height_ratio <= params.max_height;
        let fits = match params.constraint {
            FitConstraint::Height => fits_height,
            FitConstraint::WidthAndHeight => {
                fits_height
                    && widest_line(measure, lines, &font.with_size(size_px)) <= params.max_width
            }
        };
        if fits {
            break;
        }
        size -= 1;
    }

    log::debug!(target: "emoemo", "fit {:?}: {} lines -> {}px", params.constraint, lines.len(), size);
    size
}

/// Advance width of the widest line.
pub fn widest_line<M: TextMeasure + ?Sized>(
    measure: &mut M,
    lines: &[String],
    font: &FontDescriptor,
) -> f32 {
    lines
        .iter()
        .map(|line| measure.measure_width(line, font))
        .fold(0.0, f32::max)
}

/// Horizontal compression that brings `widest` within `max_width`.
pub fn horizontal_scale(widest: f32, max_width: f32) -> f32 {
    if widest > max_width && widest > 0.0 {
        max_width / widest
    } else {
        1.0
    }
}
