//! Drawing state that can be saved and restored.

use crate::font::FontDescriptor;
use crate::style::{FillStyle, TextAlign, TextBaseline};
use tiny_skia::Transform;

/// Everything `save`/`restore` pushes and pops.
#[derive(Debug, Clone)]
pub(crate) struct DrawingState {
    pub fill_style: FillStyle,
    pub font: FontDescriptor,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    pub transform: Transform,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: FillStyle::default(),
            font: FontDescriptor::default(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
            transform: Transform::identity(),
        }
    }
}
