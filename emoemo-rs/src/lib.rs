#![doc = include_str!("../README.md")]

pub mod bounds;
pub mod color;
pub mod compositor;
pub mod config;
pub mod error;
pub mod export;
pub mod fit;
pub mod presets;
pub mod settings;
pub mod trim;

pub use bounds::{find_bounds, GlyphBounds};
pub use color::Rgb;
pub use compositor::{
    DrawnRegion, EmojiRenderer, LayoutSummary, Placement, RenderOutcome, Rendered, Variant,
};
pub use config::{FitMode, RenderConfig};
pub use error::{EmojiError, EmojiResult};
pub use export::{encode_png, save_png, suggested_filename};
pub use settings::{EmojiSettings, RenderRequest, TextStyle};
pub use trim::TrimmedLine;

/// The raster surface used for rendering.
pub use emoemo_canvas2d as canvas;
