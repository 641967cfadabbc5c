//! Raster Canvas 2D surface used by emoemo, built on tiny-skia and cosmic-text.
//!
//! The surface implements the small slice of the browser Canvas 2D API that
//! emoji rendering needs:
//! - `fillRect` with a solid color
//! - `fillText` / `measureText` with a structured [`FontDescriptor`]
//! - `drawImage` of a cropped region of another canvas
//! - `getImageData` and PNG export
//!
//! # Example
//!
//! ```rust,ignore
//! use emoemo_canvas2d::{Canvas2dContext, FontConfig, FontDescriptor, RectParams};
//!
//! let fonts = FontConfig::default().resolve();
//! let mut ctx = Canvas2dContext::with_resolved(128, 128, &fonts)?;
//! ctx.set_fill_style("#ffffff")?;
//! ctx.fill_rect(&RectParams::sized(128.0, 128.0));
//! ctx.set_font(FontDescriptor::new(["sans-serif"], 96.0).with_weight(700));
//! ctx.fill_text("A", 10.0, 110.0);
//! let png_data = ctx.to_png(None)?;
//! ```

mod context;
mod drawing_state;
mod error;
mod font;
mod font_config;
mod geometry;
mod style;
mod text;

// Re-export public API
pub use context::Canvas2dContext;
pub use error::{Canvas2dError, Canvas2dResult};
pub use font::{parse_family_list, FontDescriptor};
pub use font_config::{
    font_config_to_fontdb, CustomFont, FontConfig, GenericFamilyMap, ResolvedFontConfig,
};
pub use geometry::{CanvasColor, ImageCropParams, RectParams};
pub use style::{TextAlign, TextBaseline};
pub use text::TextMetrics;
