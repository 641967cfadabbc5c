//! Tight ink bounds of a rasterized image.

/// Inclusive pixel rectangle containing every pixel with non-zero alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphBounds {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl GlyphBounds {
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

/// Find the tight bounds of the non-transparent pixels in an RGBA buffer.
///
/// Scans top-down, bottom-up, then left-to-right and right-to-left within
/// the found rows, stopping each pass at the first row or column with ink.
/// Returns `None` for a fully transparent image or a buffer shorter than
/// `width * height * 4`.
pub fn find_bounds(rgba: &[u8], width: u32, height: u32) -> Option<GlyphBounds> {
    let (w, h) = (width as usize, height as usize);
    if w == 0 || h == 0 {
        return None;
    }
    if rgba.len() < w * h * 4 {
        log::warn!(target: "emoemo", "raster buffer has {} bytes, expected {}", rgba.len(), w * h * 4);
        return None;
    }

    let alpha = |x: usize, y: usize| rgba[(y * w + x) * 4 + 3];
    let row_has_ink = |y: usize| (0..w).any(|x| alpha(x, y) > 0);

    let top = (0..h).find(|&y| row_has_ink(y))?;
    let bottom = (top..h).rev().find(|&y| row_has_ink(y))?;

    let column_has_ink = |x: usize| (top..=bottom).any(|y| alpha(x, y) > 0);
    let left = (0..w).find(|&x| column_has_ink(x))?;
    let right = (left..w).rev().find(|&x| column_has_ink(x))?;

    Some(GlyphBounds {
        top: top as u32,
        bottom: bottom as u32,
        left: left as u32,
        right: right as u32,
    })
}
