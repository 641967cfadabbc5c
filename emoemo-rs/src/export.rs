//! PNG encoding and file output.

use crate::error::{EmojiError, EmojiResult};
use emoemo_canvas2d::{Canvas2dContext, Canvas2dError};
use std::path::{Path, PathBuf};

/// File name used when the text is blank.
pub const DEFAULT_FILE_NAME: &str = "emoji.png";

/// Download name for the given text: `"{text}.png"`, or `emoji.png` when the
/// text is empty or whitespace. The text is used as-is.
pub fn suggested_filename(text: &str) -> String {
    if text.trim().is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        format!("{text}.png")
    }
}

/// Make a suggested file name safe to create inside a directory.
///
/// Path separators, control characters (including newlines) and characters
/// that Windows rejects become `_`; a leading dot is replaced so the file is
/// not hidden and cannot name `.` or `..`.
pub fn sanitize_file_name(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if sanitized.starts_with('.') {
        sanitized.replace_range(0..1, "_");
    }
    if sanitized.trim().is_empty() {
        return DEFAULT_FILE_NAME.to_string();
    }
    sanitized
}

/// Encode the canvas backing raster as PNG bytes.
pub fn encode_png(canvas: &Canvas2dContext) -> EmojiResult<Vec<u8>> {
    canvas.to_png(None).map_err(|err| match err {
        Canvas2dError::PngError(msg) => EmojiError::Export(msg),
        other => EmojiError::Canvas(other),
    })
}

/// Encode the canvas and write it to `path`, creating parent directories.
pub fn write_png(canvas: &Canvas2dContext, path: impl AsRef<Path>) -> EmojiResult<()> {
    let path = path.as_ref();
    let bytes = encode_png(canvas)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    log::info!(target: "emoemo", "wrote {}", path.display());
    Ok(())
}

/// Write the canvas into `dir` under the sanitized suggested name for
/// `text`, returning the path written.
pub fn save_png(
    canvas: &Canvas2dContext,
    dir: impl AsRef<Path>,
    text: &str,
) -> EmojiResult<PathBuf> {
    let path = dir
        .as_ref()
        .join(sanitize_file_name(&suggested_filename(text)));
    write_png(canvas, &path)?;
    Ok(path)
}
