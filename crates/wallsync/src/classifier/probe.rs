use std::path::Path;

use image::{ImageFormat, ImageReader};
use log::warn;

use crate::catalog::format_file_size;

/// Result of probing one image file. A file that cannot be decoded still
/// yields a probe with zeroed dimensions so the batch can continue.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub byte_size: u64,
    pub file_size: String,
    pub readable: bool,
}

fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "JPEG",
        ImageFormat::Png => "PNG",
        ImageFormat::Gif => "GIF",
        ImageFormat::WebP => "WEBP",
        ImageFormat::Bmp => "BMP",
        _ => "UNKNOWN",
    }
}

/// Probe byte size, container format and pixel dimensions. Never fails: an
/// unreadable image is logged and reported through `readable = false` with
/// zeroed dimensions.
pub fn probe_image(path: &Path) -> ProbeOutcome {
    let byte_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    let file_size = format_file_size(byte_size);

    let mut width = 0;
    let mut height = 0;
    let mut format = String::new();
    let mut readable = false;

    match ImageReader::open(path).and_then(|r| r.with_guessed_format()) {
        Ok(reader) => {
            if let Some(f) = reader.format() {
                format = format_name(f).to_string();
            }
            match reader.into_dimensions() {
                Ok((w, h)) => {
                    width = w;
                    height = h;
                    readable = true;
                }
                Err(e) => {
                    warn!("Failed to read dimensions of {}: {}", path.display(), e);
                }
            }
        }
        Err(e) => {
            warn!("Failed to open image {}: {}", path.display(), e);
        }
    }

    ProbeOutcome {
        width,
        height,
        format,
        byte_size,
        file_size,
        readable,
    }
}
