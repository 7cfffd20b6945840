//! Image validity checks and decode normalization.
//!
//! Everything downstream of the cache (thumbnails, smart options) consumes
//! one canonical form: a single orientation-corrected RGB frame with any
//! transparency flattened onto white.

use eyre::Result;
use eyre::eyre;
use exif::In;
use exif::Tag;
use image::DynamicImage;
use image::Rgb;
use image::RgbImage;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// The path is missing, not a regular file, or has an unsupported extension.
/// The only fatal error an activation can produce.
#[derive(Debug, Error)]
#[error("\"{}\" is not a valid image", .0.display())]
pub struct InvalidImageError(pub PathBuf);

/// Extensions accepted as wallpapers, lowercase.
pub const SUPPORTED_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "webp", "tif", "tiff", "gif"];

/// Whether `path` is a regular file with a supported image extension.
/// Used both by the selector's enumeration filter and the switcher's pre-check.
#[must_use]
pub fn is_valid_image(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Decode `path` into an owned RGB buffer: the first frame for animated
/// sources, orientation-corrected, alpha composited over opaque white.
///
/// # Errors
///
/// Returns an error if the file cannot be decoded at all. Callers that only
/// classify treat that as "unknown" rather than propagating.
pub fn load_first_frame_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| eyre!("Failed to decode {}: {}", path.display(), e))?;
    let img = apply_orientation(img, read_orientation(path));
    Ok(flatten_onto_white(img))
}

/// Header-only size probe, adjusted for EXIF orientation (rotated images
/// report their visual width/height). Cheap enough to run per candidate
/// during selection filtering.
pub fn oriented_dimensions(path: &Path) -> Result<(u32, u32)> {
    let (width, height) = image::image_dimensions(path)
        .map_err(|e| eyre!("Failed to read dimensions of {}: {}", path.display(), e))?;
    if matches!(read_orientation(path), 5..=8) {
        Ok((height, width))
    } else {
        Ok((width, height))
    }
}

/// EXIF orientation value 1-8; anything unreadable counts as 1 (upright).
fn read_orientation(path: &Path) -> u32 {
    let Ok(file) = File::open(path) else {
        return 1;
    };
    let mut reader = BufReader::new(file);
    exif::Reader::new()
        .read_from_container(&mut reader)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .unwrap_or(1)
}

fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

/// Composite any alpha channel over an opaque white background. Paletted
/// sources with a transparency entry decode as RGBA, so they take the same
/// path.
fn flatten_onto_white(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }

    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        let alpha = u32::from(a);
        let blend = |c: u8| -> u8 {
            let v = (u32::from(c) * alpha + 255 * (255 - alpha)) / 255;
            v.min(255) as u8
        };
        *dst = Rgb([blend(r), blend(g), blend(b)]);
    }
    out
}
