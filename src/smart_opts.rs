//! Smart options: the light/dark mode and palette variant derived from a
//! wallpaper, memoized per cache entry.
//!
//! Mode comes from the perceptual tone of the thumbnail averaged down to a
//! single pixel; variant from a colourfulness classification of the whole
//! thumbnail.

use crate::cache::CacheEntry;
use crate::colour;
use crate::scheme::Mode;
use crate::scheme::Variant;
use crate::thumbnail;
use eyre::Result;
use eyre::eyre;
use image::DynamicImage;
use image::RgbImage;
use image::imageops::FilterType;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Tone strictly above this classifies as light.
pub const LIGHT_TONE_THRESHOLD: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartOptions {
    pub variant: Variant,
    pub mode: Mode,
}

/// Light iff tone exceeds the threshold; exactly on the threshold is dark.
#[must_use]
pub fn classify_mode(tone: f32) -> Mode {
    if tone > LIGHT_TONE_THRESHOLD {
        Mode::Light
    } else {
        Mode::Dark
    }
}

#[must_use]
pub fn classify_variant(thumb: &RgbImage) -> Variant {
    match colour::colourfulness(thumb) {
        m if m < 2.0 => Variant::Monochrome,
        m if m < 10.0 => Variant::Neutral,
        m if m < 40.0 => Variant::Tonalspot,
        _ => Variant::Vibrant,
    }
}

/// Return the smart options for `wall`, deriving and caching them on first
/// use. An unparsable cache record is treated as absent and recomputed.
pub fn get_smart_opts(wall: &Path, entry: &CacheEntry) -> Result<SmartOptions> {
    let path = entry.smart_opts_path();
    if let Some(opts) = entry.read_json::<SmartOptions>(&path) {
        return Ok(opts);
    }

    let thumb_path = thumbnail::get_thumb(wall, entry)?;
    let thumb = image::open(&thumb_path)
        .map_err(|e| eyre!("Failed to reopen thumbnail {}: {}", thumb_path.display(), e))?
        .into_rgb8();

    let variant = classify_variant(&thumb);

    // Area-average the whole thumbnail into one representative pixel.
    let pixel = DynamicImage::ImageRgb8(thumb)
        .resize_exact(1, 1, FilterType::Lanczos3)
        .into_rgb8();
    let [r, g, b] = pixel.get_pixel(0, 0).0;
    let mode = classify_mode(colour::tone(r, g, b));

    let opts = SmartOptions { variant, mode };
    entry.write_json(&path, &opts)?;
    debug!(?opts, wallpaper = %wall.display(), "Derived smart options");
    Ok(opts)
}
