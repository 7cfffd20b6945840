//! Tonal colour roles derived from a wallpaper thumbnail.
//!
//! The generator keeps the thumbnail's dominant hue and lays out a fixed
//! ladder of tone levels per mode, with chroma scaled by the scheme variant.

use crate::scheme::Mode;
use crate::scheme::Variant;
use eyre::Result;
use eyre::eyre;
use image::imageops::FilterType;
use std::collections::BTreeMap;
use std::path::Path;

/// role name -> (dark tone, light tone), both on the 0-100 L scale.
const ROLE_TONES: [(&str, f32, f32); 8] = [
    ("background", 6.0, 98.0),
    ("surface", 12.0, 94.0),
    ("surface_alt", 20.0, 88.0),
    ("outline", 45.0, 55.0),
    ("primary", 80.0, 40.0),
    ("on_primary", 20.0, 98.0),
    ("text", 95.0, 8.0),
    ("text_muted", 70.0, 35.0),
];

/// Compute the colour role map for a wallpaper thumbnail.
pub fn colours_for_image(
    thumb: &Path,
    mode: Mode,
    variant: Variant,
) -> Result<BTreeMap<String, String>> {
    let img = image::open(thumb)
        .map_err(|e| eyre!("Failed to open thumbnail {}: {}", thumb.display(), e))?;
    let pixel = img.resize_exact(1, 1, FilterType::Lanczos3).into_rgb8();
    let [r, g, b] = pixel.get_pixel(0, 0).0;
    Ok(build_roles((r, g, b), mode, variant))
}

fn build_roles(source: (u8, u8, u8), mode: Mode, variant: Variant) -> BTreeMap<String, String> {
    let (hue, saturation, _) = rgb_to_hsl(source.0, source.1, source.2);
    let chroma = (saturation * variant_chroma(variant)).clamp(0.0, 1.0);

    let mut colours = BTreeMap::new();
    for (role, dark_tone, light_tone) in ROLE_TONES {
        let tone = if mode.is_light() { light_tone } else { dark_tone };
        let (r, g, b) = hsl_to_rgb(hue, chroma, tone / 100.0);
        colours.insert(role.to_string(), hex(r, g, b));
    }
    colours
}

fn variant_chroma(variant: Variant) -> f32 {
    match variant {
        Variant::Monochrome => 0.0,
        Variant::Neutral => 0.25,
        Variant::Tonalspot => 0.6,
        Variant::Vibrant => 1.0,
    }
}

fn hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Hue in degrees, saturation and lightness in 0-1.
fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = f32::from(r) / 255.0;
    let g = f32::from(g) / 255.0;
    let b = f32::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;
    let delta = max - min;

    if delta < f32::EPSILON {
        return (0.0, 0.0, lightness);
    }

    let saturation = if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let hue = if (max - r).abs() < f32::EPSILON {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if (max - g).abs() < f32::EPSILON {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (hue, saturation, lightness)
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue / 60.0;
    let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
    let (r1, g1, b1) = match h {
        h if h < 1.0 => (c, x, 0.0),
        h if h < 2.0 => (x, c, 0.0),
        h if h < 3.0 => (0.0, c, x),
        h if h < 4.0 => (0.0, x, c),
        h if h < 5.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let to_byte = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    (to_byte(r1), to_byte(g1), to_byte(b1))
}
