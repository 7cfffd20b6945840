//! Colour measurements used by the smart-option classifier.
//!
//! Tone is CIE L* computed from sRGB via linear-light relative luminance
//! (IEC 61966-2-1 transfer curve, D65). Colourfulness is the
//! Hasler-Süsstrunk metric over opponent channels.

use image::RgbImage;

/// sRGB component (0-1) to linear light.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance Y (0-1) of an sRGB colour.
#[must_use]
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f32 {
    let rl = srgb_to_linear(f32::from(r) / 255.0);
    let gl = srgb_to_linear(f32::from(g) / 255.0);
    let bl = srgb_to_linear(f32::from(b) / 255.0);
    0.2126 * rl + 0.7152 * gl + 0.0722 * bl
}

/// Perceptual tone (CIE L*, 0-100) of an sRGB colour.
#[must_use]
pub fn tone(r: u8, g: u8, b: u8) -> f32 {
    let y = relative_luminance(r, g, b);
    if y <= 216.0 / 24389.0 {
        y * 24389.0 / 27.0
    } else {
        116.0 * y.cbrt() - 16.0
    }
}

/// Hasler-Süsstrunk colourfulness M of an image. 0 for pure greys, roughly
/// 0-110 for natural images, higher means more saturated content.
#[must_use]
pub fn colourfulness(img: &RgbImage) -> f32 {
    let count = img.pixels().len();
    if count == 0 {
        return 0.0;
    }

    let mut rg_sum = 0.0_f64;
    let mut rg_sq_sum = 0.0_f64;
    let mut yb_sum = 0.0_f64;
    let mut yb_sq_sum = 0.0_f64;
    for px in img.pixels() {
        let [r, g, b] = px.0;
        let rg = f64::from(r) - f64::from(g);
        let yb = 0.5 * (f64::from(r) + f64::from(g)) - f64::from(b);
        rg_sum += rg;
        rg_sq_sum += rg * rg;
        yb_sum += yb;
        yb_sq_sum += yb * yb;
    }

    let n = count as f64;
    let rg_mean = rg_sum / n;
    let yb_mean = yb_sum / n;
    let rg_var = (rg_sq_sum / n - rg_mean * rg_mean).max(0.0);
    let yb_var = (yb_sq_sum / n - yb_mean * yb_mean).max(0.0);

    let std_root = (rg_var + yb_var).sqrt();
    let mean_root = (rg_mean * rg_mean + yb_mean * yb_mean).sqrt();
    (std_root + 0.3 * mean_root) as f32
}
