//! Animated-wallpaper detection and metadata extraction.
//!
//! Inspection never fails: undecodable or unrecognized content degrades to
//! the static default. The switcher persists the record only when the
//! source is actually animated, so a missing `animated_meta.json` is the
//! steady state for static wallpapers.

use eyre::Result;
use image::AnimationDecoder;
use serde::Deserialize;
use serde::Serialize;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimatedMetadata {
    pub is_animated: bool,
    pub format: Option<String>,
    pub frame_count: u32,
    /// Duration of a representative (first) frame in milliseconds.
    pub frame_duration_ms: Option<u32>,
    pub total_duration_ms: Option<u64>,
    /// Raw loop count as stored in the container; 0 means loop forever.
    #[serde(rename = "loop")]
    pub loop_count: Option<u32>,
}

impl Default for AnimatedMetadata {
    fn default() -> Self {
        Self {
            is_animated: false,
            format: None,
            frame_count: 1,
            frame_duration_ms: None,
            total_duration_ms: None,
            loop_count: None,
        }
    }
}

/// Inspect `path` for animation. Decode errors of any kind yield the
/// static default rather than propagating.
#[must_use]
pub fn inspect(path: &Path) -> AnimatedMetadata {
    match try_inspect(path) {
        Ok(meta) => meta,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Treating wallpaper as static");
            AnimatedMetadata::default()
        }
    }
}

fn try_inspect(path: &Path) -> Result<AnimatedMetadata> {
    let ext = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("gif") => inspect_gif(path),
        Some("webp") => inspect_webp(path),
        Some("png") => inspect_apng(path),
        _ => Ok(AnimatedMetadata::default()),
    }
}

/// GIF is inspected with a streaming decoder: one frame buffer lives at a
/// time regardless of frame count, and the Netscape loop extension is
/// available, which the generic animation API does not expose.
fn inspect_gif(path: &Path) -> Result<AnimatedMetadata> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(BufReader::new(File::open(path)?))?;

    let mut frame_count: u32 = 0;
    let mut first_delay_ms: Option<u32> = None;
    while let Some(frame) = decoder.read_next_frame()? {
        frame_count += 1;
        if first_delay_ms.is_none() {
            // GIF frame delay is in 10ms units.
            first_delay_ms = Some(u32::from(frame.delay) * 10);
        }
    }

    let loop_count = match decoder.repeat() {
        gif::Repeat::Infinite => Some(0),
        gif::Repeat::Finite(n) => Some(u32::from(n)),
    };

    Ok(finish("GIF", frame_count, first_delay_ms, loop_count))
}

fn inspect_webp(path: &Path) -> Result<AnimatedMetadata> {
    let decoder = image::codecs::webp::WebPDecoder::new(BufReader::new(File::open(path)?))?;
    if !decoder.has_animation() {
        return Ok(AnimatedMetadata::default());
    }
    let (frame_count, first_delay_ms) = count_frames(decoder)?;
    Ok(finish("WEBP", frame_count, first_delay_ms, None))
}

fn inspect_apng(path: &Path) -> Result<AnimatedMetadata> {
    let decoder = image::codecs::png::PngDecoder::new(BufReader::new(File::open(path)?))?;
    if !decoder.is_apng()? {
        return Ok(AnimatedMetadata::default());
    }
    let (frame_count, first_delay_ms) = count_frames(decoder.apng()?)?;
    Ok(finish("PNG", frame_count, first_delay_ms, None))
}

/// Walk an animation frame by frame, keeping only the count and the first
/// frame's delay. Frames are dropped as they are decoded.
fn count_frames<'a, D: AnimationDecoder<'a>>(decoder: D) -> Result<(u32, Option<u32>)> {
    let mut frame_count: u32 = 0;
    let mut first_delay_ms: Option<u32> = None;
    for frame in decoder.into_frames() {
        let frame = frame?;
        if first_delay_ms.is_none() {
            let (numer, denom) = frame.delay().numer_denom_ms();
            first_delay_ms = Some(if denom == 0 { 0 } else { numer / denom });
        }
        frame_count += 1;
    }
    Ok((frame_count, first_delay_ms))
}

fn finish(
    format: &str,
    frame_count: u32,
    frame_duration_ms: Option<u32>,
    loop_count: Option<u32>,
) -> AnimatedMetadata {
    if frame_count <= 1 {
        return AnimatedMetadata::default();
    }
    let total_duration_ms =
        frame_duration_ms.and_then(|d| u64::from(d).checked_mul(u64::from(frame_count)));
    AnimatedMetadata {
        is_animated: true,
        format: Some(format.to_string()),
        frame_count,
        frame_duration_ms,
        total_duration_ms,
        loop_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_gif(path: &PathBuf, frames: u16, delay_10ms: u16) -> eyre::Result<()> {
        let mut file = File::create(path)?;
        let mut encoder = gif::Encoder::new(&mut file, 2, 2, &[])?;
        encoder.set_repeat(gif::Repeat::Infinite)?;
        for i in 0..frames {
            let shade = (i % 2) as u8 * 255;
            let pixels = vec![shade; 2 * 2 * 3];
            let mut frame = gif::Frame::from_rgb(2, 2, &pixels);
            frame.delay = delay_10ms;
            encoder.write_frame(&frame)?;
        }
        Ok(())
    }

    #[test]
    fn multi_frame_gif_reports_duration_product() -> eyre::Result<()> {
        let td = tempdir()?;
        let p = td.path().join("anim.gif");
        write_gif(&p, 3, 4)?;

        let meta = inspect(&p);
        assert!(meta.is_animated);
        assert_eq!(meta.format.as_deref(), Some("GIF"));
        assert_eq!(meta.frame_count, 3);
        assert_eq!(meta.frame_duration_ms, Some(40));
        assert_eq!(meta.total_duration_ms, Some(120));
        assert_eq!(meta.loop_count, Some(0));
        Ok(())
    }

    #[test]
    fn single_frame_gif_is_static() -> eyre::Result<()> {
        let td = tempdir()?;
        let p = td.path().join("still.gif");
        write_gif(&p, 1, 10)?;

        assert_eq!(inspect(&p), AnimatedMetadata::default());
        Ok(())
    }

    #[test]
    fn static_png_is_static() -> eyre::Result<()> {
        let td = tempdir()?;
        let p = td.path().join("still.png");
        image::RgbImage::new(2, 2).save(&p)?;

        assert_eq!(inspect(&p), AnimatedMetadata::default());
        Ok(())
    }

    #[test]
    fn garbage_bytes_degrade_to_static() -> eyre::Result<()> {
        let td = tempdir()?;
        let p = td.path().join("broken.gif");
        std::fs::write(&p, b"definitely not a gif")?;

        assert_eq!(inspect(&p), AnimatedMetadata::default());
        Ok(())
    }

    #[test]
    fn loop_json_field_uses_wire_name() -> eyre::Result<()> {
        let meta = finish("GIF", 2, Some(100), Some(3));
        let json = serde_json::to_string(&meta)?;
        assert!(json.contains("\"loop\":3"));
        let back: AnimatedMetadata = serde_json::from_str(&json)?;
        assert_eq!(back, meta);
        Ok(())
    }
}
