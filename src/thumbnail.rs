//! Memoized wallpaper thumbnails.

use crate::cache;
use crate::cache::CacheEntry;
use crate::image_ops;
use eyre::Result;
use eyre::eyre;
use image::DynamicImage;
use image::ImageFormat;
use image::imageops::FilterType;
use std::io::Cursor;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

/// Thumbnails fit within this bound on both axes.
pub const THUMBNAIL_BOUND: u32 = 128;

/// Return the cached thumbnail for `wall`, generating it on first use.
///
/// Once the file exists it is returned as a path handle without touching the
/// source image again, so the source may disappear after first caching.
/// Concurrent first calls may both generate; the atomic write makes the race
/// produce equivalent output rather than a torn file.
pub fn get_thumb(wall: &Path, entry: &CacheEntry) -> Result<PathBuf> {
    let thumb = entry.thumbnail_path();
    if thumb.exists() {
        debug!(thumbnail = %thumb.display(), "Thumbnail cache hit");
        return Ok(thumb);
    }

    let img = DynamicImage::ImageRgb8(image_ops::load_first_frame_rgb(wall)?);
    let img = if img.width() <= THUMBNAIL_BOUND && img.height() <= THUMBNAIL_BOUND {
        img
    } else {
        img.resize(THUMBNAIL_BOUND, THUMBNAIL_BOUND, FilterType::Nearest)
    };

    let mut encoded = Vec::new();
    img.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Jpeg)
        .map_err(|e| eyre!("Failed to encode thumbnail for {}: {}", wall.display(), e))?;

    entry.ensure_dir()?;
    cache::write_atomic(&thumb, &encoded)?;
    debug!(thumbnail = %thumb.display(), "Generated thumbnail");
    Ok(thumb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheHome;
    use image::RgbImage;
    use tempfile::tempdir;

    #[test]
    fn thumbnail_fits_bound_and_keeps_aspect() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = CacheHome(td.path().join("cache"));
        let wall = td.path().join("wide.png");
        RgbImage::new(400, 200).save(&wall)?;

        let entry = home.entry_for(&wall);
        let thumb = get_thumb(&wall, &entry)?;
        let img = image::open(&thumb)?;
        assert_eq!((img.width(), img.height()), (128, 64));
        Ok(())
    }

    #[test]
    fn small_sources_are_not_upscaled() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = CacheHome(td.path().join("cache"));
        let wall = td.path().join("small.png");
        RgbImage::new(64, 48).save(&wall)?;

        let entry = home.entry_for(&wall);
        let thumb = get_thumb(&wall, &entry)?;
        let img = image::open(&thumb)?;
        assert_eq!((img.width(), img.height()), (64, 48));
        Ok(())
    }

    #[test]
    fn second_call_survives_source_deletion() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = CacheHome(td.path().join("cache"));
        let wall = td.path().join("gone.png");
        RgbImage::new(300, 300).save(&wall)?;

        let entry = home.entry_for(&wall);
        let first = get_thumb(&wall, &entry)?;
        std::fs::remove_file(&wall)?;

        let second = get_thumb(&wall, &entry)?;
        assert_eq!(first, second);
        assert!(second.exists());
        Ok(())
    }
}
