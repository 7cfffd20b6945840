//! Candidate enumeration and random wallpaper selection.

use crate::image_ops;
use crate::monitors;
use crate::monitors::MonitorSource;
use eyre::Result;
use rand::seq::IndexedRandom;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

/// Selection produced an empty set, including the case where the only
/// candidate is the currently active wallpaper.
#[derive(Debug, Error)]
#[error("no valid wallpapers to pick from")]
pub struct NoCandidatesError;

/// Enumerate candidate wallpapers under `root`.
///
/// A non-directory root yields an empty list. With filtering enabled, only
/// images at least `threshold` times the smallest monitor dimension on each
/// axis are retained; candidates whose size cannot be probed are dropped.
pub fn select_candidates(
    root: &Path,
    no_filter: bool,
    threshold: f32,
    source: &dyn MonitorSource,
) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut walls = Vec::new();
    collect_images(root, &mut walls)?;

    if no_filter {
        return Ok(walls);
    }

    let monitors = source.monitors()?;
    let Some((min_width, min_height)) = monitors::min_geometry(&monitors) else {
        // Nothing to measure against; treat as unfiltered.
        return Ok(walls);
    };

    Ok(walls
        .into_iter()
        .filter(|wall| fits(wall, min_width, min_height, threshold))
        .collect())
}

/// Pick one candidate uniformly at random, never the currently active
/// wallpaper.
///
/// # Errors
///
/// Fails with [`NoCandidatesError`] when the candidate set is empty, or
/// becomes empty after excluding `current`.
pub fn pick_random(
    root: &Path,
    no_filter: bool,
    threshold: f32,
    source: &dyn MonitorSource,
    current: Option<&Path>,
) -> Result<PathBuf> {
    let mut walls = select_candidates(root, no_filter, threshold, source)?;
    if walls.is_empty() {
        return Err(NoCandidatesError.into());
    }

    if let Some(current) = current {
        let current = dunce::canonicalize(current).unwrap_or_else(|_| current.to_path_buf());
        walls.retain(|wall| {
            dunce::canonicalize(wall).unwrap_or_else(|_| wall.clone()) != current
        });
        if walls.is_empty() {
            return Err(NoCandidatesError.into());
        }
    }

    let mut rng = rand::rng();
    let chosen = walls.choose(&mut rng).cloned().ok_or(NoCandidatesError)?;
    debug!(wallpaper = %chosen.display(), pool = walls.len(), "Picked wallpaper");
    Ok(chosen)
}

fn fits(wall: &Path, min_width: u32, min_height: u32, threshold: f32) -> bool {
    match image_ops::oriented_dimensions(wall) {
        Ok((width, height)) => {
            width as f32 >= min_width as f32 * threshold
                && height as f32 >= min_height as f32 * threshold
        }
        Err(e) => {
            debug!(wallpaper = %wall.display(), error = %e, "Skipping unmeasurable candidate");
            false
        }
    }
}

fn collect_images(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        match entry {
            Ok(ent) => {
                let p = ent.path();
                if image_ops::is_valid_image(&p) {
                    out.push(p);
                } else if p.is_dir() {
                    collect_images(&p, out)?;
                }
            }
            Err(e) => {
                warn!("Failed to read dir entry in {}: {}", dir.display(), e);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitors::Monitor;
    use image::RgbImage;
    use std::fs::File;
    use tempfile::tempdir;

    struct FixedMonitors(Vec<Monitor>);

    impl MonitorSource for FixedMonitors {
        fn monitors(&self) -> eyre::Result<Vec<Monitor>> {
            Ok(self.0.clone())
        }
    }

    fn desk() -> FixedMonitors {
        FixedMonitors(vec![
            Monitor {
                width: 800,
                height: 600,
            },
            Monitor {
                width: 1920,
                height: 1080,
            },
        ])
    }

    #[test]
    fn non_directory_root_yields_nothing() -> eyre::Result<()> {
        let td = tempdir()?;
        let walls = select_candidates(&td.path().join("nope"), true, 0.5, &desk())?;
        assert!(walls.is_empty());
        Ok(())
    }

    #[test]
    fn enumeration_recurses_and_filters_extensions() -> eyre::Result<()> {
        let td = tempdir()?;
        let sub = td.path().join("sub");
        std::fs::create_dir(&sub)?;
        RgbImage::new(4, 4).save(td.path().join("top.png"))?;
        RgbImage::new(4, 4).save(sub.join("nested.png"))?;
        File::create(td.path().join("notes.txt"))?;

        let walls = select_candidates(td.path(), true, 0.5, &desk())?;
        assert_eq!(walls.len(), 2);
        Ok(())
    }

    #[test]
    fn resolution_filter_uses_min_monitor_axis() -> eyre::Result<()> {
        let td = tempdir()?;
        // Minimum geometry is (800, 600); with threshold 0.5 the cutoff is 400x300.
        RgbImage::new(500, 400).save(td.path().join("big.png"))?;
        RgbImage::new(300, 200).save(td.path().join("small.png"))?;

        let walls = select_candidates(td.path(), false, 0.5, &desk())?;
        assert_eq!(walls.len(), 1);
        assert!(walls[0].ends_with("big.png"));
        Ok(())
    }

    #[test]
    fn filter_drops_unmeasurable_candidates() -> eyre::Result<()> {
        let td = tempdir()?;
        std::fs::write(td.path().join("broken.png"), b"not an image")?;
        let walls = select_candidates(td.path(), false, 0.5, &desk())?;
        assert!(walls.is_empty());
        Ok(())
    }

    #[test]
    fn pick_excludes_the_current_wallpaper() -> eyre::Result<()> {
        let td = tempdir()?;
        let a = td.path().join("a.png");
        let b = td.path().join("b.png");
        RgbImage::new(4, 4).save(&a)?;
        RgbImage::new(4, 4).save(&b)?;

        for _ in 0..10 {
            let picked = pick_random(td.path(), true, 0.5, &desk(), Some(&a))?;
            assert_eq!(picked.file_name(), b.file_name());
        }
        Ok(())
    }

    #[test]
    fn sole_candidate_equal_to_current_is_an_error() -> eyre::Result<()> {
        let td = tempdir()?;
        let a = td.path().join("a.png");
        RgbImage::new(4, 4).save(&a)?;

        let err = pick_random(td.path(), true, 0.5, &desk(), Some(&a)).unwrap_err();
        assert!(err.downcast_ref::<NoCandidatesError>().is_some());
        Ok(())
    }

    #[test]
    fn empty_set_is_an_error() -> eyre::Result<()> {
        let td = tempdir()?;
        let err = pick_random(td.path(), true, 0.5, &desk(), None).unwrap_err();
        assert!(err.downcast_ref::<NoCandidatesError>().is_some());
        Ok(())
    }

    #[test]
    fn stale_current_pointer_is_ignored() -> eyre::Result<()> {
        let td = tempdir()?;
        let a = td.path().join("a.png");
        RgbImage::new(4, 4).save(&a)?;

        let picked = pick_random(
            td.path(),
            true,
            0.5,
            &desk(),
            Some(Path::new("/somewhere/else.png")),
        )?;
        assert_eq!(picked.file_name(), a.file_name());
        Ok(())
    }
}
