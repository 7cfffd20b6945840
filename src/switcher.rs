//! Wallpaper activation: promote one image to "current", refresh its cached
//! artifacts and propagate the derived theme.
//!
//! Only the validity check and the pointer update can fail the operation;
//! every later step is cache-backed or best-effort and degrades with a
//! warning.

use crate::animated_meta;
use crate::animated_meta::AnimatedMetadata;
use crate::app_home::AppHome;
use crate::cache::CacheHome;
use crate::image_ops;
use crate::image_ops::InvalidImageError;
use crate::pointers;
use crate::post_hook;
use crate::scheme::Scheme;
use crate::smart_opts;
use crate::state_home::StateHome;
use crate::theme;
use crate::thumbnail;
use eyre::Result;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Activate `wall` as the current wallpaper.
///
/// # Errors
///
/// Fails with [`InvalidImageError`] when `wall` is missing, not a regular
/// file or not a supported image, or when the pointers cannot be written.
pub fn set_wallpaper(
    wall: &Path,
    no_smart: bool,
    app: &AppHome,
    state: &StateHome,
    cache: &CacheHome,
) -> Result<PathBuf> {
    let wall = dunce::canonicalize(wall).unwrap_or_else(|_| wall.to_path_buf());
    if !image_ops::is_valid_image(&wall) {
        return Err(InvalidImageError(wall).into());
    }

    pointers::point_at_wallpaper(state, &wall)?;

    let entry = cache.entry_for(&wall);
    if let Err(e) = entry.ensure_dir() {
        warn!(error = %e, "Could not create cache entry directory");
    }

    let meta = entry
        .read_json::<AnimatedMetadata>(&entry.animated_meta_path())
        .unwrap_or_else(|| {
            let meta = animated_meta::inspect(&wall);
            // Only animated sources get a persisted record; a missing file
            // is the expected state for static wallpapers.
            if meta.is_animated {
                if let Err(e) = entry.write_json(&entry.animated_meta_path(), &meta) {
                    warn!(error = %e, "Could not cache animation metadata");
                }
            }
            meta
        });
    debug!(
        is_animated = meta.is_animated,
        frame_count = meta.frame_count,
        "Animation metadata resolved"
    );

    let thumb = match thumbnail::get_thumb(&wall, &entry) {
        Ok(thumb) => {
            if let Err(e) = pointers::point_at_thumbnail(state, &thumb) {
                warn!(error = %e, "Could not update thumbnail pointer");
            }
            Some(thumb)
        }
        Err(e) => {
            warn!(wallpaper = %wall.display(), error = %e, "Could not derive a thumbnail");
            None
        }
    };

    let mut scheme = Scheme::load(state);

    if scheme.is_dynamic() && !no_smart {
        match smart_opts::get_smart_opts(&wall, &entry) {
            Ok(opts) => {
                scheme.mode = opts.mode;
                scheme.variant = opts.variant;
            }
            Err(e) => {
                warn!(error = %e, "Keeping the scheme's configured mode/variant");
            }
        }
    }

    if let Some(thumb) = &thumb {
        if let Err(e) = scheme.update_colours(thumb) {
            warn!(error = %e, "Could not recompute scheme colours");
        }
        if let Err(e) = scheme.save(state) {
            warn!(error = %e, "Could not save the scheme");
        }
        if let Err(e) = theme::apply_colours(&scheme, state) {
            warn!(error = %e, "Could not propagate colours");
        }
    }

    post_hook::run_post_hook(app, &wall);

    info!(wallpaper = %wall.display(), "Activated wallpaper");
    Ok(wall)
}

/// Compute the scheme that would result from activating `wall`, without
/// touching the pointers or the persisted scheme.
///
/// # Errors
///
/// Unlike activation this is a query: decode failures are fatal to the call.
pub fn get_colours_for_wall(
    wall: &Path,
    no_smart: bool,
    state: &StateHome,
    cache: &CacheHome,
) -> Result<Scheme> {
    let wall = dunce::canonicalize(wall).unwrap_or_else(|_| wall.to_path_buf());
    if !image_ops::is_valid_image(&wall) {
        return Err(InvalidImageError(wall).into());
    }

    let entry = cache.entry_for(&wall);
    let mut scheme = Scheme::load(state);
    scheme.name = crate::scheme::DYNAMIC_SCHEME.to_string();
    scheme.flavour = "default".to_string();

    if !no_smart {
        let opts = smart_opts::get_smart_opts(&wall, &entry)?;
        scheme.mode = opts.mode;
        scheme.variant = opts.variant;
    }

    let thumb = thumbnail::get_thumb(&wall, &entry)?;
    scheme.update_colours(&thumb)?;
    Ok(scheme)
}
