//! Persisted current-wallpaper pointers: a plain text path file plus
//! symlinks to the wallpaper and its cached thumbnail.
//!
//! Links are replaced remove-then-create, so a concurrent reader observes
//! either the old or the new target, never a half-written one.

use crate::state_home::StateHome;
use eyre::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

/// Read the current wallpaper pointer. Missing or empty means no wallpaper
/// has been activated yet.
#[must_use]
pub fn current_wallpaper(state: &StateHome) -> Option<PathBuf> {
    let text = fs::read_to_string(state.path_file()).ok()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

/// Persist `wall` as the current wallpaper: overwrite the path file and
/// replace the wallpaper symlink.
pub fn point_at_wallpaper(state: &StateHome, wall: &Path) -> Result<()> {
    state.ensure_dir()?;
    fs::write(state.path_file(), wall.display().to_string())?;
    symlink_force(wall, &state.wallpaper_link())?;
    debug!(wallpaper = %wall.display(), "Updated wallpaper pointers");
    Ok(())
}

/// Replace the thumbnail symlink.
pub fn point_at_thumbnail(state: &StateHome, thumb: &Path) -> Result<()> {
    state.ensure_dir()?;
    symlink_force(thumb, &state.thumbnail_link())?;
    Ok(())
}

/// Create `link` pointing at `target`, removing any previous link first.
pub fn symlink_force(target: &Path, link: &Path) -> Result<()> {
    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent)?;
    }
    match fs::remove_file(link) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    symlink(target, link)?;
    Ok(())
}

#[cfg(unix)]
use std::os::unix::fs::symlink;
#[cfg(windows)]
use std::os::windows::fs::symlink_file as symlink;
