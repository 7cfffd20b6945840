use directories_next::ProjectDirs;
use once_cell::sync::Lazy;
use std::env;
use std::ops::Deref;
use std::path::Path;
use std::path::PathBuf;
use tracing::warn;

/// Helper that resolves the directory holding mutable wallpaper state: the
/// current-wallpaper pointers, the active scheme and the propagated colours.
#[derive(Clone, Debug)]
pub struct StateHome(pub PathBuf);

impl StateHome {
    /// Resolve the StateHome:
    /// * If `WALLMAN_STATE_DIR` env var is set, use that directory
    /// * Otherwise use the platform `ProjectDirs::data_local_dir()` for wallman
    pub fn resolve() -> eyre::Result<StateHome> {
        if let Ok(override_dir) = env::var("WALLMAN_STATE_DIR") {
            return Ok(StateHome(PathBuf::from(override_dir)));
        }
        if let Some(pd) = ProjectDirs::from("", "wallman", "wallman") {
            Ok(StateHome(pd.data_local_dir().to_path_buf()))
        } else {
            Err(eyre::eyre!("Could not determine state directory"))
        }
    }

    /// Create directories for the state home if needed
    pub fn ensure_dir(&self) -> eyre::Result<()> {
        std::fs::create_dir_all(&self.0)?;
        Ok(())
    }

    /// Plain text file holding the absolute path of the current wallpaper.
    pub fn path_file(&self) -> PathBuf {
        self.0.join("path.txt")
    }

    /// Symlink to the current wallpaper file.
    pub fn wallpaper_link(&self) -> PathBuf {
        self.0.join("current")
    }

    /// Symlink to the current wallpaper's cached thumbnail.
    pub fn thumbnail_link(&self) -> PathBuf {
        self.0.join("thumbnail")
    }

    /// The active colour scheme record.
    pub fn scheme_file(&self) -> PathBuf {
        self.0.join("scheme.json")
    }

    /// Flat `role value` colour listing written on every theme propagation.
    pub fn colours_file(&self) -> PathBuf {
        self.0.join("colours.conf")
    }
}

impl Deref for StateHome {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        self.0.as_path()
    }
}

/// Cached StateHome instance
pub static STATE_HOME: Lazy<StateHome> = Lazy::new(|| match StateHome::resolve() {
    Ok(s) => s,
    Err(e) => {
        warn!("Warning: failed to resolve state home: {}", e);
        StateHome(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
});
