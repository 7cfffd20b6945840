//! User configuration. Only the wallpaper section is modelled; anything
//! else in the file is ignored.

use crate::app_home::AppHome;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub wallpaper: WallpaperConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WallpaperConfig {
    /// Shell command run after every activation, with `WALLPAPER_PATH` set.
    #[serde(rename = "postHook")]
    pub post_hook: Option<String>,
}

impl UserConfig {
    /// Returns the path the config file should live at
    #[must_use]
    pub fn config_file_path(home: &AppHome) -> PathBuf {
        home.file_path("config.json")
    }

    /// Load the user config. Missing or malformed files read as `None`;
    /// callers treat both as "nothing configured".
    #[must_use]
    pub fn load(home: &AppHome) -> Option<UserConfig> {
        let path = Self::config_file_path(home);
        let text = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&text) {
            Ok(config) => Some(config),
            Err(e) => {
                debug!(config_file = %path.display(), error = %e, "Ignoring malformed config");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_reads_as_none() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = AppHome(td.path().to_path_buf());
        assert!(UserConfig::load(&home).is_none());
        Ok(())
    }

    #[test]
    fn malformed_config_reads_as_none() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = AppHome(td.path().to_path_buf());
        std::fs::write(UserConfig::config_file_path(&home), "{{{")?;
        assert!(UserConfig::load(&home).is_none());
        Ok(())
    }

    #[test]
    fn post_hook_is_read_from_the_wallpaper_section() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = AppHome(td.path().to_path_buf());
        std::fs::write(
            UserConfig::config_file_path(&home),
            r#"{"wallpaper": {"postHook": "notify-send changed"}, "other": 1}"#,
        )?;

        let config = UserConfig::load(&home).expect("config should parse");
        assert_eq!(
            config.wallpaper.post_hook.as_deref(),
            Some("notify-send changed")
        );
        Ok(())
    }
}
