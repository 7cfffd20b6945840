//! The active colour scheme: a tagged record of `{name, flavour, mode,
//! variant, colours}` persisted in the state directory. The palette engine
//! and desktop-side appliers consume it; the switcher mutates `mode` and
//! `variant` when the scheme is dynamic and smart derivation is enabled.

use crate::cache;
use crate::palette;
use crate::state_home::StateHome;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Scheme name that opts into wallpaper-driven mode/variant.
pub const DYNAMIC_SCHEME: &str = "dynamic";

/// Light/dark theme polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    #[must_use]
    pub fn is_light(self) -> bool {
        matches!(self, Mode::Light)
    }
}

/// Discrete style classification used to pick a palette flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Monochrome,
    Neutral,
    Tonalspot,
    Vibrant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,
    pub flavour: String,
    pub mode: Mode,
    pub variant: Variant,
    #[serde(default)]
    pub colours: BTreeMap<String, String>,
}

impl Default for Scheme {
    fn default() -> Self {
        Self {
            name: DYNAMIC_SCHEME.to_string(),
            flavour: "default".to_string(),
            mode: Mode::Dark,
            variant: Variant::Tonalspot,
            colours: BTreeMap::new(),
        }
    }
}

impl Scheme {
    /// Load the active scheme. A missing or unparsable record yields the
    /// default dynamic scheme.
    #[must_use]
    pub fn load(state: &StateHome) -> Scheme {
        let path = state.scheme_file();
        let Ok(text) = std::fs::read_to_string(&path) else {
            return Scheme::default();
        };
        match serde_json::from_str(&text) {
            Ok(scheme) => scheme,
            Err(e) => {
                debug!(scheme_file = %path.display(), error = %e, "Falling back to default scheme");
                Scheme::default()
            }
        }
    }

    /// Persist the scheme atomically.
    pub fn save(&self, state: &StateHome) -> eyre::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        cache::write_atomic(&state.scheme_file(), json.as_bytes())?;
        Ok(())
    }

    /// Whether the scheme follows the active wallpaper.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.name == DYNAMIC_SCHEME
    }

    /// Recompute the colour roles from a wallpaper thumbnail.
    pub fn update_colours(&mut self, thumb: &Path) -> eyre::Result<()> {
        self.colours = palette::colours_for_image(thumb, self.mode, self.variant)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_and_corrupt_records_yield_default() -> eyre::Result<()> {
        let td = tempdir()?;
        let state = StateHome(td.path().to_path_buf());

        assert_eq!(Scheme::load(&state), Scheme::default());

        state.ensure_dir()?;
        std::fs::write(state.scheme_file(), "]]]")?;
        assert_eq!(Scheme::load(&state), Scheme::default());
        Ok(())
    }

    #[test]
    fn save_then_load_roundtrip() -> eyre::Result<()> {
        let td = tempdir()?;
        let state = StateHome(td.path().to_path_buf());

        let mut scheme = Scheme::default();
        scheme.mode = Mode::Light;
        scheme.variant = Variant::Vibrant;
        scheme
            .colours
            .insert("background".to_string(), "#fafafa".to_string());
        scheme.save(&state)?;

        assert_eq!(Scheme::load(&state), scheme);
        Ok(())
    }

    #[test]
    fn mode_and_variant_serialize_lowercase() -> eyre::Result<()> {
        assert_eq!(serde_json::to_string(&Mode::Light)?, "\"light\"");
        assert_eq!(serde_json::to_string(&Variant::Tonalspot)?, "\"tonalspot\"");
        Ok(())
    }

    #[test]
    fn only_the_dynamic_scheme_is_dynamic() {
        let mut scheme = Scheme::default();
        assert!(scheme.is_dynamic());
        scheme.name = "gruvbox".to_string();
        assert!(!scheme.is_dynamic());
    }
}
