//! Theme propagation: publish the recomputed colours where desktop
//! consumers pick them up.

use crate::cache;
use crate::scheme::Scheme;
use crate::state_home::StateHome;
use eyre::Result;
use std::fmt::Write as _;
use tracing::debug;

/// Write the scheme's colours as a flat `role value` listing. The file is
/// replaced atomically so readers never see a partial palette.
pub fn apply_colours(scheme: &Scheme, state: &StateHome) -> Result<()> {
    let mut out = String::new();
    for (role, value) in &scheme.colours {
        let _ = writeln!(out, "{role} {value}");
    }
    cache::write_atomic(&state.colours_file(), out.as_bytes())?;
    debug!(roles = scheme.colours.len(), file = %state.colours_file().display(), "Propagated colours");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn colours_file_lists_each_role() -> eyre::Result<()> {
        let td = tempdir()?;
        let state = StateHome(td.path().to_path_buf());

        let mut scheme = Scheme::default();
        scheme
            .colours
            .insert("background".to_string(), "#101010".to_string());
        scheme
            .colours
            .insert("text".to_string(), "#f0f0f0".to_string());

        apply_colours(&scheme, &state)?;
        let text = std::fs::read_to_string(state.colours_file())?;
        assert!(text.contains("background #101010"));
        assert!(text.contains("text #f0f0f0"));
        Ok(())
    }
}
