//! Monitor geometry, queried from the compositor.

use serde::Deserialize;
use std::process::Command;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Monitor {
    pub width: u32,
    pub height: u32,
}

/// Source of connected monitor descriptors. The production implementation
/// shells out to the compositor; tests substitute a fixed list.
pub trait MonitorSource {
    fn monitors(&self) -> eyre::Result<Vec<Monitor>>;
}

/// Queries Hyprland via `hyprctl -j monitors`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HyprlandMonitors;

impl MonitorSource for HyprlandMonitors {
    fn monitors(&self) -> eyre::Result<Vec<Monitor>> {
        let output = Command::new("hyprctl").args(["-j", "monitors"]).output()?;
        if !output.status.success() {
            return Err(eyre::eyre!("hyprctl monitors failed with {}", output.status));
        }
        let monitors: Vec<Monitor> = serde_json::from_slice(&output.stdout)?;
        debug!(count = monitors.len(), "Queried monitors");
        Ok(monitors)
    }
}

/// The smallest width and smallest height across all monitors, taken
/// independently. `None` when no monitors are reported.
#[must_use]
pub fn min_geometry(monitors: &[Monitor]) -> Option<(u32, u32)> {
    let min_width = monitors.iter().map(|m| m.width).min()?;
    let min_height = monitors.iter().map(|m| m.height).min()?;
    Some((min_width, min_height))
}
