//! Best-effort user hook run after activation.
//!
//! Fire-and-forget: the hook is spawned through the shell and never waited
//! on, there is no error channel back to the caller, and its stderr is
//! discarded.

use crate::app_home::AppHome;
use crate::user_config::UserConfig;
use std::path::Path;
use std::process::Command;
use std::process::Stdio;
use tracing::debug;

/// Environment variable carrying the activated wallpaper's absolute path.
pub const WALLPAPER_PATH_ENV: &str = "WALLPAPER_PATH";

/// Spawn the configured `wallpaper.postHook`, if any. Config problems and
/// spawn failures are logged at debug and otherwise ignored.
pub fn run_post_hook(home: &AppHome, wall: &Path) {
    let Some(config) = UserConfig::load(home) else {
        return;
    };
    let Some(hook) = config.wallpaper.post_hook else {
        return;
    };
    if hook.trim().is_empty() {
        return;
    }

    debug!(hook, "Spawning post-activation hook");
    let mut command = shell_command(&hook);
    let spawned = command
        .env(WALLPAPER_PATH_ENV, wall)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(e) = spawned {
        debug!(error = %e, "Post-activation hook failed to spawn");
    }
}

#[cfg(unix)]
fn shell_command(hook: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(hook);
    command
}

#[cfg(windows)]
fn shell_command(hook: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(hook);
    command
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn absent_hook_is_a_no_op() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = AppHome(td.path().to_path_buf());
        // No config file at all: nothing to run, nothing to fail.
        run_post_hook(&home, Path::new("/walls/a.png"));
        Ok(())
    }

    #[test]
    fn hook_receives_the_wallpaper_path() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = AppHome(td.path().to_path_buf());
        let witness = td.path().join("witness.txt");
        std::fs::write(
            UserConfig::config_file_path(&home),
            format!(
                r#"{{"wallpaper": {{"postHook": "printf %s \"$WALLPAPER_PATH\" > {}"}}}}"#,
                witness.display()
            ),
        )?;

        run_post_hook(&home, Path::new("/walls/a.png"));

        // The hook is fire-and-forget; give it a moment to run.
        let mut written = String::new();
        for _ in 0..100 {
            written = std::fs::read_to_string(&witness).unwrap_or_default();
            if written == "/walls/a.png" {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert_eq!(written, "/walls/a.png");
        Ok(())
    }
}
