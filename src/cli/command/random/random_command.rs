use crate::app_home::APP_HOME;
use crate::cache::CACHE_HOME;
use crate::cli::to_args::ToArgs;
use crate::monitors::HyprlandMonitors;
use crate::pointers;
use crate::selector;
use crate::state_home::STATE_HOME;
use crate::switcher;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

/// Pick a random wallpaper from a directory and activate it
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct RandomArgs {
    /// Directory to scan for wallpapers (recursively)
    #[arbitrary(value = PathBuf::from("wallpapers"))]
    pub dir: PathBuf,

    /// Skip the monitor-resolution filter
    #[clap(long)]
    pub no_filter: bool,

    /// Minimum image size as a fraction of the smallest monitor dimension
    #[clap(long, default_value_t = 0.8)]
    #[arbitrary(value = 0.8)]
    pub threshold: f32,

    /// Keep the scheme's configured mode/variant instead of deriving them
    #[clap(long)]
    pub no_smart: bool,
}

impl RandomArgs {
    pub fn invoke(self) -> eyre::Result<()> {
        let current = pointers::current_wallpaper(&STATE_HOME);
        let wall = selector::pick_random(
            &self.dir,
            self.no_filter,
            self.threshold,
            &HyprlandMonitors,
            current.as_deref(),
        )?;
        let wall =
            switcher::set_wallpaper(&wall, self.no_smart, &APP_HOME, &STATE_HOME, &CACHE_HOME)?;
        println!("Set wallpaper to: {}", wall.display());
        Ok(())
    }
}

impl ToArgs for RandomArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut rtn = vec![self.dir.clone().into_os_string()];
        if self.no_filter {
            rtn.push(OsString::from("--no-filter"));
        }
        if (self.threshold - 0.8).abs() > f32::EPSILON {
            rtn.push(OsString::from("--threshold"));
            rtn.push(OsString::from(self.threshold.to_string()));
        }
        if self.no_smart {
            rtn.push(OsString::from("--no-smart"));
        }
        rtn
    }
}
