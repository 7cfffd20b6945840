use crate::app_home::APP_HOME;
use crate::cache::CACHE_HOME;
use crate::cli::to_args::ToArgs;
use crate::state_home::STATE_HOME;
use crate::switcher;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

/// Activate a specific wallpaper
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct SetArgs {
    /// Path to the wallpaper image
    #[arbitrary(value = PathBuf::from("wallpaper.png"))]
    pub wallpaper: PathBuf,

    /// Keep the scheme's configured mode/variant instead of deriving them
    #[clap(long)]
    pub no_smart: bool,
}

impl SetArgs {
    pub fn invoke(self) -> eyre::Result<()> {
        let wall = switcher::set_wallpaper(
            &self.wallpaper,
            self.no_smart,
            &APP_HOME,
            &STATE_HOME,
            &CACHE_HOME,
        )?;
        println!("Set wallpaper to: {}", wall.display());
        Ok(())
    }
}

impl ToArgs for SetArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut rtn = vec![self.wallpaper.clone().into_os_string()];
        if self.no_smart {
            rtn.push(OsString::from("--no-smart"));
        }
        rtn
    }
}
