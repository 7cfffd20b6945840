use crate::cache::CACHE_HOME;
use crate::cli::to_args::ToArgs;
use crate::pointers;
use crate::state_home::STATE_HOME;
use crate::switcher;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

/// Print the colour scheme derived from a wallpaper
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct ColoursArgs {
    /// Wallpaper to derive colours for (defaults to the current wallpaper)
    #[arbitrary(value = None)]
    pub wallpaper: Option<PathBuf>,

    /// Keep the scheme's configured mode/variant instead of deriving them
    #[clap(long)]
    pub no_smart: bool,
}

impl ColoursArgs {
    pub fn invoke(self) -> eyre::Result<()> {
        let wall = match self.wallpaper {
            Some(wall) => wall,
            None => pointers::current_wallpaper(&STATE_HOME)
                .ok_or_else(|| eyre::eyre!("No wallpaper is currently set"))?,
        };
        let scheme =
            switcher::get_colours_for_wall(&wall, self.no_smart, &STATE_HOME, &CACHE_HOME)?;
        println!("{}", serde_json::to_string_pretty(&scheme)?);
        Ok(())
    }
}

impl ToArgs for ColoursArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut rtn = vec![];
        if let Some(wall) = &self.wallpaper {
            rtn.push(wall.clone().into_os_string());
        }
        if self.no_smart {
            rtn.push(OsString::from("--no-smart"));
        }
        rtn
    }
}
