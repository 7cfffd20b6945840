pub mod clean;
pub mod colours;
pub mod current;
pub mod random;
pub mod set;

use crate::cli::command::clean::clean_command::CleanArgs;
use crate::cli::command::colours::colours_command::ColoursArgs;
use crate::cli::command::current::current_command::CurrentArgs;
use crate::cli::command::random::random_command::RandomArgs;
use crate::cli::command::set::set_command::SetArgs;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Subcommand;
use std::ffi::OsString;

#[derive(Subcommand, Arbitrary, PartialEq, Debug)]
pub enum Command {
    /// Activate a specific wallpaper
    Set(SetArgs),

    /// Pick a random wallpaper from a directory and activate it
    Random(RandomArgs),

    /// Show the current wallpaper and its cached derivations
    Current(CurrentArgs),

    /// Print the colour scheme derived from a wallpaper
    Colours(ColoursArgs),

    /// Clean cached wallpaper derivations
    Clean(CleanArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Current(Default::default())
    }
}

impl Command {
    pub fn invoke(self) -> eyre::Result<()> {
        match self {
            Command::Set(args) => args.invoke(),
            Command::Random(args) => args.invoke(),
            Command::Current(args) => args.invoke(),
            Command::Colours(args) => args.invoke(),
            Command::Clean(args) => args.invoke(),
        }
    }
}

impl ToArgs for Command {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        match self {
            Command::Set(set_args) => {
                args.push("set".into());
                args.extend(set_args.to_args());
            }
            Command::Random(random_args) => {
                args.push("random".into());
                args.extend(random_args.to_args());
            }
            Command::Current(current_args) => {
                args.push("current".into());
                args.extend(current_args.to_args());
            }
            Command::Colours(colours_args) => {
                args.push("colours".into());
                args.extend(colours_args.to_args());
            }
            Command::Clean(clean_args) => {
                args.push("clean".into());
                args.extend(clean_args.to_args());
            }
        }
        args
    }
}
