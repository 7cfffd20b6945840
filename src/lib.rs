#![deny(clippy::disallowed_methods)]

pub mod animated_meta;
pub mod app_home;
pub mod cache;
pub mod cli;
pub mod colour;
pub mod image_ops;
pub mod monitors;
pub mod palette;
pub mod pointers;
pub mod post_hook;
pub mod scheme;
pub mod selector;
pub mod smart_opts;
pub mod state_home;
pub mod switcher;
pub mod theme;
pub mod thumbnail;
pub mod tracing;
pub mod user_config;

use crate::cli::Cli;
use clap::CommandFactory;
use clap::FromArgMatches;
pub use image_ops::InvalidImageError;
pub use selector::NoCandidatesError;

pub fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::command();
    let cli = Cli::from_arg_matches(&cli.get_matches())?;

    // Initialize tracing based on global args (debug and --json-logs)
    crate::tracing::init_tracing(cli.global_args.log_level(), cli.global_args.json_logs)?;

    cli.invoke()?;
    Ok(())
}
