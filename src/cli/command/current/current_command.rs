use crate::animated_meta::AnimatedMetadata;
use crate::cache::CACHE_HOME;
use crate::cli::to_args::ToArgs;
use crate::pointers;
use crate::smart_opts::SmartOptions;
use crate::state_home::STATE_HOME;
use arbitrary::Arbitrary;
use clap::Args;
use clap::ValueEnum;
use serde::Serialize;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(ValueEnum, Arbitrary, Clone, PartialEq, Eq, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Auto,
    Json,
    Pretty,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Json => write!(f, "json"),
            Self::Pretty => write!(f, "pretty"),
        }
    }
}

/// Everything known about the current wallpaper without recomputing:
/// artifacts that were never cached print as absent.
#[derive(Debug, Serialize)]
struct CurrentInfo {
    wallpaper: PathBuf,
    animated: Option<AnimatedMetadata>,
    smart: Option<SmartOptions>,
}

/// Show the current wallpaper and its cached derivations
#[derive(Args, Arbitrary, Clone, PartialEq, Eq, Debug, Default)]
pub struct CurrentArgs {
    /// Output mode: auto|json|pretty
    #[clap(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub output: OutputFormat,
}

impl CurrentArgs {
    pub fn invoke(self) -> eyre::Result<()> {
        let Some(wallpaper) = pointers::current_wallpaper(&STATE_HOME) else {
            println!("No wallpaper is currently set");
            return Ok(());
        };

        let entry = CACHE_HOME.entry_for(&wallpaper);
        let info = CurrentInfo {
            animated: entry.read_json(&entry.animated_meta_path()),
            smart: entry.read_json(&entry.smart_opts_path()),
            wallpaper,
        };

        match match self.output {
            OutputFormat::Auto => {
                if atty::is(atty::Stream::Stdout) {
                    OutputFormat::Pretty
                } else {
                    OutputFormat::Json
                }
            }
            other => other,
        } {
            OutputFormat::Auto => unreachable!("output was resolved from Auto earlier"),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(&info)?);
            }
            OutputFormat::Pretty => {
                println!("Wallpaper: {}", info.wallpaper.display());
                match &info.animated {
                    Some(meta) => {
                        println!(
                            "Animated: {} frames{}",
                            meta.frame_count,
                            meta.total_duration_ms
                                .map(|ms| format!(", {ms} ms total"))
                                .unwrap_or_default()
                        );
                    }
                    None => println!("Animated: no"),
                }
                if let Some(smart) = &info.smart {
                    println!("Smart: {:?} / {:?}", smart.mode, smart.variant);
                }
            }
        }

        Ok(())
    }
}

impl ToArgs for CurrentArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut rtn = vec![];
        if self.output != OutputFormat::Auto {
            rtn.push(OsString::from("--output"));
            rtn.push(OsString::from(self.output.to_string()));
        }
        rtn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_args_includes_output_when_set() {
        let args = CurrentArgs {
            output: OutputFormat::Json,
        };
        let v = args.to_args();
        assert!(
            v.windows(2)
                .any(|w| w == [OsString::from("--output"), OsString::from("json")])
        );
    }
}
