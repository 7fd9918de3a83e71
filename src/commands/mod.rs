// Command handlers module
pub mod classify;
pub mod thresholds;
pub mod version;
pub mod watch;

use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;

use crate::core::Config;

// Re-exports for cleaner imports
pub use classify::execute as classify;
pub use version::execute as version;
pub use watch::execute as watch;

/// Config file location: `--config` if given, the user config dir otherwise
pub fn config_path(matches: &ArgMatches) -> Result<PathBuf> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => Ok(path.clone()),
        None => Config::get_config_path(),
    }
}

/// Load the config named by `--config` or the default location
pub fn load_config(matches: &ArgMatches) -> Result<Config> {
    let path = config_path(matches)?;
    Config::load_from(&path)
}
