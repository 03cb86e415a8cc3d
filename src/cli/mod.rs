pub mod commands;
pub mod utils;

use anyhow::Result;
use clap::ArgMatches;
use std::path::PathBuf;

use post_stubs::Config;

/// Load configuration from `--config` when given, otherwise from
/// `post_stubs.toml` in the working directory (if present).
pub fn load_config(matches: &ArgMatches) -> Result<Config> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::load_from_file(path),
        None => Config::load(),
    }
}
