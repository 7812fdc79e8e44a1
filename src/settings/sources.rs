use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, Environment, File};

use crate::app_dirs;
use crate::cli::CliArgs;

const ENV_PREFIX: &str = "nearby";
const USER_CONFIG_FILE: &str = "config.toml";
/// Checked in order, so `nearby.toml` wins over `.nearby.toml`.
const PROJECT_CONFIG_FILES: [&str; 2] = [".nearby.toml", "nearby.toml"];

/// Build a [`Config`] instance by combining default locations with CLI overrides.
pub(super) fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder.add_source(environment()).build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

/// `NEARBY__SECTION__KEY` variables; `provider.libraries` is comma separated.
fn environment() -> Environment {
	Environment::with_prefix(ENV_PREFIX)
		.separator("__")
		.try_parsing(true)
		.list_separator(",")
		.with_list_parse_key("provider.libraries")
}

/// Discover the default configuration file locations that should be consulted.
pub(super) fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join(USER_CONFIG_FILE));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.extend(PROJECT_CONFIG_FILES.iter().map(|name| current_dir.join(name)));
	}

	files
}
