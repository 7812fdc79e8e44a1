use std::path::PathBuf;
use std::time::Duration;

use nearby_core::{Coordinate, ProviderSettings};

mod errors;
mod sources;
mod summary;
pub(crate) mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// How the session finds its initial center.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationChoice {
	/// Ask an IP geolocation endpoint.
	Ip { endpoint: String },
	/// Use a configured coordinate.
	Fixed(Coordinate),
	/// Skip the lookup and start at the fallback.
	Disabled,
}

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	/// Provider settings; the API key may still be empty.
	pub provider: ProviderSettings,
	pub location: LocationChoice,
	/// Center used when the lookup fails.
	pub fallback: Coordinate,
	pub zoom: u8,
	pub autocomplete_debounce: Duration,
	pub theme: Option<String>,
	pub initial_query: String,
	pub input_title: Option<String>,
	pub log_level: String,
	/// Log file; `None` means `$DATA_DIR/nearby.log`.
	pub log_file: Option<PathBuf>,
}

impl ResolvedConfig {
	/// Whether the provider can be bootstrapped at all.
	pub fn has_api_key(&self) -> bool {
		!self.provider.api_key.trim().is_empty()
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}
}
