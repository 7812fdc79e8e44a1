use std::env;
use std::time::Duration;

use anyhow::Result;
use nearby_core::location::DEFAULT_IP_ENDPOINT;
use nearby_core::{Coordinate, DEFAULT_ZOOM, FALLBACK_COORDINATE, ProviderSettings};
use serde::Deserialize;

use super::resolved::validation;
use super::resolved::{ConfigError, ConfigSources, LocationChoice, ResolvedConfig, SettingSource};
use crate::cli::{CliArgs, LocationSourceArg};

mod sections;

use sections::{
	LocationSection, LoggingSection, MapSection, ProviderSection, SearchSection, UiSection,
};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	provider: ProviderSection,
	location: LocationSection,
	map: MapSection,
	search: SearchSection,
	ui: UiSection,
	logging: LoggingSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(key) = cli.api_key.clone() {
			self.provider.api_key = Some(key);
		}
		if let (Some(latitude), Some(longitude)) = (cli.lat, cli.lon) {
			self.location.latitude = Some(latitude);
			self.location.longitude = Some(longitude);
			self.location.source = Some(LocationSourceArg::Fixed.as_str().to_string());
		}
		if let Some(source) = cli.location_source {
			self.location.source = Some(source.as_str().to_string());
		}
		if let Some(zoom) = cli.zoom {
			self.map.zoom = Some(i64::from(zoom));
		}
		if let Some(theme) = cli.theme.clone() {
			self.ui.theme = Some(theme);
		}
		if let Some(query) = cli.initial_query.clone() {
			self.ui.initial_query = Some(query);
		}
		if let Some(level) = cli.log_level.clone() {
			self.logging.level = Some(level);
		}
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			zoom: detect_source(
				cli.zoom.is_some(),
				self.map.zoom.is_some(),
				"NEARBY__MAP__ZOOM",
				"--zoom",
				"map.zoom",
			),
			timeout: detect_source(
				false,
				self.provider.timeout_secs.is_some(),
				"NEARBY__PROVIDER__TIMEOUT_SECS",
				"",
				"provider.timeout_secs",
			),
			location_source: detect_source(
				cli.location_source.is_some() || cli.lat.is_some(),
				self.location.source.is_some(),
				"NEARBY__LOCATION__SOURCE",
				if cli.location_source.is_some() {
					"--location-source"
				} else {
					"--lat"
				},
				"location.source",
			),
			latitude: detect_source(
				cli.lat.is_some(),
				self.location.latitude.is_some(),
				"NEARBY__LOCATION__LATITUDE",
				"--lat",
				"location.latitude",
			),
			longitude: detect_source(
				cli.lon.is_some(),
				self.location.longitude.is_some(),
				"NEARBY__LOCATION__LONGITUDE",
				"--lon",
				"location.longitude",
			),
		};

		let provider = self.resolve_provider(&sources)?;
		let location = self.resolve_location(&sources)?;
		let fallback = self.resolve_fallback()?;
		let zoom = match self.map.zoom {
			Some(zoom) => validation::zoom(zoom, sources.source_for_zoom())?,
			None => DEFAULT_ZOOM,
		};
		let debounce_ms = self
			.search
			.autocomplete_debounce_ms
			.unwrap_or(DEFAULT_DEBOUNCE_MS);

		Ok(ResolvedConfig {
			provider,
			location,
			fallback,
			zoom,
			autocomplete_debounce: Duration::from_millis(debounce_ms),
			theme: self.ui.theme,
			initial_query: self.ui.initial_query.unwrap_or_default(),
			input_title: self.ui.input_title,
			log_level: self
				.logging
				.level
				.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
			log_file: self.logging.file,
		})
	}

	fn resolve_provider(&self, sources: &ConfigSources) -> Result<ProviderSettings, ConfigError> {
		let defaults = ProviderSettings::default();
		let timeout = validation::timeout(
			self.provider.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
			sources.source_for_timeout(),
		)?;
		let libraries = self
			.provider
			.libraries
			.clone()
			.map(|libraries| {
				libraries
					.into_iter()
					.map(|library| library.trim().to_string())
					.filter(|library| !library.is_empty())
					.collect()
			})
			.unwrap_or(defaults.libraries);

		Ok(ProviderSettings {
			api_key: self.provider.api_key.clone().unwrap_or_default(),
			base_url: self.provider.base_url.clone().unwrap_or(defaults.base_url),
			libraries,
			timeout,
		})
	}

	fn resolve_location(&self, sources: &ConfigSources) -> Result<LocationChoice, ConfigError> {
		let source = self.location.source.as_deref().unwrap_or("ip");
		match source.trim().to_ascii_lowercase().as_str() {
			"ip" => Ok(LocationChoice::Ip {
				endpoint: self
					.location
					.ip_endpoint
					.clone()
					.unwrap_or_else(|| DEFAULT_IP_ENDPOINT.to_string()),
			}),
			"none" => Ok(LocationChoice::Disabled),
			"fixed" => {
				let (Some(latitude), Some(longitude)) =
					(self.location.latitude, self.location.longitude)
				else {
					return Err(ConfigError::invalid(
						"location.source",
						source,
						sources.source_for_location_source(),
						"requires location.latitude and location.longitude",
					));
				};
				let coordinate = validation::coordinate(
					("location.latitude", "location.longitude"),
					(latitude, longitude),
					(sources.source_for_latitude(), sources.source_for_longitude()),
				)?;
				Ok(LocationChoice::Fixed(coordinate))
			}
			_ => Err(ConfigError::invalid(
				"location.source",
				source,
				sources.source_for_location_source(),
				"expected one of ip, fixed, none",
			)),
		}
	}

	fn resolve_fallback(&self) -> Result<Coordinate, ConfigError> {
		let latitude = self
			.location
			.fallback_latitude
			.unwrap_or(FALLBACK_COORDINATE.latitude());
		let longitude = self
			.location
			.fallback_longitude
			.unwrap_or(FALLBACK_COORDINATE.longitude());
		validation::coordinate(
			("location.fallback_latitude", "location.fallback_longitude"),
			(latitude, longitude),
			(
				SettingSource::ConfigKey("location.fallback_latitude"),
				SettingSource::ConfigKey("location.fallback_longitude"),
			),
		)
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}

#[cfg(test)]
mod tests;
