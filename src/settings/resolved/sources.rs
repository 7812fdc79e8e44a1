use std::fmt;

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Origins of the values that validation can reject.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) zoom: Option<SettingSource>,
	pub(crate) timeout: Option<SettingSource>,
	pub(crate) location_source: Option<SettingSource>,
	pub(crate) latitude: Option<SettingSource>,
	pub(crate) longitude: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for_zoom(&self) -> SettingSource {
		or_key(&self.zoom, "map.zoom")
	}

	pub(crate) fn source_for_timeout(&self) -> SettingSource {
		or_key(&self.timeout, "provider.timeout_secs")
	}

	pub(crate) fn source_for_location_source(&self) -> SettingSource {
		or_key(&self.location_source, "location.source")
	}

	pub(crate) fn source_for_latitude(&self) -> SettingSource {
		or_key(&self.latitude, "location.latitude")
	}

	pub(crate) fn source_for_longitude(&self) -> SettingSource {
		or_key(&self.longitude, "location.longitude")
	}
}

fn or_key(source: &Option<SettingSource>, key: &'static str) -> SettingSource {
	source.clone().unwrap_or(SettingSource::ConfigKey(key))
}
