use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ProviderSection {
	pub(super) api_key: Option<String>,
	pub(super) base_url: Option<String>,
	pub(super) libraries: Option<Vec<String>>,
	pub(super) timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct LocationSection {
	/// `ip`, `fixed` or `none`.
	pub(super) source: Option<String>,
	pub(super) latitude: Option<f64>,
	pub(super) longitude: Option<f64>,
	pub(super) fallback_latitude: Option<f64>,
	pub(super) fallback_longitude: Option<f64>,
	pub(super) ip_endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct MapSection {
	/// Signed so out-of-range values reach validation instead of failing
	/// deserialization.
	pub(super) zoom: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) autocomplete_debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct UiSection {
	pub(super) theme: Option<String>,
	pub(super) initial_query: Option<String>,
	pub(super) input_title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct LoggingSection {
	pub(super) level: Option<String>,
	pub(super) file: Option<PathBuf>,
}
