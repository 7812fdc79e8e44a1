use std::fs;
use std::time::Duration;

use clap::Parser;
use nearby_core::{DEFAULT_ZOOM, FALLBACK_COORDINATE};
use tempfile::tempdir;

use super::*;
use crate::settings::load;

fn cli(args: &[&str]) -> CliArgs {
	let mut argv = vec!["nearby", "--no-config"];
	argv.extend_from_slice(args);
	CliArgs::parse_from(argv)
}

#[test]
fn defaults_fill_every_setting() {
	let cli = cli(&[]);
	let mut raw = RawConfig::default();
	raw.apply_cli_overrides(&cli);
	let config = raw.resolve(&cli).unwrap();

	assert_eq!(config.zoom, DEFAULT_ZOOM);
	assert_eq!(config.fallback, FALLBACK_COORDINATE);
	assert_eq!(config.autocomplete_debounce, Duration::from_millis(300));
	assert_eq!(config.provider.timeout, Duration::from_secs(10));
	assert_eq!(config.provider.libraries, vec!["places".to_string()]);
	assert!(matches!(
		config.location,
		LocationChoice::Ip { ref endpoint } if endpoint == DEFAULT_IP_ENDPOINT
	));
	assert_eq!(config.log_level, "info");
}

#[test]
fn cli_overrides_take_precedence() {
	let cli = cli(&[
		"--api-key",
		"from-cli",
		"--zoom",
		"16",
		"--theme",
		"paper",
		"-q",
		"ramen",
		"--log-level",
		"debug",
	]);
	let mut raw = RawConfig::default();
	raw.provider.api_key = Some("from-file".into());
	raw.map.zoom = Some(10);
	raw.ui.theme = Some("slate".into());
	raw.apply_cli_overrides(&cli);

	assert_eq!(raw.provider.api_key.as_deref(), Some("from-cli"));
	assert_eq!(raw.map.zoom, Some(16));
	assert_eq!(raw.ui.theme.as_deref(), Some("paper"));
	assert_eq!(raw.ui.initial_query.as_deref(), Some("ramen"));
	assert_eq!(raw.logging.level.as_deref(), Some("debug"));
}

#[test]
fn coordinates_on_the_command_line_fix_the_location() {
	let cli = cli(&["--lat", "51.5072", "--lon", "-0.1276"]);
	let mut raw = RawConfig::default();
	raw.apply_cli_overrides(&cli);
	let config = raw.resolve(&cli).unwrap();

	let LocationChoice::Fixed(coordinate) = config.location else {
		panic!("expected a fixed location");
	};
	assert_eq!(coordinate.latitude(), 51.5072);
	assert_eq!(coordinate.longitude(), -0.1276);
}

#[test]
fn fixed_source_without_coordinates_is_rejected() {
	let cli = cli(&["--location-source", "fixed"]);
	let mut raw = RawConfig::default();
	raw.apply_cli_overrides(&cli);
	let message = raw.resolve(&cli).unwrap_err().to_string();

	assert!(message.contains("location.source"));
	assert!(message.contains("`--location-source`"));
}

#[test]
fn out_of_range_zoom_names_the_flag() {
	let cli = cli(&["--zoom", "42"]);
	let mut raw = RawConfig::default();
	raw.apply_cli_overrides(&cli);
	let message = raw.resolve(&cli).unwrap_err().to_string();

	assert!(message.contains("map.zoom"));
	assert!(message.contains("value: 42"));
	assert!(message.contains("CLI flag `--zoom`"));
}

#[test]
fn unknown_location_source_is_rejected() {
	let cli = cli(&[]);
	let mut raw = RawConfig::default();
	raw.location.source = Some("gps".into());
	let message = raw.resolve(&cli).unwrap_err().to_string();
	assert!(message.contains("configuration key `location.source`"));
}

#[test]
fn config_files_are_layered() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("nearby.toml");
	fs::write(
		&path,
		r#"
[provider]
api_key = "file-key"
timeout_secs = 4
libraries = ["places", "geometry"]

[location]
source = "none"
fallback_latitude = 48.8584
fallback_longitude = 2.2945

[map]
zoom = 12

[search]
autocomplete_debounce_ms = 150

[ui]
input_title = "Find somewhere"
"#,
	)
	.unwrap();

	let path = path.to_string_lossy().into_owned();
	let cli = cli(&["-c", &path]);
	let config = load(&cli).unwrap();

	assert_eq!(config.provider.api_key, "file-key");
	assert!(config.has_api_key());
	assert_eq!(config.provider.timeout, Duration::from_secs(4));
	assert_eq!(config.provider.libraries.len(), 2);
	assert_eq!(config.location, LocationChoice::Disabled);
	assert_eq!(config.fallback.latitude(), 48.8584);
	assert_eq!(config.zoom, 12);
	assert_eq!(config.autocomplete_debounce, Duration::from_millis(150));
	assert_eq!(config.input_title.as_deref(), Some("Find somewhere"));
}

#[test]
fn zero_timeout_in_a_file_is_rejected() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("nearby.toml");
	fs::write(&path, "[provider]\ntimeout_secs = 0\n").unwrap();

	let path = path.to_string_lossy().into_owned();
	let message = load(&cli(&["-c", &path])).unwrap_err().to_string();
	assert!(message.contains("provider.timeout_secs"));
	assert!(message.contains("must be greater than zero"));
}
