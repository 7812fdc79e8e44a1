use clap::{CommandFactory, FromArgMatches, Parser};

use super::{CliArgs, LocationSourceArg, OutputFormat};

#[test]
fn command_definition_is_consistent() {
	CliArgs::command().debug_assert();
}

#[test]
fn parse_cli_accepts_default_arguments() {
	let command = CliArgs::command();
	let mut matches = command.get_matches_from(vec!["nearby"]);
	let parsed = CliArgs::from_arg_matches_mut(&mut matches).expect("parses");
	assert_eq!(parsed.output, OutputFormat::Plain);
	assert!(parsed.config.is_empty());
	assert!(parsed.location_source.is_none());
}

#[test]
fn negative_coordinates_parse() {
	let parsed = CliArgs::try_parse_from(["nearby", "--lat", "-33.8688", "--lon", "151.2093"])
		.expect("parses");
	assert_eq!(parsed.lat, Some(-33.8688));
	assert_eq!(parsed.lon, Some(151.2093));
}

#[test]
fn latitude_needs_longitude() {
	assert!(CliArgs::try_parse_from(["nearby", "--lat", "35.0"]).is_err());
}

#[test]
fn repeated_config_flags_accumulate() {
	let parsed = CliArgs::try_parse_from([
		"nearby",
		"-c",
		"a.toml",
		"--config",
		"b.toml",
		"--location-source",
		"none",
		"-o",
		"json",
	])
	.expect("parses");
	assert_eq!(parsed.config.len(), 2);
	assert_eq!(parsed.location_source, Some(LocationSourceArg::None));
	assert_eq!(parsed.output, OutputFormat::Json);
}
