use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::{LocationSourceArg, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `nearby` binary.
#[derive(Parser, Debug)]
#[command(
	name = "nearby",
	version,
	long_version = long_version(),
	about = "Search for places around you on a terminal map",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "NEARBY_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files"
	)]
	pub(crate) no_config: bool,
	#[arg(
		long = "api-key",
		value_name = "KEY",
		env = "NEARBY_API_KEY",
		hide_env_values = true,
		help = "API key for the places provider"
	)]
	pub(crate) api_key: Option<String>,
	#[arg(
		short = 'q',
		long = "query",
		value_name = "QUERY",
		help = "Prefill the search prompt"
	)]
	pub(crate) initial_query: Option<String>,
	#[arg(
		long,
		value_name = "DEG",
		allow_negative_numbers = true,
		requires = "lon",
		help = "Start at this latitude instead of looking the location up"
	)]
	pub(crate) lat: Option<f64>,
	#[arg(
		long,
		value_name = "DEG",
		allow_negative_numbers = true,
		requires = "lat",
		help = "Start at this longitude instead of looking the location up"
	)]
	pub(crate) lon: Option<f64>,
	#[arg(
		long = "location-source",
		value_enum,
		help = "How to find the initial map center (default: ip)"
	)]
	pub(crate) location_source: Option<LocationSourceArg>,
	#[arg(
		short = 'z',
		long,
		value_name = "LEVEL",
		help = "Initial map zoom, 1 to 20 (default: 14)"
	)]
	pub(crate) zoom: Option<u8>,
	#[arg(long, value_name = "THEME", help = "Select a theme by name")]
	pub(crate) theme: Option<String>,
	#[arg(
		long = "log-level",
		value_name = "LEVEL",
		help = "Log filter used when RUST_LOG is unset (default: info)"
	)]
	pub(crate) log_level: Option<String>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List supported themes and exit"
	)]
	pub(crate) list_themes: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print the selected place"
	)]
	pub(crate) output: OutputFormat,
}
