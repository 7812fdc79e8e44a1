use std::fmt::Write;

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};

use crate::app_dirs;

/// Version banner listing where `nearby` reads config and writes its log.
pub(super) fn long_version() -> &'static str {
	let config_dir = describe_dir(app_dirs::get_config_dir());
	let data_dir = describe_dir(app_dirs::get_data_dir());

	let mut details = format!("nearby {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(
		details,
		"config directory: {config_dir} (override with {})",
		app_dirs::CONFIG_DIR_ENV
	);
	let _ = writeln!(
		details,
		"data directory: {data_dir} (override with {})",
		app_dirs::DATA_DIR_ENV
	);
	let _ = writeln!(details, "log filter: RUST_LOG, then logging.level");

	Box::leak(details.into_boxed_str())
}

fn describe_dir(dir: anyhow::Result<std::path::PathBuf>) -> String {
	dir.map_or_else(
		|err| format!("unavailable ({err})"),
		|path| path.display().to_string(),
	)
}

/// Create the clap styles used for custom colour output.
pub(super) fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}
