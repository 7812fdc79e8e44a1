use clap::ValueEnum;

/// Where the initial map center comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LocationSourceArg {
	/// IP geolocation lookup.
	Ip,
	/// The coordinate given with `--lat`/`--lon` or in the config.
	Fixed,
	/// No lookup; start at the fallback coordinate.
	None,
}

impl LocationSourceArg {
	/// Return the string representation consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			Self::Ip => "ip",
			Self::Fixed => "fixed",
			Self::None => "none",
		}
	}
}

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
