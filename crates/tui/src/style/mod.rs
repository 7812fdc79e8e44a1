//! Visual styling utilities.
//!
//! Themes are the color schemes applied to the terminal UI. They ship as TOML
//! documents embedded in the binary and are looked up by name or alias.

/// Theme definitions, built-in themes, and lookup helpers.
pub mod theme;

pub use theme::{Theme, ThemeRegistration, builtin_themes, by_name, default_theme, names};

/// Aggregate container for styling knobs.
#[derive(Clone, Debug, Default)]
pub struct StyleConfig {
	/// The active theme for the UI.
	pub theme: Theme,
}

impl StyleConfig {
	/// Creates a new style configuration with the given theme.
	#[must_use]
	pub fn with_theme(theme: Theme) -> Self {
		Self { theme }
	}
}
