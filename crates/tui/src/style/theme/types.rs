use ratatui::style::{Color, Style};

/// A theme containing styles for various UI elements.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
	/// Style for borders, headers and separators.
	pub header: Style,
	/// Style for the highlighted list row and dropdown entry.
	pub row_highlight: Style,
	/// Style for the prompt text.
	pub prompt: Style,
	/// Style for placeholders and empty states.
	pub empty: Style,
	/// Style for emphasised text such as ratings.
	pub highlight: Style,
	/// Style for result markers on the map.
	pub marker: Style,
	/// Style for the marker of the selected result.
	pub selected_marker: Style,
	/// Style for the current-location marker.
	pub center_marker: Style,
	/// Style for the coastline drawn beneath the markers.
	pub land: Style,
	/// Style for the alert modal.
	pub alert: Style,
}

impl Theme {
	/// Returns the style for muted text.
	#[must_use]
	pub fn empty_style(&self) -> Style {
		self.empty
	}

	/// Returns the style used for frame borders.
	#[must_use]
	pub fn border_style(&self) -> Style {
		Style::new().fg(self.header.fg.unwrap_or(Color::Reset))
	}

	/// Returns the colour used for canvas line drawing.
	#[must_use]
	pub fn land_color(&self) -> Color {
		self.land.fg.unwrap_or(Color::DarkGray)
	}
}

/// Describes a theme instance that can be selected by name.
#[derive(Debug, Clone)]
pub struct ThemeRegistration {
	/// The name of the theme.
	pub name: String,
	/// The theme configuration.
	pub theme: Theme,
	/// Alternate names for the theme.
	pub aliases: Vec<String>,
}

impl ThemeRegistration {
	/// Creates a new theme registration with the given name and theme.
	pub fn new(name: impl Into<String>, theme: Theme) -> Self {
		Self {
			name: name.into(),
			theme,
			aliases: Vec::new(),
		}
	}

	/// Adds a single alias to this theme registration.
	pub fn alias(mut self, alias: impl Into<String>) -> Self {
		self.aliases.push(alias.into());
		self
	}

	/// Whether `name` refers to this theme, ignoring ASCII case.
	#[must_use]
	pub fn answers_to(&self, name: &str) -> bool {
		let name = name.trim();
		self.name.eq_ignore_ascii_case(name)
			|| self
				.aliases
				.iter()
				.any(|alias| alias.eq_ignore_ascii_case(name))
	}
}
