use std::time::Duration;

use nearby_core::DEFAULT_ZOOM;

/// Textual configuration used when rendering the prompt, panes and notices.
#[derive(Debug, Clone)]
pub struct UiLabels {
	/// Placeholder text displayed in the empty search prompt.
	pub input_placeholder: String,
	/// Title of the map pane.
	pub map_title: String,
	/// Title of the result list.
	pub list_title: String,
	/// Message shown in the list when a search produced nothing.
	pub empty_results: String,
	pub loading_map: String,
	pub map_failed: String,
	pub locating: String,
	pub map_hidden: String,
}

impl Default for UiLabels {
	fn default() -> Self {
		Self {
			input_placeholder: "Search nearby places".to_string(),
			map_title: "Map".to_string(),
			list_title: "Places".to_string(),
			empty_results: "No places found".to_string(),
			loading_map: "Loading map…".to_string(),
			map_failed: "Map failed to load".to_string(),
			locating: "Locating…".to_string(),
			map_hidden: "Map hidden (terminal too narrow)".to_string(),
		}
	}
}

impl UiLabels {
	/// Override the prompt placeholder, ignoring blank values.
	#[must_use]
	pub fn with_input_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		let placeholder = placeholder.into();
		if !placeholder.trim().is_empty() {
			self.input_placeholder = placeholder;
		}
		self
	}
}

/// Per-session knobs resolved from configuration.
#[derive(Debug, Clone)]
pub struct SessionOptions {
	/// Fixed zoom of the map surface.
	pub zoom: u8,
	/// Idle time after the last keystroke before candidates are requested.
	pub autocomplete_debounce: Duration,
	/// Text placed in the prompt on startup.
	pub initial_query: String,
}

impl Default for SessionOptions {
	fn default() -> Self {
		Self {
			zoom: DEFAULT_ZOOM,
			autocomplete_debounce: Duration::from_millis(300),
			initial_query: String::new(),
		}
	}
}
