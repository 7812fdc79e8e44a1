use std::sync::mpsc;

use anyhow::Result;
use nearby_core::location::{FixedLocation, IpLocation, LocationSource, Unsupported};
use nearby_core::provider::ReqwestClient;
use nearby_core::provider::loader::spawn_load;
use nearby_core::{SessionEvent, SessionOutcome, location};
use nearby_tui::{App, SessionOptions, UiLabels};
use tracing::{info, warn};

use crate::settings::{LocationChoice, ResolvedConfig};

/// Coordinates building and running the interactive session.
pub(crate) struct SearchWorkflow {
	config: ResolvedConfig,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		Ok(Self { config })
	}

	pub(crate) fn run(self) -> Result<SessionOutcome> {
		let config = self.config;
		if !config.has_api_key() {
			warn!("no API key configured");
			nearby_tui::show_missing_config("No API key configured", &missing_key_details())?;
			return Ok(SessionOutcome {
				query: config.initial_query,
				center: None,
				selected: None,
			});
		}

		let (tx, rx) = mpsc::channel();
		info!(libraries = ?config.provider.libraries, "loading places provider");
		spawn_load(config.provider.clone(), tx.clone());

		let source = location_source(&config)?;
		info!(source = source.name(), "acquiring location");
		location::spawn_acquisition(source, config.fallback, tx);

		let app = SessionFactory::build(config, rx);
		nearby_tui::run(app)
	}
}

fn missing_key_details() -> Vec<String> {
	vec![
		"Set provider.api_key in config.toml,".to_string(),
		"export NEARBY_API_KEY, or pass --api-key.".to_string(),
		"Press any key to exit".to_string(),
	]
}

fn location_source(config: &ResolvedConfig) -> Result<Box<dyn LocationSource>> {
	Ok(match &config.location {
		LocationChoice::Ip { endpoint } => {
			let client = ReqwestClient::with_timeout(config.provider.timeout)?;
			Box::new(IpLocation::new(client, endpoint.clone()))
		}
		LocationChoice::Fixed(coordinate) => Box::new(FixedLocation(*coordinate)),
		LocationChoice::Disabled => Box::new(Unsupported),
	})
}

/// Helper for translating resolved configuration into a configured [`App`].
struct SessionFactory<'a> {
	app: App<'a>,
}

impl<'a> SessionFactory<'a> {
	fn build(config: ResolvedConfig, events: mpsc::Receiver<SessionEvent>) -> App<'a> {
		let ResolvedConfig {
			zoom,
			autocomplete_debounce,
			initial_query,
			input_title,
			theme,
			..
		} = config;

		let options = SessionOptions {
			zoom,
			autocomplete_debounce,
			initial_query,
		};
		Self {
			app: App::new(options, events),
		}
		.with_input_title(input_title)
		.with_theme(theme)
		.finish()
	}

	fn with_input_title(mut self, title: Option<String>) -> Self {
		if let Some(title) = title {
			self.app = self
				.app
				.with_labels(UiLabels::default().with_input_placeholder(title));
		}
		self
	}

	fn with_theme(mut self, theme: Option<String>) -> Self {
		if let Some(name) = theme {
			match nearby_tui::by_name(&name) {
				Some(theme) => self.app.set_theme(theme),
				None => warn!(theme = %name, "unknown theme, keeping the default"),
			}
		}
		self
	}

	fn finish(self) -> App<'a> {
		self.app
	}
}
