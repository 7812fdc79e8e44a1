//! One-shot provider bootstrap.
//!
//! Building the client is the terminal equivalent of loading a mapping SDK:
//! it happens once, in the background, and every map interaction is gated on
//! its outcome.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{error, info};

use super::google::{DEFAULT_BASE_URL, GooglePlaces};
use super::http::ReqwestClient;
use super::types::ProviderError;
use super::PlacesProvider;
use crate::events::SessionEvent;

/// Library flag that enables place search.
pub const PLACES_LIBRARY: &str = "places";

/// Inputs for bootstrapping the places provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
	pub api_key: String,
	pub base_url: String,
	/// Enabled provider libraries; must include [`PLACES_LIBRARY`].
	pub libraries: Vec<String>,
	pub timeout: Duration,
}

impl ProviderSettings {
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			..Self::default()
		}
	}
}

impl Default for ProviderSettings {
	fn default() -> Self {
		Self {
			api_key: String::new(),
			base_url: DEFAULT_BASE_URL.to_string(),
			libraries: vec![PLACES_LIBRARY.to_string()],
			timeout: Duration::from_secs(10),
		}
	}
}

/// Bootstrap state as observed by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProviderStatus {
	#[default]
	Loading,
	Ready,
	Failed(String),
}

impl ProviderStatus {
	#[must_use]
	pub fn is_ready(&self) -> bool {
		matches!(self, Self::Ready)
	}
}

/// Build the places provider from its settings.
pub fn load(settings: &ProviderSettings) -> Result<Arc<dyn PlacesProvider>, ProviderError> {
	if settings.api_key.trim().is_empty() {
		return Err(ProviderError::MissingApiKey);
	}
	if !settings
		.libraries
		.iter()
		.any(|library| library == PLACES_LIBRARY)
	{
		return Err(ProviderError::MissingLibrary(PLACES_LIBRARY.to_string()));
	}

	let client = ReqwestClient::with_timeout(settings.timeout)?;
	Ok(Arc::new(GooglePlaces::new(
		client,
		settings.api_key.clone(),
		settings.base_url.clone(),
	)))
}

/// Load the provider on a background thread and report the outcome once.
pub fn spawn_load(settings: ProviderSettings, tx: Sender<SessionEvent>) -> JoinHandle<()> {
	thread::spawn(move || {
		let outcome = load(&settings);
		match &outcome {
			Ok(_) => info!(base_url = %settings.base_url, "places provider ready"),
			Err(err) => error!(%err, "places provider failed to load"),
		}
		let _ = tx.send(SessionEvent::ProviderLoaded(outcome));
	})
}
