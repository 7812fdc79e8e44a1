//! Core state container for the terminal application's front-end.
//!
//! The `app` module exposes the [`App`] struct which bundles together the
//! search session, the background channels, and UI-specific caches.

use std::sync::mpsc::Receiver;

use nearby_core::{
	ProviderStatus, SearchAlert, SearchRuntime, SessionEvent, SessionOutcome, SessionState,
};
use throbber_widgets_tui::ThrobberState;

use super::candidates::CandidatesState;
use super::map::MapPane;
use super::results::ResultsState;
use crate::config::{SessionOptions, UiLabels};
use crate::input::QueryInput;
use crate::style::{StyleConfig, Theme};

/// Aggregate state shared across the terminal UI.
///
/// Everything here is owned by the event loop thread. Background work
/// (location lookup, provider bootstrap, searches) reports back through
/// channels that the loop drains once per tick.
pub struct App<'a> {
	/// Query, center, results and selection.
	pub session: SessionState,
	/// Text input widget for the search query.
	pub search_input: QueryInput<'a>,
	pub(crate) ui: UiLabels,
	/// Current style and theme configuration.
	pub style: StyleConfig,
	pub(crate) options: SessionOptions,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) events: Receiver<SessionEvent>,
	pub(crate) provider: ProviderStatus,
	/// Present once the provider is ready.
	pub(crate) search: Option<SearchRuntime>,
	pub(crate) map: MapPane,
	pub(crate) results: ResultsState,
	pub(crate) candidates: CandidatesState,
	pub(crate) alert: Option<SearchAlert>,
	/// Transient status message, cleared by the next key press.
	pub(crate) notice: Option<String>,
}

impl<'a> App<'a> {
	/// Construct an [`App`] fed by the startup tasks reporting on `events`.
	pub fn new(options: SessionOptions, events: Receiver<SessionEvent>) -> Self {
		let mut session = SessionState::new();
		session.set_query(options.initial_query.clone());

		Self {
			session,
			search_input: QueryInput::new(options.initial_query.clone()),
			ui: UiLabels::default(),
			style: StyleConfig::default(),
			options,
			throbber_state: ThrobberState::default(),
			events,
			provider: ProviderStatus::Loading,
			search: None,
			map: MapPane::default(),
			results: ResultsState::default(),
			candidates: CandidatesState::default(),
			alert: None,
			notice: None,
		}
	}

	/// Replace the UI labels.
	#[must_use]
	pub fn with_labels(mut self, labels: UiLabels) -> Self {
		self.ui = labels;
		self
	}

	/// Apply a new theme.
	pub fn set_theme(&mut self, theme: Theme) {
		self.style.theme = theme;
		self.search_input.set_style(theme.prompt);
	}

	/// Provider bootstrap state.
	#[must_use]
	pub fn provider_status(&self) -> &ProviderStatus {
		&self.provider
	}

	/// What the session looks like right now, as returned on exit.
	#[must_use]
	pub fn outcome(&self) -> SessionOutcome {
		self.session.outcome()
	}

	/// Status label and whether anything is still pending.
	pub(crate) fn progress_status(&self) -> (String, bool) {
		match &self.provider {
			ProviderStatus::Failed(_) => return ("Provider unavailable".to_string(), true),
			ProviderStatus::Loading => return ("Loading map".to_string(), false),
			ProviderStatus::Ready => {}
		}
		if self.session.center().is_none() {
			return ("Locating".to_string(), false);
		}
		if self.search.as_ref().is_some_and(SearchRuntime::is_in_flight) {
			return ("Searching".to_string(), false);
		}
		if let Some(notice) = &self.notice {
			return (notice.clone(), true);
		}
		match self.session.results().len() {
			0 => (String::new(), true),
			1 => ("1 place".to_string(), true),
			n => (format!("{n} places"), true),
		}
	}
}
