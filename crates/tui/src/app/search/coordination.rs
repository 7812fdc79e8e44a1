use std::sync::Arc;
use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use nearby_core::search::{
	SearchResult, apply_autocomplete_pick, apply_search_response, autocomplete_request,
	keyword_search,
};
use nearby_core::{
	LocationFix, PickOutcome, PlacesProvider, ProviderError, ProviderStatus, SearchFailure,
	SearchRuntime, SessionEvent,
};
use tracing::{debug, info, warn};

use crate::App;
use crate::input::QueryInput;

impl App<'_> {
	/// Apply every startup event that has arrived since the last tick.
	pub(crate) fn pump_session_events(&mut self) {
		loop {
			match self.events.try_recv() {
				Ok(SessionEvent::Located(fix)) => self.apply_location(fix),
				Ok(SessionEvent::ProviderLoaded(outcome)) => self.apply_provider(outcome),
				Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
			}
		}
	}

	fn apply_location(&mut self, fix: LocationFix) {
		// A pick made before the lookup finished keeps its center.
		if self.session.center().is_some() {
			debug!(coordinate = %fix.coordinate, "ignoring late location fix");
			return;
		}
		self.session.set_center(fix.coordinate);
		if let Some(handle) = self.map.mount.handle_mut()
			&& handle.center().is_none()
		{
			handle.pan_to(fix.coordinate);
		}
	}

	fn apply_provider(&mut self, outcome: Result<Arc<dyn PlacesProvider>, ProviderError>) {
		match outcome {
			Ok(provider) => {
				self.provider = ProviderStatus::Ready;
				self.search = Some(SearchRuntime::spawn(provider));
			}
			Err(err) => {
				self.provider = ProviderStatus::Failed(err.to_string());
				self.search = None;
				self.map.mount.unmount();
				self.candidates.close();
			}
		}
	}

	/// Run a keyword search for the current prompt text.
	///
	/// Does nothing unless the query is non-blank, the center is known, the
	/// map is mounted and the provider is ready.
	pub(crate) fn request_search(&mut self) {
		self.session.set_query(self.search_input.text());
		let Some(request) = keyword_search(
			&self.session,
			self.map.mount.handle(),
			self.provider.is_ready(),
		) else {
			debug!(query = self.session.query(), "keyword search skipped");
			return;
		};
		let Some(runtime) = self.search.as_mut() else {
			return;
		};

		self.candidates.close();
		if let Err(err) = runtime.issue_nearby(request) {
			self.fail_search(err);
		}
	}

	/// Fold a search that never reached the provider into the session.
	fn fail_search(&mut self, err: ProviderError) {
		warn!(%err, "nearby search lost");
		let alert = apply_search_response(
			&mut self.session,
			self.map.mount.handle_mut(),
			Err(SearchFailure::Provider(err)),
		);
		self.results.reset_scroll();
		self.results.searched = true;
		self.alert = alert;
	}

	/// Apply responses that answer the latest requests; older ones are
	/// dropped by the runtime.
	pub(crate) fn pump_search_results(&mut self) {
		let Some(runtime) = self.search.as_mut() else {
			return;
		};

		let drained = runtime.drain();
		if drained.lost_candidates {
			self.candidates.receive(Err(ProviderError::WorkerStopped));
		}
		if drained.lost_nearby {
			self.fail_search(ProviderError::WorkerStopped);
		}

		for result in drained.results {
			match result {
				SearchResult::Nearby { outcome, .. } => {
					let alert =
						apply_search_response(&mut self.session, self.map.mount.handle_mut(), outcome);
					self.results.reset_scroll();
					self.results.searched = true;
					if alert.is_some() {
						self.alert = alert;
					}
				}
				SearchResult::Candidates { candidates, .. } => self.candidates.receive(candidates),
			}
		}
	}

	/// Note a prompt edit so candidates are fetched once typing pauses.
	pub(crate) fn query_edited(&mut self, now: Instant) {
		self.session.set_query(self.search_input.text());
		self.candidates.schedule(now);
	}

	/// Issue the candidate lookup once the debounce interval has passed.
	pub(crate) fn pump_autocomplete(&mut self, now: Instant) {
		if !self
			.candidates
			.due(now, self.options.autocomplete_debounce)
		{
			return;
		}
		self.candidates.pending_since = None;

		let Some(request) = autocomplete_request(&self.session) else {
			return;
		};
		let Some(runtime) = self.search.as_mut() else {
			return;
		};
		match runtime.issue_autocomplete(request) {
			Ok(_) => self.candidates.awaiting = true,
			Err(err) => warn!(%err, "autocomplete lookup lost"),
		}
	}

	/// Pick the candidate at `index` from the dropdown.
	pub(crate) fn pick_candidate(&mut self, index: usize) {
		let candidates = self.candidates.take_with_first(index);
		let outcome =
			apply_autocomplete_pick(&mut self.session, self.map.mount.handle_mut(), &candidates);
		if let PickOutcome::Picked(location) = outcome
			&& let Some(place) = candidates.first()
		{
			info!(name = %place.name, %location, "picked place");
			self.search_input = QueryInput::new(place.name.clone());
			self.search_input.set_style(self.style.theme.prompt);
			self.session.set_query(place.name.clone());
			self.results.reset_scroll();
			self.results.sync_selection(self.session.selected_index());
		}
	}
}
