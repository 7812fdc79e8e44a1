//! Session state shared by orchestration and presentation.
//!
//! The state is owned by the UI thread. Nothing here performs I/O; the
//! orchestration functions in [`crate::search`] are the only callers that
//! replace results or move the search center.

use serde::Serialize;

use crate::geo::Coordinate;
use crate::place::{PlaceId, PlaceResult, ResultSet};

/// Everything the view needs to render one search session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
	center: Option<Coordinate>,
	query: String,
	results: ResultSet,
	selected: Option<PlaceId>,
}

impl SessionState {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Center used for the next nearby search.
	#[must_use]
	pub fn center(&self) -> Option<Coordinate> {
		self.center
	}

	pub fn set_center(&mut self, center: Coordinate) {
		self.center = Some(center);
	}

	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn set_query(&mut self, query: impl Into<String>) {
		self.query = query.into();
	}

	#[must_use]
	pub fn results(&self) -> &ResultSet {
		&self.results
	}

	/// Replace the result set wholesale. Any selection is cleared.
	pub fn replace_results(&mut self, places: Vec<PlaceResult>) {
		self.results.replace(places);
		self.selected = None;
	}

	/// Drop all results and the selection.
	pub fn clear_results(&mut self) {
		self.results.clear();
		self.selected = None;
	}

	/// The selected place, resolved against the current result set.
	#[must_use]
	pub fn selected(&self) -> Option<&PlaceResult> {
		self.selected.as_ref().and_then(|id| self.results.get(id))
	}

	#[must_use]
	pub fn selected_id(&self) -> Option<&PlaceId> {
		self.selected.as_ref()
	}

	/// Index of the selected place within the result set.
	#[must_use]
	pub fn selected_index(&self) -> Option<usize> {
		self.selected
			.as_ref()
			.and_then(|id| self.results.position(id))
	}

	/// Select a member of the result set. Ids that are not in the current set
	/// leave the selection untouched and return `None`.
	pub fn select(&mut self, id: &PlaceId) -> Option<&PlaceResult> {
		let index = self.results.position(id)?;
		self.selected = Some(id.clone());
		self.results.at(index)
	}

	pub fn clear_selection(&mut self) {
		self.selected = None;
	}

	/// Snapshot handed back to the caller when the session ends.
	#[must_use]
	pub fn outcome(&self) -> SessionOutcome {
		SessionOutcome {
			query: self.query.clone(),
			center: self.center,
			selected: self.selected().cloned(),
		}
	}
}

/// What the user was looking at when the session ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOutcome {
	pub query: String,
	pub center: Option<Coordinate>,
	pub selected: Option<PlaceResult>,
}
