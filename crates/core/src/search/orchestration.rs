//! State transitions triggered by searches, picks and selections.
//!
//! The map is passed in explicitly: `None` means the surface is not mounted.

use tracing::{debug, error, info, warn};

use super::{NEARBY_RADIUS_METERS, PickOutcome, SearchAlert, SearchOutcome};
use crate::map::MapHandle;
use crate::place::{PlaceId, PlaceResult};
use crate::provider::{AutocompleteRequest, NearbyRequest};
use crate::session::SessionState;

/// Build the nearby request for the current query.
///
/// Returns `None`, changing nothing, when the query is blank, the center is
/// unknown, the map is not mounted, or the provider is not ready.
#[must_use]
pub fn keyword_search(
	session: &SessionState,
	map: Option<&MapHandle>,
	provider_ready: bool,
) -> Option<NearbyRequest> {
	let keyword = session.query().trim();
	if keyword.is_empty() || map.is_none() || !provider_ready {
		return None;
	}
	let center = session.center()?;

	Some(NearbyRequest {
		center,
		radius_m: NEARBY_RADIUS_METERS,
		keyword: keyword.to_string(),
	})
}

/// Build the candidate lookup for the current query, biased towards the
/// session center.
#[must_use]
pub fn autocomplete_request(session: &SessionState) -> Option<AutocompleteRequest> {
	let input = session.query().trim();
	if input.is_empty() {
		return None;
	}
	Some(AutocompleteRequest {
		input: input.to_string(),
		bias: session.center(),
	})
}

/// Fold a nearby search outcome into the session.
///
/// Success replaces the result set in provider order and pans the map to
/// the first located result. Failure clears the result set and returns an
/// alert naming the failure.
pub fn apply_search_response(
	session: &mut SessionState,
	map: Option<&mut MapHandle>,
	outcome: SearchOutcome,
) -> Option<SearchAlert> {
	match outcome {
		Ok(places) => {
			let first_location = places.iter().find_map(|place| place.location);
			info!(count = places.len(), "nearby search succeeded");
			session.replace_results(places);
			if let (Some(map), Some(location)) = (map, first_location) {
				map.pan_to(location);
			}
			None
		}
		Err(failure) => {
			warn!(%failure, "nearby search failed");
			session.clear_results();
			Some(SearchAlert { failure })
		}
	}
}

/// Apply the first of the picked autocomplete candidates.
///
/// A located candidate becomes the new search center, so the next keyword
/// search is centered on the last place the user interacted with. It also
/// becomes the only result and the selection.
pub fn apply_autocomplete_pick(
	session: &mut SessionState,
	map: Option<&mut MapHandle>,
	candidates: &[PlaceResult],
) -> PickOutcome {
	let Some(candidate) = candidates.first() else {
		return PickOutcome::Empty;
	};
	let Some(location) = candidate.location else {
		error!(id = %candidate.id, name = %candidate.name, "picked place has no geometry");
		return PickOutcome::MissingGeometry;
	};

	if let Some(map) = map {
		map.pan_to(location);
	}
	session.set_center(location);
	session.replace_results(vec![candidate.clone()]);
	session.select(&candidate.id);
	debug!(id = %candidate.id, %location, "autocomplete pick");
	PickOutcome::Picked(location)
}

/// Select a result and pan the map to it.
///
/// List rows and map markers both go through here. Returns `false` when the
/// id is not part of the current result set.
pub fn select_place(session: &mut SessionState, map: Option<&mut MapHandle>, id: &PlaceId) -> bool {
	let Some(place) = session.select(id) else {
		return false;
	};
	if let (Some(map), Some(location)) = (map, place.location) {
		map.pan_to(location);
	}
	true
}

/// Dismiss the overlay. Results stay as they are.
pub fn close_overlay(session: &mut SessionState) {
	session.clear_selection();
}
