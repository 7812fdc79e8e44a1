//! Search orchestration: turning user actions into provider requests and
//! folding responses back into the session.

mod orchestration;
pub mod runtime;

use std::fmt;

pub use orchestration::{
	apply_autocomplete_pick, apply_search_response, autocomplete_request, close_overlay,
	keyword_search, select_place,
};
pub use runtime::{Drained, SearchCommand, SearchResult, SearchRuntime};

use crate::geo::Coordinate;
use crate::place::PlaceResult;
use crate::provider::{ProviderError, SearchResponse, SearchStatus};

/// Radius of every nearby search, in meters.
pub const NEARBY_RADIUS_METERS: u32 = 5_000;

/// Why a nearby search produced no usable results.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchFailure {
	/// The provider answered with a non-OK status.
	Status(SearchStatus),
	/// The request never produced a provider status.
	Provider(ProviderError),
}

impl fmt::Display for SearchFailure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Status(status) => write!(f, "{status}"),
			Self::Provider(err) => write!(f, "{err}"),
		}
	}
}

/// Result of a nearby search after status interpretation.
pub type SearchOutcome = Result<Vec<PlaceResult>, SearchFailure>;

/// Interpret a raw provider response.
pub fn outcome_from_response(response: Result<SearchResponse, ProviderError>) -> SearchOutcome {
	match response {
		Ok(SearchResponse {
			status: SearchStatus::Ok,
			places,
		}) => Ok(places),
		Ok(SearchResponse { status, .. }) | Err(ProviderError::Status(status)) => {
			Err(SearchFailure::Status(status))
		}
		Err(err) => Err(SearchFailure::Provider(err)),
	}
}

/// A blocking, user-visible notice about a failed search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchAlert {
	pub failure: SearchFailure,
}

impl SearchAlert {
	#[must_use]
	pub fn message(&self) -> String {
		format!("Search failed: {}", self.failure)
	}
}

/// What an autocomplete pick did to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickOutcome {
	/// No candidate was supplied.
	Empty,
	/// The first candidate had no location; nothing changed.
	MissingGeometry,
	/// The candidate became the new center, result set and selection.
	Picked(Coordinate),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn non_ok_statuses_become_failures() {
		let outcome = outcome_from_response(Ok(SearchResponse::with_status(
			SearchStatus::ZeroResults,
		)));
		assert_eq!(
			outcome,
			Err(SearchFailure::Status(SearchStatus::ZeroResults))
		);

		let outcome = outcome_from_response(Err(ProviderError::Http("offline".into())));
		assert!(matches!(outcome, Err(SearchFailure::Provider(_))));
	}

	#[test]
	fn alert_names_the_status() {
		let alert = SearchAlert {
			failure: SearchFailure::Status(SearchStatus::ZeroResults),
		};
		assert_eq!(alert.message(), "Search failed: ZERO_RESULTS");
	}
}
