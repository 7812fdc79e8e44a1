//! Request, response and error types at the provider boundary.

use std::fmt;

use thiserror::Error;

use crate::geo::Coordinate;
use crate::place::PlaceResult;

/// Errors raised while talking to the places provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
	#[error("HTTP error: {0}")]
	Http(String),
	#[error("invalid provider response: {0}")]
	InvalidResponse(String),
	#[error("provider returned status {0}")]
	Status(SearchStatus),
	#[error("no API key configured for the places provider")]
	MissingApiKey,
	#[error("provider library `{0}` is not enabled")]
	MissingLibrary(String),
	#[error("provider panicked: {0}")]
	Panicked(String),
	#[error("search worker stopped")]
	WorkerStopped,
}

/// Status string attached to every provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
	Ok,
	ZeroResults,
	OverQueryLimit,
	RequestDenied,
	InvalidRequest,
	UnknownError,
	NotFound,
	/// A status this client does not know about, kept verbatim.
	Other(String),
}

impl SearchStatus {
	#[must_use]
	pub fn is_ok(&self) -> bool {
		matches!(self, Self::Ok)
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			Self::Ok => "OK",
			Self::ZeroResults => "ZERO_RESULTS",
			Self::OverQueryLimit => "OVER_QUERY_LIMIT",
			Self::RequestDenied => "REQUEST_DENIED",
			Self::InvalidRequest => "INVALID_REQUEST",
			Self::UnknownError => "UNKNOWN_ERROR",
			Self::NotFound => "NOT_FOUND",
			Self::Other(status) => status,
		}
	}
}

impl From<&str> for SearchStatus {
	fn from(value: &str) -> Self {
		match value {
			"OK" => Self::Ok,
			"ZERO_RESULTS" => Self::ZeroResults,
			"OVER_QUERY_LIMIT" => Self::OverQueryLimit,
			"REQUEST_DENIED" => Self::RequestDenied,
			"INVALID_REQUEST" => Self::InvalidRequest,
			"UNKNOWN_ERROR" => Self::UnknownError,
			"NOT_FOUND" => Self::NotFound,
			other => Self::Other(other.to_string()),
		}
	}
}

impl fmt::Display for SearchStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Parameters of a nearby search.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyRequest {
	pub center: Coordinate,
	pub radius_m: u32,
	pub keyword: String,
}

/// Parameters of an autocomplete lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct AutocompleteRequest {
	pub input: String,
	/// Location used to bias candidates towards the current area.
	pub bias: Option<Coordinate>,
}

/// Raw outcome of a nearby search as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
	pub status: SearchStatus,
	pub places: Vec<PlaceResult>,
}

impl SearchResponse {
	#[must_use]
	pub fn ok(places: Vec<PlaceResult>) -> Self {
		Self {
			status: SearchStatus::Ok,
			places,
		}
	}

	#[must_use]
	pub fn with_status(status: SearchStatus) -> Self {
		Self {
			status,
			places: Vec::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_round_trips_known_and_unknown_values() {
		for raw in [
			"OK",
			"ZERO_RESULTS",
			"OVER_QUERY_LIMIT",
			"REQUEST_DENIED",
			"INVALID_REQUEST",
			"UNKNOWN_ERROR",
			"NOT_FOUND",
			"SOMETHING_NEW",
		] {
			assert_eq!(SearchStatus::from(raw).to_string(), raw);
		}
		assert!(SearchStatus::from("OK").is_ok());
		assert_eq!(
			SearchStatus::from("SOMETHING_NEW"),
			SearchStatus::Other("SOMETHING_NEW".into())
		);
	}
}
