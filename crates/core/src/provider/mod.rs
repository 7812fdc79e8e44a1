//! The places provider boundary.
//!
//! [`PlacesProvider`] is the seam between orchestration and the outside
//! world. The production implementation is [`GooglePlaces`]; tests substitute
//! their own.

mod google;
mod http;
pub mod loader;
mod types;

pub use google::{DEFAULT_BASE_URL, GooglePlaces};
pub use http::{HttpClient, ReqwestClient};
pub use loader::{PLACES_LIBRARY, ProviderSettings, ProviderStatus};
pub use types::{AutocompleteRequest, NearbyRequest, ProviderError, SearchResponse, SearchStatus};

#[cfg(test)]
pub(crate) use http::testing as http_testing;

use crate::place::PlaceResult;

/// Search capabilities offered by a places provider.
pub trait PlacesProvider: Send + Sync {
	/// Places within `request.radius_m` of `request.center` matching the keyword.
	fn nearby_search(&self, request: &NearbyRequest) -> Result<SearchResponse, ProviderError>;

	/// Place records suggested for the typed input.
	fn autocomplete(&self, request: &AutocompleteRequest) -> Result<Vec<PlaceResult>, ProviderError>;
}
