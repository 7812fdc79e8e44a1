//! Google Places web service client.
//!
//! # Endpoints
//!
//! - Nearby search: `{base}/nearbysearch/json?location={lat},{lng}&radius={m}&keyword={kw}&key={KEY}`
//! - Text search (autocomplete candidates): `{base}/textsearch/json?query={input}&key={KEY}`
//!
//! Text search is used for candidates because it returns complete place
//! records, geometry included, for the confirmed input.

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use super::http::{HttpClient, redact_key};
use super::types::{
	AutocompleteRequest, NearbyRequest, ProviderError, SearchResponse, SearchStatus,
};
use super::PlacesProvider;
use crate::geo::Coordinate;
use crate::place::PlaceResult;
use crate::search::NEARBY_RADIUS_METERS;

/// Default Places web service root.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Places provider backed by the Google Places web service.
pub struct GooglePlaces<C: HttpClient> {
	http_client: C,
	api_key: String,
	base_url: String,
}

impl<C: HttpClient> GooglePlaces<C> {
	pub fn new(http_client: C, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
		Self {
			http_client,
			api_key: api_key.into(),
			base_url: base_url.into(),
		}
	}

	fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<String, ProviderError> {
		let base = format!("{}/{path}", self.base_url.trim_end_matches('/'));
		let params = params
			.iter()
			.map(|(key, value)| (*key, value.as_str()))
			.chain(std::iter::once(("key", self.api_key.as_str())));
		Url::parse_with_params(&base, params)
			.map(String::from)
			.map_err(|e| ProviderError::InvalidResponse(format!("invalid endpoint {base}: {e}")))
	}

	fn fetch(&self, url: &str) -> Result<PlacesResponse, ProviderError> {
		let body = self.http_client.get(url)?;
		let response: PlacesResponse = serde_json::from_slice(&body).map_err(|e| {
			ProviderError::InvalidResponse(format!(
				"failed to decode response from {}: {e}",
				redact_key(url)
			))
		})?;
		if let Some(message) = &response.error_message {
			warn!(status = %response.status, message, "provider reported an error");
		}
		Ok(response)
	}
}

impl<C: HttpClient> PlacesProvider for GooglePlaces<C> {
	fn nearby_search(&self, request: &NearbyRequest) -> Result<SearchResponse, ProviderError> {
		let url = self.endpoint(
			"nearbysearch/json",
			&[
				("location", request.center.to_query_value()),
				("radius", request.radius_m.to_string()),
				("keyword", request.keyword.clone()),
			],
		)?;
		let response = self.fetch(&url)?;
		let status = SearchStatus::from(response.status.as_str());
		let places = response.into_places();
		debug!(%status, count = places.len(), keyword = %request.keyword, "nearby search");
		Ok(SearchResponse { status, places })
	}

	fn autocomplete(&self, request: &AutocompleteRequest) -> Result<Vec<PlaceResult>, ProviderError> {
		let mut params = vec![("query", request.input.clone())];
		if let Some(bias) = request.bias {
			params.push(("location", bias.to_query_value()));
			params.push(("radius", NEARBY_RADIUS_METERS.to_string()));
		}
		let url = self.endpoint("textsearch/json", &params)?;
		let response = self.fetch(&url)?;
		match SearchStatus::from(response.status.as_str()) {
			SearchStatus::Ok => Ok(response.into_places()),
			SearchStatus::ZeroResults => Ok(Vec::new()),
			status => Err(ProviderError::Status(status)),
		}
	}
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
	status: String,
	#[serde(default)]
	results: Vec<RawPlace>,
	#[serde(default)]
	error_message: Option<String>,
}

impl PlacesResponse {
	fn into_places(self) -> Vec<PlaceResult> {
		self.results
			.into_iter()
			.filter_map(RawPlace::into_place)
			.collect()
	}
}

#[derive(Debug, Deserialize)]
struct RawPlace {
	place_id: Option<String>,
	name: Option<String>,
	vicinity: Option<String>,
	formatted_address: Option<String>,
	rating: Option<f32>,
	user_ratings_total: Option<u32>,
	geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
	location: Option<RawLatLng>,
}

#[derive(Debug, Deserialize)]
struct RawLatLng {
	lat: f64,
	lng: f64,
}

impl RawPlace {
	fn into_place(self) -> Option<PlaceResult> {
		let Some(id) = self.place_id.filter(|id| !id.is_empty()) else {
			warn!(name = ?self.name, "skipping place without an id");
			return None;
		};

		let location = self
			.geometry
			.and_then(|geometry| geometry.location)
			.and_then(|location| match Coordinate::new(location.lat, location.lng) {
				Ok(coordinate) => Some(coordinate),
				Err(err) => {
					warn!(%id, %err, "discarding invalid place geometry");
					None
				}
			});

		Some(PlaceResult {
			id: crate::place::PlaceId::new(id),
			name: self.name.unwrap_or_else(|| "(unnamed place)".to_string()),
			vicinity: self.vicinity,
			formatted_address: self.formatted_address,
			rating: self.rating,
			user_ratings_total: self.user_ratings_total,
			location,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::super::http::testing::FakeHttpClient;
	use super::*;

	const NEARBY_OK: &str = r#"{
		"status": "OK",
		"results": [
			{
				"place_id": "p1",
				"name": "Cafe A",
				"vicinity": "Marunouchi",
				"rating": 4.5,
				"user_ratings_total": 120,
				"geometry": { "location": { "lat": 35.6813, "lng": 139.7672 } }
			},
			{
				"place_id": "p2",
				"name": "Cafe B"
			},
			{
				"name": "No id"
			}
		]
	}"#;

	fn tokyo() -> Coordinate {
		Coordinate::new(35.681_236, 139.767_125).unwrap()
	}

	fn request() -> NearbyRequest {
		NearbyRequest {
			center: tokyo(),
			radius_m: NEARBY_RADIUS_METERS,
			keyword: "coffee shop".into(),
		}
	}

	#[test]
	fn nearby_search_builds_query_and_maps_records() {
		let client = FakeHttpClient::with_body(NEARBY_OK);
		let provider = GooglePlaces::new(client, "secret", "https://example.test/place/");

		let response = provider.nearby_search(&request()).unwrap();
		assert_eq!(response.status, SearchStatus::Ok);
		assert_eq!(response.places.len(), 2);

		let first = &response.places[0];
		assert_eq!(first.id.as_str(), "p1");
		assert_eq!(first.rating, Some(4.5));
		assert_eq!(first.user_ratings_total, Some(120));
		assert_eq!(
			first.location,
			Some(Coordinate::new(35.6813, 139.7672).unwrap())
		);
		assert!(response.places[1].location.is_none());

		let url = provider.http_client.last_request().unwrap();
		assert!(url.starts_with("https://example.test/place/nearbysearch/json?"));
		assert!(url.contains("location=35.681236%2C139.767125"));
		assert!(url.contains("radius=5000"));
		assert!(url.contains("keyword=coffee+shop"));
		assert!(url.ends_with("key=secret"));
	}

	#[test]
	fn nearby_search_passes_non_ok_status_through() {
		let client = FakeHttpClient::with_body(r#"{"status":"ZERO_RESULTS","results":[]}"#);
		let provider = GooglePlaces::new(client, "k", DEFAULT_BASE_URL);

		let response = provider.nearby_search(&request()).unwrap();
		assert_eq!(response.status, SearchStatus::ZeroResults);
		assert!(response.places.is_empty());
	}

	#[test]
	fn malformed_body_is_invalid_response() {
		let client = FakeHttpClient::with_body("<html>");
		let provider = GooglePlaces::new(client, "k", DEFAULT_BASE_URL);

		let err = provider.nearby_search(&request()).unwrap_err();
		assert!(matches!(err, ProviderError::InvalidResponse(_)));
	}

	#[test]
	fn autocomplete_biases_towards_location() {
		let client = FakeHttpClient::with_body(NEARBY_OK);
		let provider = GooglePlaces::new(client, "k", DEFAULT_BASE_URL);

		let candidates = provider
			.autocomplete(&AutocompleteRequest {
				input: "cafe".into(),
				bias: Some(tokyo()),
			})
			.unwrap();
		assert_eq!(candidates.len(), 2);

		let url = provider.http_client.last_request().unwrap();
		assert!(url.contains("/textsearch/json?query=cafe"));
		assert!(url.contains("location="));
	}

	#[test]
	fn autocomplete_statuses() {
		let client = FakeHttpClient::with_body(r#"{"status":"ZERO_RESULTS"}"#);
		client.push(Ok(br#"{"status":"REQUEST_DENIED","error_message":"bad key"}"#.to_vec()));
		let provider = GooglePlaces::new(client, "k", DEFAULT_BASE_URL);
		let request = AutocompleteRequest {
			input: "cafe".into(),
			bias: None,
		};

		assert_eq!(provider.autocomplete(&request), Ok(Vec::new()));
		assert_eq!(
			provider.autocomplete(&request),
			Err(ProviderError::Status(SearchStatus::RequestDenied))
		);
	}
}
