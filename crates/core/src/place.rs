//! Place records returned by the provider and the ordered result set.

use std::collections::HashSet;
use std::fmt;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geo::Coordinate;

const PLACE_PAGE_BASE: &str = "https://www.google.com/maps/search/";

/// Provider identifier of a place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for PlaceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A single place as reported by a nearby search or autocomplete response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
	pub id: PlaceId,
	pub name: String,
	/// Short neighbourhood-level address.
	pub vicinity: Option<String>,
	/// Full postal address.
	pub formatted_address: Option<String>,
	pub rating: Option<f32>,
	pub user_ratings_total: Option<u32>,
	/// `None` when the provider record carried no usable geometry.
	pub location: Option<Coordinate>,
}

impl PlaceResult {
	/// Create a place with only the required fields populated.
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: PlaceId::new(id),
			name: name.into(),
			vicinity: None,
			formatted_address: None,
			rating: None,
			user_ratings_total: None,
			location: None,
		}
	}

	#[must_use]
	pub fn with_location(mut self, location: Coordinate) -> Self {
		self.location = Some(location);
		self
	}

	#[must_use]
	pub fn with_rating(mut self, rating: f32) -> Self {
		self.rating = Some(rating);
		self
	}

	#[must_use]
	pub fn with_vicinity(mut self, vicinity: impl Into<String>) -> Self {
		self.vicinity = Some(vicinity.into());
		self
	}

	/// Address to display: the short vicinity when present, otherwise the
	/// formatted address.
	#[must_use]
	pub fn address(&self) -> Option<&str> {
		non_empty(self.vicinity.as_deref()).or_else(|| non_empty(self.formatted_address.as_deref()))
	}

	/// Rating rendered with a star, e.g. `⭐4.5`.
	#[must_use]
	pub fn rating_label(&self) -> Option<String> {
		self.rating.map(|rating| format!("⭐{rating}"))
	}

	/// Rating count rendered for the overlay, e.g. `(128 reviews)`.
	#[must_use]
	pub fn rating_count_label(&self) -> Option<String> {
		self.user_ratings_total.map(|total| match total {
			1 => "(1 review)".to_string(),
			n => format!("({n} reviews)"),
		})
	}

	/// Link to the provider's own page for this place.
	#[must_use]
	pub fn place_url(&self) -> String {
		let params = [
			("api", "1"),
			("query", self.name.as_str()),
			("query_place_id", self.id.as_str()),
		];
		match Url::parse_with_params(PLACE_PAGE_BASE, params) {
			Ok(url) => url.into(),
			Err(_) => PLACE_PAGE_BASE.to_string(),
		}
	}
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|value| !value.is_empty())
}

/// Ordered places from the most recent search.
///
/// Ids are unique within a set: when a response repeats an id, only the
/// first occurrence is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
	places: Vec<PlaceResult>,
}

impl ResultSet {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace the whole set, preserving provider order.
	pub fn replace(&mut self, places: Vec<PlaceResult>) {
		let mut seen = HashSet::with_capacity(places.len());
		let incoming = places.len();
		self.places = places
			.into_iter()
			.filter(|place| seen.insert(place.id.clone()))
			.collect();
		if self.places.len() != incoming {
			debug!(
				dropped = incoming - self.places.len(),
				"dropped places with duplicate ids"
			);
		}
	}

	pub fn clear(&mut self) {
		self.places.clear();
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.places.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.places.is_empty()
	}

	#[must_use]
	pub fn get(&self, id: &PlaceId) -> Option<&PlaceResult> {
		self.places.iter().find(|place| &place.id == id)
	}

	#[must_use]
	pub fn position(&self, id: &PlaceId) -> Option<usize> {
		self.places.iter().position(|place| &place.id == id)
	}

	#[must_use]
	pub fn at(&self, index: usize) -> Option<&PlaceResult> {
		self.places.get(index)
	}

	pub fn iter(&self) -> std::slice::Iter<'_, PlaceResult> {
		self.places.iter()
	}

	#[must_use]
	pub fn as_slice(&self) -> &[PlaceResult] {
		&self.places
	}
}

impl<'a> IntoIterator for &'a ResultSet {
	type Item = &'a PlaceResult;
	type IntoIter = std::slice::Iter<'a, PlaceResult>;

	fn into_iter(self) -> Self::IntoIter {
		self.places.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn address_prefers_vicinity() {
		let mut place = PlaceResult::new("p1", "Cafe A");
		place.formatted_address = Some("1-9-1 Marunouchi, Chiyoda City, Tokyo".into());
		assert_eq!(
			place.address(),
			Some("1-9-1 Marunouchi, Chiyoda City, Tokyo")
		);

		place.vicinity = Some("Marunouchi".into());
		assert_eq!(place.address(), Some("Marunouchi"));

		place.vicinity = Some("   ".into());
		assert_eq!(
			place.address(),
			Some("1-9-1 Marunouchi, Chiyoda City, Tokyo")
		);
	}

	#[test]
	fn rating_labels() {
		let mut place = PlaceResult::new("p1", "Cafe A").with_rating(4.5);
		assert_eq!(place.rating_label().as_deref(), Some("⭐4.5"));
		assert_eq!(place.rating_count_label(), None);

		place.user_ratings_total = Some(1);
		assert_eq!(place.rating_count_label().as_deref(), Some("(1 review)"));
		place.user_ratings_total = Some(212);
		assert_eq!(place.rating_count_label().as_deref(), Some("(212 reviews)"));
	}

	#[test]
	fn place_url_encodes_name_and_id() {
		let place = PlaceResult::new("ChIJ123", "Cafe & Bar");
		let url = place.place_url();
		assert!(url.starts_with("https://www.google.com/maps/search/?api=1"));
		assert!(url.contains("query=Cafe+%26+Bar"));
		assert!(url.contains("query_place_id=ChIJ123"));
	}

	#[test]
	fn replace_keeps_order_and_drops_duplicate_ids() {
		let mut set = ResultSet::new();
		set.replace(vec![
			PlaceResult::new("b", "Second"),
			PlaceResult::new("a", "First"),
			PlaceResult::new("b", "Duplicate"),
		]);

		let names: Vec<_> = set.iter().map(|place| place.name.as_str()).collect();
		assert_eq!(names, vec!["Second", "First"]);
		assert_eq!(set.position(&PlaceId::new("a")), Some(1));
	}
}
