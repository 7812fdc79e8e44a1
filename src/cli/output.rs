use anyhow::Result;
use nearby_core::{PlaceResult, SessionOutcome};
use serde_json::json;

/// Print a plain-text representation of the session outcome.
pub(crate) fn print_plain(outcome: &SessionOutcome) {
	match &outcome.selected {
		Some(place) => println!("{}", format_place_plain(place)),
		None => println!("No place selected (query: '{}')", outcome.query),
	}
}

fn format_place_plain(place: &PlaceResult) -> String {
	let mut lines = vec![place.name.clone()];
	if let Some(address) = place.address() {
		lines.push(address.to_string());
	}
	if let Some(rating) = place.rating_label() {
		match place.rating_count_label() {
			Some(count) => lines.push(format!("{rating} {count}")),
			None => lines.push(rating),
		}
	}
	lines.push(place.place_url());
	lines.join("\n")
}

/// Format the session outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &SessionOutcome) -> Result<String> {
	let selected = match &outcome.selected {
		Some(place) => json!({
			"id": place.id.as_str(),
			"name": place.name,
			"address": place.address(),
			"rating": place.rating,
			"user_ratings_total": place.user_ratings_total,
			"location": place.location,
			"url": place.place_url(),
		}),
		None => serde_json::Value::Null,
	};

	let payload = json!({
		"query": outcome.query,
		"center": outcome.center,
		"selected": selected,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the session outcome.
pub(crate) fn print_json(outcome: &SessionOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}
