use nearby_core::{PlaceResult, ResultSet};
use ratatui::layout::Constraint;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Cell, Row};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Column headers of the result list.
pub const PLACE_HEADERS: [&str; 3] = ["Name", "Address", "Rating"];

/// Column constraints matching [`PLACE_HEADERS`].
#[must_use]
pub fn place_widths() -> Vec<Constraint> {
	vec![
		Constraint::Fill(3),
		Constraint::Fill(4),
		Constraint::Length(6),
	]
}

/// Build one table row per result, in result order.
#[must_use]
pub fn build_place_rows<'a>(
	results: &'a ResultSet,
	rating_style: Style,
	column_widths: Option<&[u16]>,
) -> Vec<Row<'a>> {
	let width_of = |column: usize| column_widths.and_then(|widths| widths.get(column).copied());

	results
		.iter()
		.map(|place| {
			Row::new([
				Cell::from(truncate(&place.name, width_of(0))),
				Cell::from(truncate(place.address().unwrap_or(""), width_of(1))),
				rating_cell(place, rating_style),
			])
		})
		.collect()
}

fn rating_cell(place: &PlaceResult, style: Style) -> Cell<'static> {
	match place.rating_label() {
		Some(label) => Cell::from(Span::styled(label, style)),
		None => Cell::from(""),
	}
}

/// Cut `text` to `width` display columns, ending with an ellipsis when cut.
pub(crate) fn truncate(text: &str, width: Option<u16>) -> String {
	let Some(width) = width.map(usize::from) else {
		return text.to_string();
	};
	if text.width() <= width {
		return text.to_string();
	}
	if width == 0 {
		return String::new();
	}

	let mut out = String::new();
	let mut used = 0;
	for ch in text.chars() {
		let ch_width = ch.width().unwrap_or(0);
		if used + ch_width + 1 > width {
			break;
		}
		used += ch_width;
		out.push(ch);
	}
	out.push('…');
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn truncation_respects_display_width() {
		assert_eq!(truncate("Cafe A", Some(10)), "Cafe A");
		assert_eq!(truncate("Blue Bottle Coffee", Some(8)), "Blue Bo…");
		assert_eq!(truncate("東京駅前カフェ", Some(7)), "東京駅…");
		assert_eq!(truncate("anything", None), "anything");
	}

	#[test]
	fn one_row_per_result() {
		let mut results = ResultSet::new();
		results.replace(vec![
			PlaceResult::new("p1", "Cafe A").with_rating(4.5),
			PlaceResult::new("p2", "Cafe B").with_vicinity("Marunouchi"),
		]);
		assert_eq!(build_place_rows(&results, Style::new(), None).len(), 2);
	}
}
