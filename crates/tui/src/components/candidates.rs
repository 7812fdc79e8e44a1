use nearby_core::PlaceResult;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::symbols::border;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};

use crate::style::Theme;

/// Most candidates shown at once.
pub const MAX_VISIBLE: u16 = 8;
const MAX_WIDTH: u16 = 64;

/// Argument bundle for rendering the autocomplete dropdown.
pub struct CandidatesContext<'a> {
	pub candidates: &'a [PlaceResult],
	/// Area directly below the prompt the dropdown may cover.
	pub bounds: Rect,
	pub theme: &'a Theme,
}

/// Draw the dropdown and return the area it covers.
pub fn render_candidates(
	frame: &mut Frame,
	ctx: CandidatesContext<'_>,
	list_state: &mut ListState,
) -> Option<Rect> {
	let CandidatesContext {
		candidates,
		bounds,
		theme,
	} = ctx;
	if candidates.is_empty() || bounds.width < 4 || bounds.height < 3 {
		return None;
	}

	let rows = (candidates.len() as u16).min(MAX_VISIBLE);
	let area = Rect {
		width: bounds.width.min(MAX_WIDTH),
		height: (rows + 2).min(bounds.height),
		..bounds
	};

	let items: Vec<ListItem> = candidates
		.iter()
		.map(|candidate| {
			let mut spans = vec![Span::raw(candidate.name.as_str())];
			if let Some(address) = candidate.address() {
				spans.push(Span::raw("  "));
				spans.push(Span::styled(address, theme.empty_style()));
			}
			ListItem::new(Line::from(spans))
		})
		.collect();

	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(border::ROUNDED)
		.border_style(theme.border_style());
	let list = List::new(items)
		.block(block)
		.highlight_style(theme.row_highlight)
		.highlight_symbol("› ");

	frame.render_widget(Clear, area);
	frame.render_stateful_widget(list, area, list_state);
	Some(area)
}

/// Index of the candidate row under `row`, given the dropdown's area and
/// scroll offset.
#[must_use]
pub fn candidate_at(area: Rect, offset: usize, len: usize, row: u16) -> Option<usize> {
	let first = area.y + 1;
	let last = area.bottom().saturating_sub(1);
	if row < first || row >= last {
		return None;
	}
	let index = offset + usize::from(row - first);
	(index < len).then_some(index)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rows_map_to_candidates_inside_borders() {
		let area = Rect::new(2, 1, 30, 5);
		assert_eq!(candidate_at(area, 0, 3, 1), None);
		assert_eq!(candidate_at(area, 0, 3, 2), Some(0));
		assert_eq!(candidate_at(area, 0, 3, 4), Some(2));
		assert_eq!(candidate_at(area, 0, 3, 5), None);
		assert_eq!(candidate_at(area, 1, 3, 4), None);
	}
}
