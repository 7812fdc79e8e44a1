use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::HighlightSpacing;
use unicode_width::UnicodeWidthStr;

use super::super::map::MIN_WIDTH_FOR_MAP;
use crate::components::tables::{HIGHLIGHT_SYMBOL, TABLE_COLUMN_SPACING, TABLE_HIGHLIGHT_SPACING};

/// Share of the body width given to the map.
const MAP_PERCENT: u16 = 60;

/// Areas of one frame below the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyLayout {
	/// Map on the left, result list on the right.
	Split { map: Rect, list: Rect },
	/// Narrow terminal: the list plus a one-line hint where the map would be.
	ListOnly { list: Rect, hint: Rect },
}

impl BodyLayout {
	pub(crate) fn for_area(body: Rect, terminal_width: u16) -> Self {
		if terminal_width < MIN_WIDTH_FOR_MAP {
			let [list, hint] =
				Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(body);
			return Self::ListOnly { list, hint };
		}

		let split = Layout::default()
			.direction(Direction::Horizontal)
			.constraints([
				Constraint::Percentage(MAP_PERCENT),
				Constraint::Percentage(100 - MAP_PERCENT),
			])
			.split(body);
		Self::Split {
			map: split[0],
			list: split[1],
		}
	}

	pub(crate) fn list(&self) -> Rect {
		match *self {
			Self::Split { list, .. } | Self::ListOnly { list, .. } => list,
		}
	}
}

/// Display width of each column inside a bordered table drawn in `area`.
pub(crate) fn resolve_column_widths(
	area: Rect,
	widths: &[Constraint],
	has_selection: bool,
) -> Vec<u16> {
	if widths.is_empty() || area.width == 0 {
		return Vec::new();
	}

	let table_width = area.width.saturating_sub(2);
	if table_width == 0 {
		return Vec::new();
	}

	let highlight_width = match TABLE_HIGHLIGHT_SPACING {
		HighlightSpacing::Always => HIGHLIGHT_SYMBOL.width() as u16,
		HighlightSpacing::WhenSelected if has_selection => HIGHLIGHT_SYMBOL.width() as u16,
		HighlightSpacing::WhenSelected | HighlightSpacing::Never => 0,
	};

	let [_selection, columns_area] =
		Layout::horizontal([Constraint::Length(highlight_width), Constraint::Fill(0)])
			.areas(Rect::new(0, 0, table_width, 1));

	Layout::horizontal(widths.to_vec())
		.spacing(TABLE_COLUMN_SPACING)
		.split(columns_area)
		.iter()
		.map(|rect| rect.width)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::rows::{place_widths, truncate};

	#[test]
	fn column_widths_use_table_inner_area() {
		let area = Rect::new(0, 0, 10, 5);
		let widths = [Constraint::Length(20)];
		let resolved = resolve_column_widths(area, &widths, false);

		let inner = area.width - 2 - HIGHLIGHT_SYMBOL.width() as u16;
		assert_eq!(resolved, vec![inner]);
	}

	#[test]
	fn place_columns_fit_beside_the_highlight_symbol() {
		let area = Rect::new(0, 0, 40, 5);
		let cols = resolve_column_widths(area, &place_widths(), true);

		assert_eq!(cols.len(), 3);
		assert_eq!(cols[2], 6);
		let total: u16 = cols.iter().sum::<u16>() + 2 * TABLE_COLUMN_SPACING;
		assert!(total <= area.width - 2 - HIGHLIGHT_SYMBOL.width() as u16);
	}

	#[test]
	fn long_names_are_cut_to_their_column() {
		let cols = resolve_column_widths(Rect::new(0, 0, 40, 5), &place_widths(), true);
		let name = "Extremely Long Coffee Roastery And Bakery";
		let cut = truncate(name, cols.first().copied());
		assert!(cut.ends_with('…'));
		assert!(cut.width() <= usize::from(cols[0]));
	}

	#[test]
	fn narrow_terminals_drop_the_map() {
		let body = Rect::new(1, 1, 58, 20);
		let BodyLayout::ListOnly { list, hint } = BodyLayout::for_area(body, 60) else {
			panic!("expected list-only layout");
		};
		assert_eq!(list.height, 19);
		assert_eq!(hint.y, 20);

		let wide = BodyLayout::for_area(Rect::new(1, 1, 98, 20), 100);
		let BodyLayout::Split { map, list } = wide else {
			panic!("expected split layout");
		};
		assert!(map.width > list.width);
		assert_eq!(wide.list(), list);
	}
}
