//! State management for the result list.
//!
//! The selection itself lives in the session; the table state only mirrors
//! it so the highlighted row and the map's selected marker never disagree.

use ratatui::layout::Rect;
use ratatui::widgets::{ScrollbarState, TableState};

use crate::components::tables::TABLE_HEADER_ROWS;
use crate::components::{ScrollMetrics, point_in_rect};

#[derive(Debug, Default)]
pub(crate) struct ResultsState {
	pub table_state: TableState,
	pub scrollbar_state: ScrollbarState,
	/// Screen area of the scrollbar if rendered.
	pub scrollbar_area: Option<Rect>,
	/// Last known list area on screen.
	pub area: Option<Rect>,
	/// Whether the mouse is over the list.
	pub hovered: bool,
	pub scroll_metrics: Option<ScrollMetrics>,
	/// A search has completed, so an empty list means nothing was found.
	pub searched: bool,
	pub dragging_scrollbar: bool,
	/// Row within the thumb where the current drag grabbed it.
	pub drag_anchor: Option<u16>,
}

impl ResultsState {
	/// Mirror the session's selection into the table.
	pub fn sync_selection(&mut self, selected: Option<usize>) {
		self.table_state.select(selected);
	}

	/// Scroll back to the top after the result set was replaced.
	pub fn reset_scroll(&mut self) {
		*self.table_state.offset_mut() = 0;
		self.table_state.select(None);
	}

	pub fn update_hover(&mut self, column: u16, row: u16) {
		self.hovered = self
			.area
			.is_some_and(|area| point_in_rect(column, row, area));
	}

	/// Index of the result drawn at the given screen position, if any.
	pub fn row_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
		let area = self.area?;
		if !point_in_rect(column, row, area) {
			return None;
		}

		// Rounded border, then header row and separator.
		let body_top = area.y + 1 + TABLE_HEADER_ROWS as u16;
		let body_bottom = area.bottom().saturating_sub(1);
		if row < body_top || row >= body_bottom {
			return None;
		}

		let index = self.table_state.offset() + usize::from(row - body_top);
		(index < len).then_some(index)
	}

	/// Recompute scroll metrics for a table body of `viewport_height` rows
	/// (header included) holding `len` results.
	pub fn update_scrollbar(&mut self, viewport_height: usize, len: usize) {
		let rows = viewport_height.saturating_sub(TABLE_HEADER_ROWS);
		let Some(metrics) = ScrollMetrics::compute(len, rows) else {
			self.scrollbar_state = ScrollbarState::default();
			self.scroll_metrics = None;
			return;
		};

		self.scroll_metrics = Some(metrics);
		if !metrics.needs_scrollbar {
			*self.table_state.offset_mut() = 0;
			self.scrollbar_state = ScrollbarState::default();
			return;
		}

		let offset = self.table_state.offset().min(metrics.max_offset);
		*self.table_state.offset_mut() = offset;
		self.scrollbar_state = ScrollbarState::new(metrics.content_length)
			.viewport_content_length(metrics.viewport_len)
			.position(metrics.scrollbar_position(offset));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rows_below_the_header_map_to_results() {
		let state = ResultsState {
			area: Some(Rect::new(60, 1, 40, 10)),
			..ResultsState::default()
		};
		// Border at y=1, header at y=2, separator at y=3.
		assert_eq!(state.row_at(70, 3, 5), None);
		assert_eq!(state.row_at(70, 4, 5), Some(0));
		assert_eq!(state.row_at(70, 6, 5), Some(2));
		assert_eq!(state.row_at(70, 6, 2), None);
		assert_eq!(state.row_at(10, 4, 5), None);
	}

	#[test]
	fn scrollbar_only_when_results_overflow() {
		let mut state = ResultsState::default();
		state.update_scrollbar(10, 3);
		assert!(!state.scroll_metrics.unwrap().needs_scrollbar);

		*state.table_state.offset_mut() = 50;
		state.update_scrollbar(10, 20);
		let metrics = state.scroll_metrics.unwrap();
		assert!(metrics.needs_scrollbar);
		assert_eq!(state.table_state.offset(), metrics.max_offset);
	}
}
