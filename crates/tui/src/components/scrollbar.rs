//! Shared scrollbar rendering component.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::style::Theme;

/// Scrolling metrics for a list viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
	/// Total number of rows.
	pub content_length: usize,
	/// Rows visible at once.
	pub viewport_len: usize,
	/// Largest valid offset.
	pub max_offset: usize,
	pub needs_scrollbar: bool,
}

impl ScrollMetrics {
	/// Metrics for `content_length` rows shown in `viewport_rows` rows.
	/// Returns `None` when either is zero.
	#[must_use]
	pub fn compute(content_length: usize, viewport_rows: usize) -> Option<Self> {
		if content_length == 0 || viewport_rows == 0 {
			return None;
		}
		let viewport_len = viewport_rows.min(content_length);
		Some(Self {
			content_length,
			viewport_len,
			max_offset: content_length - viewport_len,
			needs_scrollbar: content_length > viewport_rows,
		})
	}

	/// Scrollbar thumb position for a given offset.
	#[must_use]
	pub fn scrollbar_position(&self, offset: usize) -> usize {
		if self.max_offset == 0 {
			0
		} else {
			offset.min(self.max_offset) * self.content_length.saturating_sub(1) / self.max_offset
		}
	}
}

/// Check if a point (column, row) is inside a rectangle.
#[must_use]
pub fn point_in_rect(column: u16, row: u16, area: Rect) -> bool {
	area.width > 0
		&& area.height > 0
		&& (area.left()..area.right()).contains(&column)
		&& (area.top()..area.bottom()).contains(&row)
}

/// Render a themed vertical scrollbar in the rightmost column of `area` and
/// record where it was drawn.
pub fn render_scrollbar(
	frame: &mut Frame,
	area: Rect,
	scrollbar_state: &mut ScrollbarState,
	scrollbar_area: &mut Option<Rect>,
	theme: &Theme,
) {
	if area.width == 0 {
		*scrollbar_area = None;
		return;
	}
	let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
		.begin_symbol(None)
		.end_symbol(None)
		.track_symbol(Some("│"))
		.style(theme.border_style());

	let track = Rect {
		x: area.right() - 1,
		width: 1,
		..area
	};
	*scrollbar_area = Some(track);
	frame.render_stateful_widget(scrollbar, track, scrollbar_state);
}
