use std::time::Instant;

use anyhow::Result;
use nearby_core::search::{close_overlay, select_place};
use nearby_core::{PlaceId, ProviderStatus, SessionOutcome};
use ratatui::crossterm::event::{
	KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tracing::warn;

use super::App;
use crate::components::{candidate_at, marker_at, point_in_rect};
use crate::link;

impl<'a> App<'a> {
	/// Process a keyboard event and return the session outcome if the user
	/// exits.
	pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<Option<SessionOutcome>> {
		if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
			return Ok(Some(self.outcome()));
		}

		// The alert blocks everything until dismissed.
		if self.alert.is_some() {
			if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
				self.alert = None;
			}
			return Ok(None);
		}

		if matches!(self.provider, ProviderStatus::Failed(_)) {
			return Ok(matches!(key.code, KeyCode::Esc | KeyCode::Char('q'))
				.then(|| self.outcome()));
		}

		self.notice = None;

		match key.code {
			KeyCode::Esc => {
				if self.candidates.is_open() || self.candidates.pending_since.is_some() {
					self.candidates.close();
				} else if self.session.selected_id().is_some() {
					close_overlay(&mut self.session);
					self.results.sync_selection(None);
				} else {
					return Ok(Some(self.outcome()));
				}
			}
			KeyCode::Enter => match self.candidates.highlighted() {
				Some(index) => self.pick_candidate(index),
				None => self.request_search(),
			},
			KeyCode::Up if self.candidates.is_open() => self.candidates.move_up(),
			KeyCode::Down if self.candidates.is_open() => self.candidates.move_down(),
			KeyCode::Up => self.move_selection_up(),
			KeyCode::Down => self.move_selection_down(),
			KeyCode::Char('o') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				self.open_selected_link();
			}
			_ => {
				if self.search_input.input(key) {
					self.query_edited(Instant::now());
				}
			}
		}
		Ok(None)
	}

	pub(crate) fn handle_mouse(&mut self, mouse: MouseEvent) {
		self.results.update_hover(mouse.column, mouse.row);
		if self.alert.is_some() {
			return;
		}

		match mouse.kind {
			MouseEventKind::ScrollUp if self.candidates.is_open() => self.candidates.move_up(),
			MouseEventKind::ScrollDown if self.candidates.is_open() => self.candidates.move_down(),
			MouseEventKind::ScrollUp if self.results.hovered => self.move_selection_up(),
			MouseEventKind::ScrollDown if self.results.hovered => self.move_selection_down(),
			MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
			MouseEventKind::Up(MouseButton::Left) => {
				self.results.dragging_scrollbar = false;
				self.results.drag_anchor = None;
			}
			MouseEventKind::Drag(MouseButton::Left) if self.results.dragging_scrollbar => {
				self.drag_results_scrollbar_to(mouse.row);
			}
			_ => {}
		}
	}

	fn click(&mut self, column: u16, row: u16) {
		if let Some(area) = self.candidates.area
			&& point_in_rect(column, row, area)
		{
			let offset = self.candidates.list_state.offset();
			if let Some(index) = candidate_at(area, offset, self.candidates.items.len(), row) {
				self.pick_candidate(index);
			}
			return;
		}
		if self.candidates.is_open() {
			self.candidates.close();
		}

		if let Some(overlay) = self.map.overlay
			&& point_in_rect(column, row, overlay.panel)
		{
			if point_in_rect(column, row, overlay.close) {
				close_overlay(&mut self.session);
				self.results.sync_selection(None);
			}
			return;
		}

		if self.results_scrollbar_contains(column, row) {
			self.results.dragging_scrollbar = true;
			self.results.drag_anchor = None;
			self.drag_results_scrollbar_to(row);
			return;
		}

		let len = self.session.results().len();
		if let Some(index) = self.results.row_at(column, row, len) {
			self.select_index(index);
			return;
		}

		if let Some(inner) = self.map.inner
			&& point_in_rect(column, row, inner)
			&& let Some(handle) = self.map.mount.handle()
			&& let Some(id) = marker_at(handle, self.session.results(), column - inner.x, row - inner.y)
		{
			self.select_id(&id);
		}
	}

	fn move_selection_up(&mut self) {
		match self.session.selected_index() {
			Some(index) if index > 0 => self.select_index(index - 1),
			_ => {}
		}
	}

	fn move_selection_down(&mut self) {
		let next = self.session.selected_index().map_or(0, |index| index + 1);
		if next < self.session.results().len() {
			self.select_index(next);
		}
	}

	fn select_index(&mut self, index: usize) {
		let Some(id) = self.session.results().at(index).map(|place| place.id.clone()) else {
			return;
		};
		self.select_id(&id);
	}

	fn select_id(&mut self, id: &PlaceId) {
		if select_place(&mut self.session, self.map.mount.handle_mut(), id) {
			self.results.sync_selection(self.session.selected_index());
		}
	}

	fn open_selected_link(&mut self) {
		let Some(place) = self.session.selected() else {
			return;
		};
		match link::open_or_copy(&place.place_url()) {
			Ok(action) => self.notice = Some(action.notice().to_string()),
			Err(err) => {
				warn!(%err, "could not open link");
				self.notice = Some("Could not open link".to_string());
			}
		}
	}

	fn results_scrollbar_contains(&self, column: u16, row: u16) -> bool {
		self.results
			.scrollbar_area
			.is_some_and(|area| point_in_rect(column, row, area))
	}

	fn drag_results_scrollbar_to(&mut self, row: u16) -> bool {
		let Some(area) = self.results.scrollbar_area else {
			return false;
		};
		let Some(metrics) = self.results.scroll_metrics else {
			return false;
		};
		if !metrics.needs_scrollbar {
			*self.results.table_state.offset_mut() = 0;
			return true;
		}

		let Some(offset) = drag_with_anchor(
			area,
			row,
			self.results.table_state.offset(),
			metrics.max_offset,
			metrics.viewport_len,
			metrics.content_length,
			&mut self.results.drag_anchor,
		) else {
			return false;
		};

		*self.results.table_state.offset_mut() = offset;
		self.results.scrollbar_state = self
			.results
			.scrollbar_state
			.position(metrics.scrollbar_position(offset));
		true
	}
}

fn scrollbar_thumb_height(track_height: usize, viewport_len: usize, content_len: usize) -> usize {
	if track_height == 0 || content_len == 0 {
		return 0;
	}
	let scaled = viewport_len.saturating_mul(track_height);
	(scaled.div_ceil(content_len)).clamp(1, track_height)
}

/// Offset for a drag to `row`, keeping the grab point under the pointer.
fn drag_with_anchor(
	area: Rect,
	row: u16,
	current: usize,
	max_offset: usize,
	viewport_len: usize,
	content_len: usize,
	anchor: &mut Option<u16>,
) -> Option<usize> {
	if area.height == 0 || content_len == 0 {
		return None;
	}

	let track_height = usize::from(area.height);
	let thumb_height = scrollbar_thumb_height(track_height, viewport_len, content_len);
	let track_span = track_height.saturating_sub(thumb_height);
	if track_span == 0 {
		return Some(0);
	}

	let last_row = area.bottom().saturating_sub(1);
	let relative = usize::from(row.clamp(area.y, last_row) - area.y);

	let thumb_top = if max_offset == 0 {
		0
	} else {
		current.saturating_mul(track_span) / max_offset
	};
	let grab = *anchor.get_or_insert_with(|| {
		relative
			.saturating_sub(thumb_top)
			.min(thumb_height.saturating_sub(1)) as u16
	});

	let desired_top = relative.saturating_sub(usize::from(grab)).min(track_span);
	Some(max_offset.saturating_mul(desired_top) / track_span)
}
