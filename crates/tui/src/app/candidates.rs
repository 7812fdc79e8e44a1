//! Autocomplete dropdown state.

use std::time::{Duration, Instant};

use nearby_core::{PlaceResult, ProviderError};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tracing::warn;

#[derive(Debug, Default)]
pub(crate) struct CandidatesState {
	pub items: Vec<PlaceResult>,
	pub list_state: ListState,
	/// Screen area of the dropdown when drawn.
	pub area: Option<Rect>,
	/// Time of the last edit that has not been looked up yet.
	pub pending_since: Option<Instant>,
	/// A lookup is outstanding and its answer should open the dropdown.
	pub awaiting: bool,
}

impl CandidatesState {
	pub fn is_open(&self) -> bool {
		!self.items.is_empty()
	}

	/// Note an edit at `now`; the lookup waits for the debounce interval.
	pub fn schedule(&mut self, now: Instant) {
		self.close();
		self.pending_since = Some(now);
	}

	/// Whether the query has been idle for `debounce`.
	pub fn due(&self, now: Instant, debounce: Duration) -> bool {
		self.pending_since
			.is_some_and(|since| now.saturating_duration_since(since) >= debounce)
	}

	pub fn receive(&mut self, candidates: Result<Vec<PlaceResult>, ProviderError>) {
		if !self.awaiting {
			return;
		}
		self.awaiting = false;
		match candidates {
			Ok(items) => {
				self.list_state
					.select(if items.is_empty() { None } else { Some(0) });
				self.items = items;
			}
			Err(err) => {
				warn!(%err, "autocomplete failed");
				self.close();
			}
		}
	}

	pub fn close(&mut self) {
		self.items.clear();
		self.list_state = ListState::default();
		self.area = None;
		self.pending_since = None;
		self.awaiting = false;
	}

	pub fn highlighted(&self) -> Option<usize> {
		self.list_state
			.selected()
			.filter(|&index| index < self.items.len())
	}

	pub fn move_up(&mut self) {
		if let Some(index) = self.highlighted()
			&& index > 0
		{
			self.list_state.select(Some(index - 1));
		}
	}

	pub fn move_down(&mut self) {
		match self.highlighted() {
			Some(index) if index + 1 < self.items.len() => self.list_state.select(Some(index + 1)),
			None if self.is_open() => self.list_state.select(Some(0)),
			_ => {}
		}
	}

	/// Take the candidates with the one at `index` moved to the front, and
	/// close the dropdown.
	pub fn take_with_first(&mut self, index: usize) -> Vec<PlaceResult> {
		let mut items = std::mem::take(&mut self.items);
		self.close();
		if index < items.len() {
			let chosen = items.remove(index);
			items.insert(0, chosen);
		}
		items
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn open(names: &[&str]) -> CandidatesState {
		let mut state = CandidatesState {
			awaiting: true,
			..CandidatesState::default()
		};
		state.receive(Ok(names
			.iter()
			.enumerate()
			.map(|(i, name)| PlaceResult::new(format!("c{i}"), *name))
			.collect()));
		state
	}

	#[test]
	fn debounce_waits_for_idle_query() {
		let mut state = CandidatesState::default();
		let start = Instant::now();
		state.schedule(start);
		let debounce = Duration::from_millis(300);
		assert!(!state.due(start + Duration::from_millis(299), debounce));
		assert!(state.due(start + Duration::from_millis(300), debounce));
	}

	#[test]
	fn unrequested_answers_are_ignored() {
		let mut state = CandidatesState::default();
		state.receive(Ok(vec![PlaceResult::new("c0", "Ramen")]));
		assert!(!state.is_open());
	}

	#[test]
	fn highlight_moves_within_bounds() {
		let mut state = open(&["a", "b"]);
		assert_eq!(state.highlighted(), Some(0));
		state.move_up();
		assert_eq!(state.highlighted(), Some(0));
		state.move_down();
		state.move_down();
		assert_eq!(state.highlighted(), Some(1));
	}

	#[test]
	fn picked_candidate_goes_first() {
		let mut state = open(&["a", "b", "c"]);
		let picked = state.take_with_first(2);
		let names: Vec<_> = picked.iter().map(|p| p.name.as_str()).collect();
		assert_eq!(names, ["c", "a", "b"]);
		assert!(!state.is_open());
	}
}
