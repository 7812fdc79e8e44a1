//! Single-line query editor built on `tui-textarea`.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::TextArea;

/// Text input for the search prompt.
pub struct QueryInput<'a> {
	textarea: TextArea<'a>,
}

impl<'a> QueryInput<'a> {
	/// Create an input pre-filled with `initial`, cursor at the end.
	pub fn new(initial: impl Into<String>) -> Self {
		let initial: String = initial.into();
		let mut textarea = TextArea::new(vec![single_line(&initial)]);
		textarea.set_cursor_line_style(Style::default());
		textarea.move_cursor(tui_textarea::CursorMove::End);
		Self { textarea }
	}

	/// Current query text.
	#[must_use]
	pub fn text(&self) -> &str {
		self.textarea
			.lines()
			.first()
			.map(String::as_str)
			.unwrap_or("")
	}

	/// Feed a key to the editor. Returns `true` when the text changed.
	///
	/// Keys that would break the single-line invariant are ignored.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		match key.code {
			KeyCode::Enter | KeyCode::Tab | KeyCode::Up | KeyCode::Down => false,
			KeyCode::Char('m' | 'j') if key.modifiers.contains(KeyModifiers::CONTROL) => false,
			_ => self.textarea.input(key),
		}
	}

	pub fn set_style(&mut self, style: Style) {
		self.textarea.set_style(style);
	}

	pub fn render_textarea(&self, frame: &mut Frame, area: Rect) {
		frame.render_widget(&self.textarea, area);
	}
}

fn single_line(text: &str) -> String {
	text.lines().next().unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
	use ratatui::crossterm::event::KeyEvent;

	use super::*;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	#[test]
	fn typing_appends_to_initial_text() {
		let mut input = QueryInput::new("caf");
		assert!(input.input(key(KeyCode::Char('e'))));
		assert_eq!(input.text(), "cafe");
	}

	#[test]
	fn newline_keys_are_ignored() {
		let mut input = QueryInput::new("ramen");
		assert!(!input.input(key(KeyCode::Enter)));
		assert!(!input.input(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::CONTROL)));
		assert_eq!(input.text(), "ramen");
	}

	#[test]
	fn initial_text_keeps_first_line_only() {
		let input = QueryInput::new("coffee\ntea");
		assert_eq!(input.text(), "coffee");
	}
}
