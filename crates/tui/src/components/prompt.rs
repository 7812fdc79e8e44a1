use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use throbber_widgets_tui::{Throbber, ThrobberState};
use unicode_width::UnicodeWidthStr;

use crate::input::QueryInput;
use crate::style::Theme;

/// Glyph drawn in front of the query.
pub const PROMPT_SYMBOL: &str = "› ";

/// Argument bundle for rendering the input area.
pub struct InputContext<'a> {
	/// The query editor.
	pub search_input: &'a QueryInput<'a>,
	/// Placeholder text shown when input is empty.
	pub placeholder: Option<&'a str>,
	/// Rendering area.
	pub area: Rect,
	/// Color theme.
	pub theme: &'a Theme,
}

/// What the session is waiting for, shown at the right of the prompt.
pub struct ProgressState<'a> {
	/// Status label; nothing is drawn when empty.
	pub progress_text: &'a str,
	/// Whether nothing is pending; hides the spinner.
	pub progress_complete: bool,
	/// Spinner animation state.
	pub throbber_state: &'a ThrobberState,
}

/// Render the prompt symbol, the editor, the placeholder when the query is
/// empty, and the status label.
pub fn render_input(frame: &mut Frame, input: InputContext<'_>, progress: ProgressState<'_>) {
	let InputContext {
		search_input,
		placeholder,
		area,
		theme,
	} = input;
	if area.width == 0 || area.height == 0 {
		return;
	}

	let symbol_width = (PROMPT_SYMBOL.width() as u16).min(area.width);
	frame.buffer_mut().set_stringn(
		area.x,
		area.y,
		PROMPT_SYMBOL,
		usize::from(symbol_width),
		theme.prompt,
	);
	let editor_area = Rect {
		x: area.x + symbol_width,
		width: area.width - symbol_width,
		..area
	};

	search_input.render_textarea(frame, editor_area);

	if search_input.text().is_empty()
		&& let Some(text) = placeholder
	{
		render_placeholder(frame, editor_area, text, theme);
	}

	render_progress(frame, editor_area, progress, theme);
}

fn render_placeholder(frame: &mut Frame, area: Rect, text: &str, theme: &Theme) {
	if area.width == 0 || text.is_empty() {
		return;
	}
	// Leave the first cell to the cursor.
	let start = area.x.saturating_add(1);
	let width = area.width.saturating_sub(1);
	frame.buffer_mut().set_line(
		start,
		area.y,
		&Line::from(Span::styled(text, theme.empty_style())),
		width,
	);
}

fn render_progress(frame: &mut Frame, area: Rect, progress: ProgressState<'_>, theme: &Theme) {
	if area.width == 0 || progress.progress_text.is_empty() {
		return;
	}

	let muted = theme.empty_style();
	let mut line = Line::default();
	if !progress.progress_complete {
		let spinner = Throbber::default().style(muted).throbber_style(muted);
		line.spans.push(spinner.to_symbol_span(progress.throbber_state));
	}
	line.spans
		.push(Span::styled(progress.progress_text.to_string(), muted));

	let line_width = line.width() as u16;
	let buffer = frame.buffer_mut();

	// Keep two blank cells between whatever is typed and the label.
	let last_used = (area.left()..area.right())
		.rev()
		.find(|&x| {
			buffer
				.cell((x, area.y))
				.is_some_and(|cell| !cell.symbol().trim().is_empty())
		});
	let earliest = last_used.map_or(area.left(), |x| x.saturating_add(3));
	let start = area.right().saturating_sub(line_width).max(earliest);
	if start >= area.right() {
		return;
	}

	buffer.set_line(start, area.y, &line, area.right() - start);
}

#[cfg(test)]
mod tests {
	use ratatui::Terminal;
	use ratatui::backend::TestBackend;

	use super::*;
	use crate::test_support::buffer_text;

	fn draw(input: &QueryInput<'_>, text: &str, complete: bool) -> String {
		let theme = Theme::default();
		let throbber = ThrobberState::default();
		let mut terminal = Terminal::new(TestBackend::new(50, 1)).unwrap();
		terminal
			.draw(|frame| {
				let area = frame.area();
				render_input(
					frame,
					InputContext {
						search_input: input,
						placeholder: Some("Search nearby places"),
						area,
						theme: &theme,
					},
					ProgressState {
						progress_text: text,
						progress_complete: complete,
						throbber_state: &throbber,
					},
				);
			})
			.unwrap();
		buffer_text(terminal.backend().buffer())
	}

	#[test]
	fn empty_prompt_shows_placeholder() {
		let row = draw(&QueryInput::new(""), "", true);
		assert!(row.starts_with(PROMPT_SYMBOL));
		assert!(row.contains("Search nearby places"));
	}

	#[test]
	fn status_label_is_right_aligned() {
		let row = draw(&QueryInput::new("coffee"), "3 places", true);
		assert!(row.contains("coffee"));
		assert!(!row.contains("Search nearby places"));
		assert!(row.trim_end().ends_with("3 places"));
	}
}
