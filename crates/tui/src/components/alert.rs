use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::symbols::border;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::style::Theme;

/// Hint shown under the alert message.
pub const DISMISS_HINT: &str = "Enter / Esc to dismiss";

/// Draw a centered modal carrying `message`.
pub fn render_alert(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
	let width = (message.chars().count() as u16 + 6)
		.max(DISMISS_HINT.len() as u16 + 6)
		.min(area.width);
	let [row] = Layout::vertical([Constraint::Length(5)])
		.flex(Flex::Center)
		.areas(area);
	let [modal] = Layout::horizontal([Constraint::Length(width)])
		.flex(Flex::Center)
		.areas(row);

	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(border::DOUBLE)
		.title(" Alert ")
		.style(theme.alert);
	let body = vec![
		Line::from(Span::styled(
			message,
			theme.alert.add_modifier(Modifier::BOLD),
		)),
		Line::default(),
		Line::from(DISMISS_HINT),
	];

	frame.render_widget(Clear, modal);
	frame.render_widget(
		Paragraph::new(body)
			.block(block)
			.alignment(Alignment::Center)
			.wrap(Wrap { trim: true }),
		modal,
	);
}
