use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols::border;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::style::Theme;

/// Bordered pane with `message` centered inside it.
pub fn render_placeholder(frame: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(border::ROUNDED)
		.border_style(theme.border_style())
		.title(title);
	let inner = block.inner(area);
	frame.render_widget(block, area);
	render_centered(frame, inner, Text::from(Span::styled(message, theme.empty_style())));
}

/// Full-area notice: a headline and supporting lines, centered.
pub fn render_notice(frame: &mut Frame, area: Rect, headline: &str, details: &[String], style: Style) {
	let mut lines = vec![Line::from(Span::styled(headline, style)), Line::default()];
	lines.extend(details.iter().map(|detail| Line::raw(detail.as_str())));
	render_centered(frame, area, Text::from(lines));
}

fn render_centered(frame: &mut Frame, area: Rect, text: Text<'_>) {
	if area.width == 0 || area.height == 0 {
		return;
	}
	let height = (text.height() as u16).min(area.height);
	let [row] = Layout::vertical([Constraint::Length(height)])
		.flex(Flex::Center)
		.areas(area);
	frame.render_widget(
		Paragraph::new(text)
			.alignment(Alignment::Center)
			.wrap(Wrap { trim: true }),
		row,
	);
}
