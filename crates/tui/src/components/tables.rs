use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::symbols::border;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
	Block, Borders, Cell, HighlightSpacing, Paragraph, Row, ScrollbarState, Table, TableState,
};

use crate::components::render_scrollbar;
use crate::style::Theme;

pub(crate) const HIGHLIGHT_SYMBOL: &str = "▶ ";
pub(crate) const TABLE_COLUMN_SPACING: u16 = 1;
pub(crate) const TABLE_HIGHLIGHT_SPACING: HighlightSpacing = HighlightSpacing::Always;
/// Header row + separator height inside the table's viewport.
pub(crate) const TABLE_HEADER_ROWS: usize = 2;

/// Fully materialized table configuration.
pub struct TableSpec<'a> {
	pub headers: Vec<String>,
	pub widths: Vec<Constraint>,
	pub rows: Vec<Row<'a>>,
	/// Optional title for the bordered table.
	pub title: Option<String>,
	/// Message drawn in the body when there are no rows.
	pub empty_message: Option<&'a str>,
}

/// Mutable state the table updates while rendering.
pub struct TableTarget<'s> {
	pub table_state: &'s mut TableState,
	pub scrollbar_state: &'s mut ScrollbarState,
	pub scrollbar_area: &'s mut Option<Rect>,
}

/// Render a bordered table with header, separator, optional scrollbar and
/// empty-state message.
pub fn render_table(
	frame: &mut Frame,
	area: Rect,
	target: TableTarget<'_>,
	spec: TableSpec<'_>,
	theme: &Theme,
) {
	*target.scrollbar_area = None;

	let mut block = Block::default()
		.borders(Borders::ALL)
		.border_set(border::ROUNDED)
		.border_style(theme.border_style());
	if let Some(title) = spec.title.clone() {
		block = block.title(title);
	}

	let inner = block.inner(area);
	frame.render_widget(block, area);
	if inner.width == 0 || inner.height == 0 {
		return;
	}

	let header = Row::new(spec.headers.into_iter().map(Cell::from))
		.style(theme.border_style())
		.height(1)
		.bottom_margin(1);

	let widths = if spec.widths.is_empty() {
		vec![Constraint::Fill(1)]
	} else {
		spec.widths
	};

	let available_rows = usize::from(inner.height).saturating_sub(TABLE_HEADER_ROWS);
	let total_rows = spec.rows.len();
	let needs_scrollbar = available_rows > 0 && total_rows > available_rows;
	let table_area = if needs_scrollbar {
		Rect {
			width: inner.width.saturating_sub(1),
			..inner
		}
	} else {
		inner
	};

	let table = Table::new(spec.rows, widths)
		.header(header)
		.column_spacing(TABLE_COLUMN_SPACING)
		.highlight_spacing(TABLE_HIGHLIGHT_SPACING)
		.row_highlight_style(theme.row_highlight)
		.highlight_symbol(HIGHLIGHT_SYMBOL);
	frame.render_stateful_widget(table, table_area, target.table_state);

	if needs_scrollbar {
		render_scrollbar(
			frame,
			inner,
			target.scrollbar_state,
			target.scrollbar_area,
			theme,
		);
	}

	render_header_separator(frame, table_area, theme);

	if total_rows == 0
		&& let Some(message) = spec.empty_message
		&& available_rows > 0
	{
		let body = Rect {
			y: inner.y + TABLE_HEADER_ROWS as u16,
			height: available_rows as u16,
			..inner
		};
		let empty = Paragraph::new(Span::styled(message, theme.empty_style()))
			.alignment(Alignment::Center);
		frame.render_widget(empty, body);
	}
}

fn render_header_separator(frame: &mut Frame, area: Rect, theme: &Theme) {
	if area.height < 2 || area.width == 0 {
		return;
	}
	let sep = Rect {
		y: area.y + 1,
		height: 1,
		..area
	};
	let line = if area.width <= 2 {
		Line::raw(" ".repeat(usize::from(area.width)))
	} else {
		Line::from(vec![
			Span::raw(" "),
			Span::styled(
				"─".repeat(usize::from(area.width) - 2),
				theme.border_style(),
			),
			Span::raw(" "),
		])
	};
	frame.render_widget(Paragraph::new(line), sep);
}
