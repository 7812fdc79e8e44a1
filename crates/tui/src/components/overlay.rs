use nearby_core::PlaceResult;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::border;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::style::Theme;

/// Label of the close button in the overlay's top border.
pub const CLOSE_LABEL: &str = "[x]";
const MAX_WIDTH: u16 = 44;

/// Screen areas of a drawn overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayAreas {
	/// The whole panel, borders included.
	pub panel: Rect,
	pub close: Rect,
}

/// Argument bundle for rendering the details overlay.
pub struct OverlayContext<'a> {
	pub place: &'a PlaceResult,
	/// Cell of the place's marker, in absolute terminal coordinates.
	pub anchor: Option<(u16, u16)>,
	/// Area the overlay must stay inside.
	pub bounds: Rect,
	pub theme: &'a Theme,
}

fn overlay_lines<'a>(place: &'a PlaceResult, theme: &Theme) -> Vec<Line<'a>> {
	let mut lines = vec![Line::from(Span::styled(
		place.name.as_str(),
		Style::new().add_modifier(Modifier::BOLD),
	))];
	if let Some(address) = place.address() {
		lines.push(Line::raw(address));
	}
	if let Some(rating) = place.rating_label() {
		let mut spans = vec![Span::styled(rating, theme.highlight)];
		if let Some(count) = place.rating_count_label() {
			spans.push(Span::raw(" "));
			spans.push(Span::styled(count, theme.empty_style()));
		}
		lines.push(Line::from(spans));
	}
	lines.push(Line::from(Span::styled(
		place.place_url(),
		theme.prompt.add_modifier(Modifier::UNDERLINED),
	)));
	lines.push(Line::from(Span::styled(
		"Ctrl+O open link · Esc close",
		theme.empty_style(),
	)));
	lines
}

/// Draw the overlay next to its anchor and return where it landed.
pub fn render_overlay(frame: &mut Frame, ctx: OverlayContext<'_>) -> Option<OverlayAreas> {
	let OverlayContext {
		place,
		anchor,
		bounds,
		theme,
	} = ctx;
	if bounds.width < 8 || bounds.height < 4 {
		return None;
	}

	let lines = overlay_lines(place, theme);
	let width = MAX_WIDTH.min(bounds.width);
	let text_width = usize::from(width.saturating_sub(2)).max(1);
	// Wrapped height estimate; the link is the usual culprit.
	let body_height: usize = lines
		.iter()
		.map(|line| line.width().div_ceil(text_width).max(1))
		.sum();
	let height = (body_height as u16 + 2).min(bounds.height);

	let area = place_near(anchor, width, height, bounds);
	let close = Rect {
		x: area.right().saturating_sub(CLOSE_LABEL.width() as u16 + 1),
		y: area.y,
		width: CLOSE_LABEL.width() as u16,
		height: 1,
	};

	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(border::ROUNDED)
		.border_style(theme.border_style())
		.title(Line::from(Span::styled(CLOSE_LABEL, theme.highlight)).right_aligned());

	frame.render_widget(Clear, area);
	frame.render_widget(
		Paragraph::new(lines)
			.block(block)
			.wrap(Wrap { trim: true }),
		area,
	);
	Some(OverlayAreas { panel: area, close })
}

/// Put a `width`×`height` box just below and right of `anchor`, shifted
/// back inside `bounds` when it would overflow.
fn place_near(anchor: Option<(u16, u16)>, width: u16, height: u16, bounds: Rect) -> Rect {
	let (x, y) = anchor.map_or((bounds.x, bounds.y), |(column, row)| {
		(column.saturating_add(1), row.saturating_add(1))
	});
	let x = x.min(bounds.right().saturating_sub(width)).max(bounds.x);
	let y = y.min(bounds.bottom().saturating_sub(height)).max(bounds.y);
	Rect {
		x,
		y,
		width,
		height,
	}
}

#[cfg(test)]
mod tests {
	use nearby_core::Coordinate;
	use ratatui::Terminal;
	use ratatui::backend::TestBackend;

	use super::*;
	use crate::test_support::buffer_text;

	#[test]
	fn overlay_stays_inside_bounds() {
		let bounds = Rect::new(0, 0, 60, 20);
		let area = place_near(Some((58, 19)), 30, 6, bounds);
		assert_eq!(area, Rect::new(30, 14, 30, 6));

		let area = place_near(None, 30, 6, bounds);
		assert_eq!((area.x, area.y), (0, 0));
	}

	#[test]
	fn overlay_lists_details_and_close_button() {
		let mut place = PlaceResult::new("p1", "Cafe A")
			.with_rating(4.5)
			.with_vicinity("1-9-1 Marunouchi")
			.with_location(Coordinate::new(35.6813, 139.7672).unwrap());
		place.user_ratings_total = Some(12);
		let theme = Theme::default();

		let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
		let mut drawn = None;
		terminal
			.draw(|frame| {
				drawn = render_overlay(
					frame,
					OverlayContext {
						place: &place,
						anchor: Some((5, 2)),
						bounds: frame.area(),
						theme: &theme,
					},
				);
			})
			.unwrap();

		let text = buffer_text(terminal.backend().buffer());
		assert!(text.contains("Cafe A"));
		assert!(text.contains("1-9-1 Marunouchi"));
		assert!(text.contains("⭐4.5"));
		assert!(text.contains("(12 reviews)"));

		let OverlayAreas { panel, close } = drawn.expect("overlay areas");
		assert!(panel.contains(close.as_position()));
		assert_eq!(close.y, panel.y);
		let buffer = terminal.backend().buffer();
		let label: String = (close.x..close.right())
			.map(|x| buffer[(x, close.y)].symbol())
			.collect();
		assert_eq!(label, CLOSE_LABEL);
	}
}
