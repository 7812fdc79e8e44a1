//! Map surface: coastline backdrop plus markers for the search center and
//! every located result.
//!
//! Markers are written straight into the buffer at the cell returned by
//! [`MapHandle::project`], so hit testing and drawing always agree.

use nearby_core::{Coordinate, MapHandle, PlaceId, ResultSet};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::{Marker, border};
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use ratatui::widgets::{Block, Borders};

use crate::style::Theme;

/// Marker for the current search center.
pub const CENTER_MARKER: &str = "◎";
/// Marker for a result.
pub const RESULT_MARKER: &str = "●";

/// Argument bundle for rendering the map pane.
pub struct MapContext<'a> {
	pub handle: &'a MapHandle,
	/// Session center, drawn as [`CENTER_MARKER`].
	pub center: Option<Coordinate>,
	pub results: &'a ResultSet,
	pub selected: Option<&'a PlaceId>,
	pub title: &'a str,
	pub theme: &'a Theme,
}

/// Inner area of the bordered map block.
#[must_use]
pub fn map_inner(area: Rect) -> Rect {
	map_block(None, Style::new()).inner(area)
}

fn map_block(title: Option<&str>, border_style: Style) -> Block<'_> {
	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(border::ROUNDED)
		.border_style(border_style);
	match title {
		Some(title) => block.title(title),
		None => block,
	}
}

/// Draw the map pane into `area`.
pub fn render_map(frame: &mut Frame, area: Rect, ctx: MapContext<'_>) {
	let MapContext {
		handle,
		center,
		results,
		selected,
		title,
		theme,
	} = ctx;

	let block = map_block(Some(title), theme.border_style());
	let inner = block.inner(area);
	let Some(bounds) = handle.bounds() else {
		frame.render_widget(block, area);
		return;
	};

	let land = theme.land_color();
	let canvas = Canvas::default()
		.block(block)
		.marker(Marker::Braille)
		.x_bounds([bounds.west, bounds.east])
		.y_bounds([bounds.south, bounds.north])
		.paint(move |ctx| {
			ctx.draw(&Map {
				color: land,
				resolution: MapResolution::High,
			});
		});
	frame.render_widget(canvas, area);

	let buffer = frame.buffer_mut();
	let mut put = |coordinate: Coordinate, symbol: &str, style: Style| {
		if let Some((column, row)) = handle.project(coordinate) {
			buffer.set_string(inner.x + column, inner.y + row, symbol, style);
		}
	};

	for place in results {
		if let Some(location) = place.location
			&& Some(&place.id) != selected
		{
			put(location, RESULT_MARKER, theme.marker);
		}
	}
	if let Some(center) = center {
		put(center, CENTER_MARKER, theme.center_marker);
	}
	// Drawn last so it stays visible on top of neighbours.
	if let Some(place) = selected.and_then(|id| results.get(id))
		&& let Some(location) = place.location
	{
		put(location, RESULT_MARKER, theme.selected_marker);
	}
}

/// Result whose marker is nearest to the clicked cell, within one cell in
/// each direction. `column`/`row` are relative to the map's inner area.
#[must_use]
pub fn marker_at(handle: &MapHandle, results: &ResultSet, column: u16, row: u16) -> Option<PlaceId> {
	results
		.iter()
		.filter_map(|place| {
			let (x, y) = handle.project(place.location?)?;
			let dx = x.abs_diff(column);
			let dy = y.abs_diff(row);
			(dx <= 1 && dy <= 1).then_some((dx + dy, &place.id))
		})
		.min_by_key(|(distance, _)| *distance)
		.map(|(_, id)| id.clone())
}

#[cfg(test)]
mod tests {
	use nearby_core::{PlaceResult, Viewport};
	use ratatui::Terminal;
	use ratatui::backend::TestBackend;

	use super::*;

	fn tokyo() -> Coordinate {
		Coordinate::new(35.681_236, 139.767_125).unwrap()
	}

	fn handle(viewport: Viewport) -> MapHandle {
		let mut handle = MapHandle::new(14);
		handle.resize(viewport);
		handle.pan_to(tokyo());
		handle
	}

	fn results_at(handle: &MapHandle, cells: &[(u16, u16)]) -> ResultSet {
		let mut results = ResultSet::new();
		results.replace(
			cells
				.iter()
				.enumerate()
				.map(|(i, &(column, row))| {
					PlaceResult::new(format!("p{i}"), format!("Place {i}"))
						.with_location(handle.unproject(column, row).unwrap())
				})
				.collect(),
		);
		results
	}

	#[test]
	fn click_hits_nearest_marker_within_one_cell() {
		let handle = handle(Viewport::new(40, 20));
		let results = results_at(&handle, &[(5, 5), (7, 5), (30, 15)]);

		assert_eq!(marker_at(&handle, &results, 5, 6), Some(PlaceId::new("p0")));
		assert_eq!(marker_at(&handle, &results, 7, 4), Some(PlaceId::new("p1")));
		assert_eq!(marker_at(&handle, &results, 20, 10), None);
	}

	#[test]
	fn markers_are_drawn_at_projected_cells() {
		let viewport = Viewport::new(38, 18);
		let handle = handle(viewport);
		let results = results_at(&handle, &[(4, 3)]);
		let theme = Theme::default();

		let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
		terminal
			.draw(|frame| {
				render_map(
					frame,
					frame.area(),
					MapContext {
						handle: &handle,
						center: Some(tokyo()),
						results: &results,
						selected: None,
						title: "Map",
						theme: &theme,
					},
				);
			})
			.unwrap();

		let buffer = terminal.backend().buffer();
		assert_eq!(buffer[(1 + 4, 1 + 3)].symbol(), RESULT_MARKER);
		let (column, row) = handle.project(tokyo()).unwrap();
		assert_eq!(buffer[(1 + column, 1 + row)].symbol(), CENTER_MARKER);
	}
}
