pub(crate) mod layout;

use layout::{BodyLayout, resolve_column_widths};
use nearby_core::ProviderStatus;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::symbols::border;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::App;
use crate::components::map::map_inner;
use crate::components::rows::{PLACE_HEADERS, build_place_rows, place_widths};
use crate::components::tables::{TableSpec, TableTarget};
use crate::components::{
	CandidatesContext, InputContext, MapContext, OverlayAreas, OverlayContext, ProgressState,
	render_alert, render_candidates, render_input, render_map, render_notice, render_overlay,
	render_placeholder, render_table,
};

impl App<'_> {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let full = frame.area();
		let area = full.inner(Margin {
			vertical: 0,
			horizontal: 1,
		});

		let layout = Layout::default()
			.direction(Direction::Vertical)
			.constraints([Constraint::Length(1), Constraint::Min(1)])
			.split(area);
		let (prompt_area, body) = (layout[0], layout[1]);

		let (progress_text, progress_complete) = self.progress_status();
		let input_ctx = InputContext {
			search_input: &self.search_input,
			placeholder: Some(self.ui.input_placeholder.as_str()),
			area: prompt_area,
			theme: &self.style.theme,
		};
		let progress_state = ProgressState {
			progress_text: &progress_text,
			progress_complete,
			throbber_state: &self.throbber_state,
		};
		render_input(frame, input_ctx, progress_state);

		if let ProviderStatus::Failed(reason) = &self.provider {
			let reason = reason.clone();
			self.sync_map_mount(None);
			self.results.area = None;
			self.map.overlay = None;
			self.candidates.area = None;
			self.render_failure(frame, body, reason);
			return;
		}

		let body_layout = BodyLayout::for_area(body, full.width);
		match body_layout {
			BodyLayout::Split { map, .. } => {
				self.sync_map_mount(Some(map_inner(map)));
				self.render_map_pane(frame, map);
			}
			BodyLayout::ListOnly { hint, .. } => {
				self.sync_map_mount(None);
				frame.render_widget(
					Paragraph::new(self.ui.map_hidden.as_str())
						.style(self.style.theme.empty_style())
						.alignment(Alignment::Center),
					hint,
				);
			}
		}

		let list = body_layout.list();
		self.results.area = Some(list);
		self.render_results(frame, list);

		self.map.overlay = self.render_selected_overlay(frame, list);

		let dropdown_bounds = Rect {
			y: body.y,
			height: body.height,
			..prompt_area
		};
		self.candidates.area = render_candidates(
			frame,
			CandidatesContext {
				candidates: &self.candidates.items,
				bounds: dropdown_bounds,
				theme: &self.style.theme,
			},
			&mut self.candidates.list_state,
		);

		if let Some(alert) = &self.alert {
			render_alert(frame, full, &alert.message(), &self.style.theme);
		}
	}

	fn render_failure(&self, frame: &mut Frame, area: Rect, reason: String) {
		let block = Block::default()
			.borders(Borders::ALL)
			.border_set(border::ROUNDED)
			.border_style(self.style.theme.border_style())
			.title(self.ui.map_title.as_str());
		let inner = block.inner(area);
		frame.render_widget(block, area);
		render_notice(
			frame,
			inner,
			&self.ui.map_failed,
			&[reason, "Press Esc or q to quit".to_string()],
			self.style.theme.alert,
		);
	}

	fn render_map_pane(&self, frame: &mut Frame, area: Rect) {
		let theme = &self.style.theme;
		let title = self.ui.map_title.as_str();
		if !self.provider.is_ready() {
			render_placeholder(frame, area, title, &self.ui.loading_map, theme);
			return;
		}

		match self.map.mount.handle() {
			Some(handle) if self.session.center().is_some() => {
				let ctx = MapContext {
					handle,
					center: self.session.center(),
					results: self.session.results(),
					selected: self.session.selected_id(),
					title,
					theme,
				};
				render_map(frame, area, ctx);
			}
			Some(_) => render_placeholder(frame, area, title, &self.ui.locating, theme),
			None => render_placeholder(frame, area, title, &self.ui.loading_map, theme),
		}
	}

	fn render_results(&mut self, frame: &mut Frame, area: Rect) {
		let results = self.session.results();
		let inner_height = usize::from(area.height.saturating_sub(2));
		self.results.update_scrollbar(inner_height, results.len());
		self.results
			.sync_selection(self.session.selected_index());

		let widths = place_widths();
		let has_selection = self.results.table_state.selected().is_some();
		let column_widths = resolve_column_widths(area, &widths, has_selection);
		let rows = build_place_rows(results, self.style.theme.highlight, Some(&column_widths));

		let spec = TableSpec {
			headers: PLACE_HEADERS.iter().map(|header| header.to_string()).collect(),
			widths,
			rows,
			title: Some(self.ui.list_title.clone()),
			empty_message: self
				.results
				.searched
				.then_some(self.ui.empty_results.as_str()),
		};
		let target = TableTarget {
			table_state: &mut self.results.table_state,
			scrollbar_state: &mut self.results.scrollbar_state,
			scrollbar_area: &mut self.results.scrollbar_area,
		};
		render_table(frame, area, target, spec, &self.style.theme);
	}

	/// Draw the details panel for the selection, anchored at its marker when
	/// the map shows it.
	fn render_selected_overlay(&self, frame: &mut Frame, list: Rect) -> Option<OverlayAreas> {
		let place = self.session.selected()?;
		let map_view = self.map.inner.zip(self.map.mount.handle());

		let (anchor, bounds) = match map_view {
			Some((inner, handle)) => {
				let anchor = place
					.location
					.and_then(|location| handle.project(location))
					.map(|(column, row)| (inner.x + column, inner.y + row));
				(anchor, inner)
			}
			None => (None, list),
		};

		render_overlay(
			frame,
			OverlayContext {
				place,
				anchor,
				bounds,
				theme: &self.style.theme,
			},
		)
	}
}
