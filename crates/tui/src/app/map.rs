//! Map pane state and the mount lifecycle.

use nearby_core::{MapMount, Viewport};
use ratatui::layout::Rect;
use tracing::debug;

use super::App;
use crate::components::OverlayAreas;

/// Narrowest terminal that still shows the map.
pub(crate) const MIN_WIDTH_FOR_MAP: u16 = 80;
/// Smallest inner area worth mounting the map into.
const MIN_MAP_COLUMNS: u16 = 10;
const MIN_MAP_ROWS: u16 = 4;

#[derive(Debug, Default)]
pub(crate) struct MapPane {
	pub mount: MapMount,
	/// Inner area of the map block in the last frame.
	pub inner: Option<Rect>,
	/// Details overlay in the last frame; clicks inside it never reach
	/// the list or the markers below.
	pub overlay: Option<OverlayAreas>,
}

impl App<'_> {
	/// Advance the mount state machine for this frame.
	///
	/// `inner` is the area the map would be drawn into, or `None` when the
	/// map pane is not shown. Mounting takes two frames: the first moves to
	/// mounting, the second measures the area and creates the handle.
	pub(crate) fn sync_map_mount(&mut self, inner: Option<Rect>) {
		self.map.inner = inner;
		let usable = inner
			.filter(|area| area.width >= MIN_MAP_COLUMNS && area.height >= MIN_MAP_ROWS)
			.filter(|_| self.provider.is_ready());
		let Some(area) = usable else {
			if !self.map.mount.is_unmounted() {
				debug!(shown = inner.is_some(), "unmounting map");
				self.map.mount.unmount();
			}
			return;
		};

		let viewport = Viewport::new(area.width, area.height);
		if self.map.mount.is_unmounted() {
			self.map.mount.begin();
		} else if let Some(handle) = self.map.mount.handle_mut() {
			handle.resize(viewport);
			if handle.center().is_none()
				&& let Some(center) = self.session.center()
			{
				handle.pan_to(center);
			}
		} else {
			self.map
				.mount
				.complete(viewport, self.session.center(), self.options.zoom);
		}
	}
}
