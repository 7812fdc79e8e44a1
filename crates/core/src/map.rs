//! The rendered map surface and its mount lifecycle.
//!
//! A [`MapHandle`] only exists while the surface is mounted. Callers hold it
//! through [`MapMount`] and pass `Option<&MapHandle>` into the orchestration
//! functions, so an unmounted map is simply `None`.

use tracing::debug;

use crate::geo::Coordinate;

/// Zoom level used when the configuration does not override it.
pub const DEFAULT_ZOOM: u8 = 14;

/// Web Mercator tile edge in pixels.
const TILE_SIZE_PX: f64 = 256.0;
/// Approximate pixel footprint of one terminal cell.
const CELL_WIDTH_PX: f64 = 8.0;
const CELL_HEIGHT_PX: f64 = 16.0;

/// Measured size of the map surface in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
	pub columns: u16,
	pub rows: u16,
}

impl Viewport {
	#[must_use]
	pub const fn new(columns: u16, rows: u16) -> Self {
		Self { columns, rows }
	}

	#[must_use]
	pub const fn is_empty(&self) -> bool {
		self.columns == 0 || self.rows == 0
	}
}

/// Geographic extent currently visible on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
	pub west: f64,
	pub east: f64,
	pub south: f64,
	pub north: f64,
}

impl MapBounds {
	#[must_use]
	pub fn contains(&self, coordinate: Coordinate) -> bool {
		(self.west..=self.east).contains(&coordinate.longitude())
			&& (self.south..=self.north).contains(&coordinate.latitude())
	}
}

/// A mounted map surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MapHandle {
	center: Option<Coordinate>,
	zoom: u8,
	viewport: Option<Viewport>,
}

impl MapHandle {
	#[must_use]
	pub fn new(zoom: u8) -> Self {
		Self {
			center: None,
			zoom,
			viewport: None,
		}
	}

	/// Visual center of the surface. This follows pans and is independent of
	/// the session's search center.
	#[must_use]
	pub fn center(&self) -> Option<Coordinate> {
		self.center
	}

	pub fn pan_to(&mut self, center: Coordinate) {
		debug!(%center, "pan map");
		self.center = Some(center);
	}

	#[must_use]
	pub fn zoom(&self) -> u8 {
		self.zoom
	}

	#[must_use]
	pub fn viewport(&self) -> Option<Viewport> {
		self.viewport
	}

	/// Re-measure the surface. Empty viewports are ignored.
	pub fn resize(&mut self, viewport: Viewport) {
		if viewport.is_empty() {
			return;
		}
		self.viewport = Some(viewport);
	}

	/// Visible extent, available once the surface has a center and a size.
	#[must_use]
	pub fn bounds(&self) -> Option<MapBounds> {
		let center = self.center?;
		let viewport = self.viewport?;

		let degrees_per_px = 360.0 / (TILE_SIZE_PX * 2f64.powi(i32::from(self.zoom)));
		let half_width = f64::from(viewport.columns) * CELL_WIDTH_PX * degrees_per_px / 2.0;
		let half_height = f64::from(viewport.rows)
			* CELL_HEIGHT_PX
			* degrees_per_px
			* center.latitude().to_radians().cos()
			/ 2.0;

		Some(MapBounds {
			west: center.longitude() - half_width,
			east: center.longitude() + half_width,
			south: center.latitude() - half_height,
			north: center.latitude() + half_height,
		})
	}

	/// Cell (column, row) of a coordinate relative to the top-left corner of
	/// the surface, or `None` when it lies outside the visible extent.
	#[must_use]
	pub fn project(&self, coordinate: Coordinate) -> Option<(u16, u16)> {
		let bounds = self.bounds()?;
		let viewport = self.viewport?;
		if !bounds.contains(coordinate) {
			return None;
		}

		let x = (coordinate.longitude() - bounds.west) / (bounds.east - bounds.west);
		let y = (bounds.north - coordinate.latitude()) / (bounds.north - bounds.south);
		let column = (x * f64::from(viewport.columns)).floor() as u16;
		let row = (y * f64::from(viewport.rows)).floor() as u16;

		Some((
			column.min(viewport.columns.saturating_sub(1)),
			row.min(viewport.rows.saturating_sub(1)),
		))
	}

	/// Coordinate at the middle of the given cell.
	#[must_use]
	pub fn unproject(&self, column: u16, row: u16) -> Option<Coordinate> {
		let bounds = self.bounds()?;
		let viewport = self.viewport?;
		if column >= viewport.columns || row >= viewport.rows {
			return None;
		}

		let x = (f64::from(column) + 0.5) / f64::from(viewport.columns);
		let y = (f64::from(row) + 0.5) / f64::from(viewport.rows);
		let longitude = bounds.west + x * (bounds.east - bounds.west);
		let latitude = bounds.north - y * (bounds.north - bounds.south);
		Coordinate::new(latitude, longitude).ok()
	}
}

/// Mount lifecycle: unmounted → mounting → mounted → unmounted.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MapMount {
	#[default]
	Unmounted,
	Mounting,
	Mounted(MapHandle),
}

impl MapMount {
	/// Start mounting. Returns `false` unless the surface was unmounted.
	pub fn begin(&mut self) -> bool {
		if matches!(self, Self::Unmounted) {
			*self = Self::Mounting;
			true
		} else {
			false
		}
	}

	/// Finish mounting with the measured area.
	///
	/// The handle is sized before anything else so projections are valid on
	/// the first mounted frame, then centered on `center` when one is known.
	pub fn complete(&mut self, viewport: Viewport, center: Option<Coordinate>, zoom: u8) -> bool {
		if !matches!(self, Self::Mounting) {
			return false;
		}

		let mut handle = MapHandle::new(zoom);
		handle.resize(viewport);
		if let Some(center) = center {
			handle.pan_to(center);
		}
		debug!(?viewport, zoom, "map mounted");
		*self = Self::Mounted(handle);
		true
	}

	/// Leave the mounted (or mounting) state, dropping the handle.
	pub fn unmount(&mut self) -> Option<MapHandle> {
		match std::mem::take(self) {
			Self::Mounted(handle) => {
				debug!("map unmounted");
				Some(handle)
			}
			_ => None,
		}
	}

	#[must_use]
	pub fn handle(&self) -> Option<&MapHandle> {
		match self {
			Self::Mounted(handle) => Some(handle),
			_ => None,
		}
	}

	pub fn handle_mut(&mut self) -> Option<&mut MapHandle> {
		match self {
			Self::Mounted(handle) => Some(handle),
			_ => None,
		}
	}

	#[must_use]
	pub fn is_mounted(&self) -> bool {
		matches!(self, Self::Mounted(_))
	}

	#[must_use]
	pub fn is_unmounted(&self) -> bool {
		matches!(self, Self::Unmounted)
	}
}
