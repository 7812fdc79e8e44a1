//! Validated geographic coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Last-resort center used when the location lookup fails (Tokyo Station).
pub const FALLBACK_COORDINATE: Coordinate = Coordinate {
	latitude: 35.681_236,
	longitude: 139.767_125,
};

/// Reasons a latitude/longitude pair is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
	#[error("coordinate components must be finite")]
	NotFinite,
	#[error("latitude {0} is outside [-90, 90]")]
	LatitudeOutOfRange(f64),
	#[error("longitude {0} is outside [-180, 180]")]
	LongitudeOutOfRange(f64),
}

/// A point on the globe in decimal degrees.
///
/// Both components are finite and within their valid ranges; the only way to
/// obtain a value is through [`Coordinate::new`] or deserialization, which
/// runs the same checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
	latitude: f64,
	longitude: f64,
}

impl Coordinate {
	/// Build a coordinate, rejecting non-finite or out-of-range components.
	pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
		if !latitude.is_finite() || !longitude.is_finite() {
			return Err(CoordinateError::NotFinite);
		}
		if !(-90.0..=90.0).contains(&latitude) {
			return Err(CoordinateError::LatitudeOutOfRange(latitude));
		}
		if !(-180.0..=180.0).contains(&longitude) {
			return Err(CoordinateError::LongitudeOutOfRange(longitude));
		}
		Ok(Self {
			latitude,
			longitude,
		})
	}

	#[must_use]
	pub const fn latitude(&self) -> f64 {
		self.latitude
	}

	#[must_use]
	pub const fn longitude(&self) -> f64 {
		self.longitude
	}

	/// Format as the `lat,lng` pair used in provider query strings.
	#[must_use]
	pub fn to_query_value(&self) -> String {
		format!("{},{}", self.latitude, self.longitude)
	}
}

impl fmt::Display for Coordinate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
	}
}

#[derive(Deserialize)]
struct RawCoordinate {
	latitude: f64,
	longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
	type Error = CoordinateError;

	fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
		Self::new(raw.latitude, raw.longitude)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_boundaries() {
		assert!(Coordinate::new(90.0, 180.0).is_ok());
		assert!(Coordinate::new(-90.0, -180.0).is_ok());
	}

	#[test]
	fn rejects_out_of_range_components() {
		assert_eq!(
			Coordinate::new(90.5, 0.0),
			Err(CoordinateError::LatitudeOutOfRange(90.5))
		);
		assert_eq!(
			Coordinate::new(0.0, -181.0),
			Err(CoordinateError::LongitudeOutOfRange(-181.0))
		);
		assert_eq!(
			Coordinate::new(f64::NAN, 0.0),
			Err(CoordinateError::NotFinite)
		);
		assert_eq!(
			Coordinate::new(0.0, f64::INFINITY),
			Err(CoordinateError::NotFinite)
		);
	}

	#[test]
	fn deserialization_runs_validation() {
		let ok: Coordinate = serde_json::from_str(r#"{"latitude":1.5,"longitude":2.5}"#).unwrap();
		assert_eq!(ok.latitude(), 1.5);

		let err = serde_json::from_str::<Coordinate>(r#"{"latitude":120.0,"longitude":0.0}"#);
		assert!(err.is_err());
	}

	#[test]
	fn fallback_is_valid() {
		let rebuilt =
			Coordinate::new(FALLBACK_COORDINATE.latitude(), FALLBACK_COORDINATE.longitude());
		assert_eq!(rebuilt, Ok(FALLBACK_COORDINATE));
	}
}
