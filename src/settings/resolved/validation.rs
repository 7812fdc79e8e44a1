//! Range and consistency checks for values that cannot be expressed in the
//! configuration's types alone.

use std::time::Duration;

use nearby_core::{Coordinate, CoordinateError};

use super::{ConfigError, SettingSource};

/// Accepted map zoom levels.
pub(crate) const ZOOM_RANGE: std::ops::RangeInclusive<i64> = 1..=20;

pub(crate) fn zoom(value: i64, origin: SettingSource) -> Result<u8, ConfigError> {
	if !ZOOM_RANGE.contains(&value) {
		return Err(ConfigError::invalid(
			"map.zoom",
			value.to_string(),
			origin,
			"must be between 1 and 20",
		));
	}
	// The range check above keeps this in bounds.
	Ok(value as u8)
}

pub(crate) fn timeout(seconds: u64, origin: SettingSource) -> Result<Duration, ConfigError> {
	if seconds == 0 {
		return Err(ConfigError::invalid(
			"provider.timeout_secs",
			"0",
			origin,
			"must be greater than zero",
		));
	}
	Ok(Duration::from_secs(seconds))
}

/// Build a coordinate, blaming whichever component is out of range.
pub(crate) fn coordinate(
	keys: (&'static str, &'static str),
	(latitude, longitude): (f64, f64),
	(latitude_origin, longitude_origin): (SettingSource, SettingSource),
) -> Result<Coordinate, ConfigError> {
	Coordinate::new(latitude, longitude).map_err(|err| match err {
		CoordinateError::LongitudeOutOfRange(value) => {
			ConfigError::invalid(keys.1, value.to_string(), longitude_origin, err.to_string())
		}
		CoordinateError::LatitudeOutOfRange(value) => {
			ConfigError::invalid(keys.0, value.to_string(), latitude_origin, err.to_string())
		}
		CoordinateError::NotFinite => ConfigError::invalid(
			keys.0,
			format!("{latitude}, {longitude}"),
			latitude_origin,
			err.to_string(),
		),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zoom_outside_range_names_its_origin() {
		let err = zoom(25, SettingSource::CliFlag("--zoom")).unwrap_err();
		assert_eq!(err.key, "map.zoom");
		let message = err.to_string();
		assert!(message.contains("value: 25"));
		assert!(message.contains("CLI flag `--zoom`"));
		assert_eq!(zoom(14, SettingSource::ConfigKey("map.zoom")).unwrap(), 14);
	}

	#[test]
	fn zero_timeout_is_rejected() {
		let err = timeout(0, SettingSource::Environment("NEARBY__PROVIDER__TIMEOUT_SECS"))
			.unwrap_err();
		assert!(err.to_string().contains("environment variable"));
		assert_eq!(
			timeout(5, SettingSource::ConfigKey("provider.timeout_secs")).unwrap(),
			Duration::from_secs(5)
		);
	}

	#[test]
	fn bad_longitude_blames_the_longitude_source() {
		let err = coordinate(
			("location.latitude", "location.longitude"),
			(35.0, 200.0),
			(
				SettingSource::CliFlag("--lat"),
				SettingSource::CliFlag("--lon"),
			),
		)
		.unwrap_err();
		assert_eq!(err.key, "location.longitude");
		assert!(err.to_string().contains("`--lon`"));
	}
}
