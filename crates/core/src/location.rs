//! One-shot location acquisition with a fixed fallback.
//!
//! The lookup runs exactly once per session. Whatever happens, the caller
//! ends up with a coordinate: either the reported one or the fallback, and a
//! failure is only logged.

use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::events::SessionEvent;
use crate::geo::{Coordinate, CoordinateError};
use crate::provider::HttpClient;

/// Default IP geolocation endpoint.
pub const DEFAULT_IP_ENDPOINT: &str = "http://ip-api.com/json";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
	#[error("location permission denied")]
	Denied,
	#[error("location lookup timed out")]
	Timeout,
	#[error("location lookup is not supported")]
	Unsupported,
	#[error("location lookup failed: {0}")]
	Lookup(String),
	#[error("location service reported an invalid coordinate: {0}")]
	Invalid(#[from] CoordinateError),
}

/// Something that can report the user's position once.
pub trait LocationSource: Send {
	/// Short name used in logs.
	fn name(&self) -> &'static str;

	fn locate(&self) -> Result<Coordinate, LocationError>;
}

/// Outcome of the acquisition step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
	pub coordinate: Coordinate,
	/// `true` when the lookup failed and the fallback was used.
	pub fallback: bool,
}

/// A configured position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

impl LocationSource for FixedLocation {
	fn name(&self) -> &'static str {
		"fixed"
	}

	fn locate(&self) -> Result<Coordinate, LocationError> {
		Ok(self.0)
	}
}

/// Location disabled; always falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl LocationSource for Unsupported {
	fn name(&self) -> &'static str {
		"none"
	}

	fn locate(&self) -> Result<Coordinate, LocationError> {
		Err(LocationError::Unsupported)
	}
}

/// Approximate position from the public IP address.
pub struct IpLocation<C: HttpClient> {
	client: C,
	endpoint: String,
}

impl<C: HttpClient> IpLocation<C> {
	pub fn new(client: C, endpoint: impl Into<String>) -> Self {
		Self {
			client,
			endpoint: endpoint.into(),
		}
	}
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
	status: String,
	lat: Option<f64>,
	lon: Option<f64>,
	message: Option<String>,
}

impl<C: HttpClient> LocationSource for IpLocation<C> {
	fn name(&self) -> &'static str {
		"ip"
	}

	fn locate(&self) -> Result<Coordinate, LocationError> {
		let body = self
			.client
			.get(&self.endpoint)
			.map_err(|err| LocationError::Lookup(err.to_string()))?;
		let response: IpLookupResponse = serde_json::from_slice(&body)
			.map_err(|err| LocationError::Lookup(format!("invalid response: {err}")))?;

		if response.status != "success" {
			return Err(LocationError::Lookup(
				response
					.message
					.unwrap_or_else(|| format!("status {}", response.status)),
			));
		}

		match (response.lat, response.lon) {
			(Some(lat), Some(lon)) => Ok(Coordinate::new(lat, lon)?),
			_ => Err(LocationError::Lookup("response carried no coordinate".into())),
		}
	}
}

/// Run the lookup once, substituting `fallback` on any failure.
pub fn acquire(source: &dyn LocationSource, fallback: Coordinate) -> LocationFix {
	match source.locate() {
		Ok(coordinate) => {
			info!(source = source.name(), %coordinate, "location acquired");
			LocationFix {
				coordinate,
				fallback: false,
			}
		}
		Err(err) => {
			warn!(source = source.name(), %err, %fallback, "location unavailable, using fallback");
			LocationFix {
				coordinate: fallback,
				fallback: true,
			}
		}
	}
}

/// Acquire the location on a background thread and report it once.
pub fn spawn_acquisition(
	source: Box<dyn LocationSource>,
	fallback: Coordinate,
	tx: Sender<SessionEvent>,
) -> JoinHandle<()> {
	thread::spawn(move || {
		let fix = acquire(source.as_ref(), fallback);
		let _ = tx.send(SessionEvent::Located(fix));
	})
}
