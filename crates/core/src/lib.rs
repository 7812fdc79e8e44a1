//! Core building blocks for the `nearby` map search client.
//!
//! Everything in this crate is independent of the terminal: session state,
//! the one-shot location lookup, the places provider client, and the
//! orchestration functions that fold provider responses back into the
//! session. The `nearby-tui` crate drives these from its event loop.

pub mod events;
pub mod geo;
pub mod location;
pub mod map;
pub mod place;
pub mod provider;
pub mod search;
pub mod session;

pub use crate::events::SessionEvent;
pub use crate::geo::{Coordinate, CoordinateError, FALLBACK_COORDINATE};
pub use crate::location::{LocationError, LocationFix, LocationSource};
pub use crate::map::{DEFAULT_ZOOM, MapHandle, MapMount, Viewport};
pub use crate::place::{PlaceId, PlaceResult, ResultSet};
pub use crate::provider::{
	PlacesProvider, ProviderError, ProviderSettings, ProviderStatus, SearchStatus,
};
pub use crate::search::{
	NEARBY_RADIUS_METERS, PickOutcome, SearchAlert, SearchFailure, SearchOutcome, SearchRuntime,
};
pub use crate::session::{SessionOutcome, SessionState};
