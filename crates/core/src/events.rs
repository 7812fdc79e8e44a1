//! Events delivered to the UI thread by the one-shot background sources.

use std::fmt;
use std::sync::Arc;

use crate::location::LocationFix;
use crate::provider::{PlacesProvider, ProviderError};

/// Completion of one of the session's startup tasks.
pub enum SessionEvent {
	/// The location lookup finished (possibly with the fallback).
	Located(LocationFix),
	/// The places provider finished bootstrapping.
	ProviderLoaded(Result<Arc<dyn PlacesProvider>, ProviderError>),
}

impl fmt::Debug for SessionEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Located(fix) => f.debug_tuple("Located").field(fix).finish(),
			Self::ProviderLoaded(Ok(_)) => f.write_str("ProviderLoaded(Ok(..))"),
			Self::ProviderLoaded(Err(err)) => {
				f.debug_tuple("ProviderLoaded").field(&Err::<(), _>(err)).finish()
			}
		}
	}
}
