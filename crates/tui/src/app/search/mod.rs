//! Search coordination.
//!
//! This module drains the startup events (location, provider bootstrap),
//! turns prompt actions into requests for the background search runtime, and
//! folds accepted responses back into the session.

mod coordination;
