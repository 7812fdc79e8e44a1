//! Core application state and behavior for the map search view.
//!
//! The [`App`] type aggregates the session, UI state, and rendering logic.
//! Supporting modules partition the implementation into focused pieces:
//! actions (input handling), rendering, the map mount lifecycle, the
//! autocomplete dropdown, and search coordination.

mod actions;
mod candidates;
mod map;
mod render;
mod results;
mod search;
mod state;

pub use state::App;
