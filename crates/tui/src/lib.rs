//! Interactive terminal UI for `nearby`.
//!
//! This crate owns the event loop and everything drawn on screen: the search
//! prompt, the map surface with its markers and overlay, the result list, the
//! autocomplete dropdown and the blocking alert. Session state and provider
//! access come from `nearby-core`.

mod app;
pub mod components;
mod config;
pub mod input;
mod link;
mod runtime;
pub mod style;
#[cfg(test)]
mod test_support;

pub use app::App;
pub use config::{SessionOptions, UiLabels};
pub use runtime::{run, show_missing_config};

pub use crate::input::QueryInput;
pub use crate::style::{StyleConfig, Theme, builtin_themes, by_name, default_theme, names};
