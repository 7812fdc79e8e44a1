//! Configuration loading and resolution.
//!
//! `load` layers config files, environment variables and CLI flags (lowest
//! to highest precedence) and returns a validated [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::{LocationChoice, ResolvedConfig};
