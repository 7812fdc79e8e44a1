//! UI building blocks shared across rendering and state modules.

/// Blocking "search failed" modal.
pub mod alert;
/// Autocomplete dropdown under the prompt.
pub mod candidates;
/// Map surface with location and result markers.
pub mod map;
/// Details panel for the selected place.
pub mod overlay;
/// Bordered panes holding a single centered message.
pub mod placeholder;
/// Input prompt rendering and progress display.
pub mod prompt;
/// Result row construction.
pub mod rows;
/// Scrollbar for viewports.
pub mod scrollbar;
/// Table rendering and configuration.
pub mod tables;

pub use alert::render_alert;
pub use candidates::{CandidatesContext, candidate_at, render_candidates};
pub use map::{MapContext, marker_at, render_map};
pub use overlay::{OverlayAreas, OverlayContext, render_overlay};
pub use placeholder::{render_notice, render_placeholder};
pub use prompt::{InputContext, ProgressState, render_input};
pub use scrollbar::{ScrollMetrics, point_in_rect, render_scrollbar};
pub use tables::render_table;
