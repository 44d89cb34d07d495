//! Dashboard rendering and display formatting.
//!
//! Pure presentation: these functions turn a snapshot into HTML or
//! terminal text and never touch the network or filesystem.

pub mod format;
pub mod html;
pub mod text;

// Re-export main types
pub use html::{render_dashboard, DashboardConfig};
pub use text::render_text_summary;
