//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (load_service)
//! - `metrics` - Metric listing and impact queries
//! - `reason` - Reasoning runs
//! - `summary` - Department and executive summaries
//! - `serve` - Web server command

pub mod core;
pub mod metrics;
pub mod reason;
pub mod serve;
pub mod summary;

// Re-export command functions for main.rs
pub use core::*;
pub use metrics::*;
pub use reason::*;
pub use serve::*;
pub use summary::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
