//! Core data models for folioterm
//!
//! Plain data shared by the session, the handlers, and the renderers.

pub mod output_entry;

// Re-exports for convenience
pub use output_entry::{OutputEntry, StyleClass};
