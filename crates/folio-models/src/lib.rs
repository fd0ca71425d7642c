//! Shared data models for the Reelfolio gallery.
//!
//! This crate provides Serde-serializable types for:
//! - Video records and ids
//! - The category selector (with the reserved "All" sentinel)
//! - The manifest file and its invariants

pub mod category;
pub mod error;
pub mod manifest;
pub mod video;

// Re-export common types
pub use category::{CategoryFilter, ALL_CATEGORIES};
pub use error::{ManifestViolation, ModelError, ModelResult};
pub use manifest::Manifest;
pub use video::{VideoId, VideoRecord};
