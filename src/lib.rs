//! Roomie Match - compatibility scoring and matching service for the Roomie roommate finder
//!
//! This library provides the compatibility score between two students'
//! lifestyle surveys and the ranking pipeline that orders candidate roommates
//! by that score, plus the HTTP service around them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_compatibility, MatchError, Matcher};
pub use models::{CompatibilityResult, FilterCriteria, PreferenceProfile, UserRecord};
pub use services::{MemoryStore, UserStore};
