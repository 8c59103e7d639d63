//! Embedded seed data for the skill advisor.
//!
//! This crate ships the data a working advisor needs out of the box:
//! - parameter schemas for the default action set (data-driven via RON)
//! - baseline parameter statistics (data-driven via RON)
//!
//! Content is compiled in via `include_str!` and parsed with serde; loaders
//! hand back `skill-core` types directly.

pub mod factory;
pub mod schemas;
pub mod statistics;

pub use factory::advisor_with_seed_data;
pub use schemas::default_schemas;
pub use statistics::baseline_statistics;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;
