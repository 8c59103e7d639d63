//! Parameter schema loader.
//!
//! Loads the embedded schema definitions for the default action set.

use skill_core::{ActionSchema, SchemaRegistry};

use crate::LoadResult;

/// Schemas for the four default action types, from embedded RON data.
pub fn default_schemas() -> LoadResult<SchemaRegistry> {
    let ron = include_str!("../data/schemas/actions.ron");
    let schemas: Vec<ActionSchema> = ron::from_str(ron)
        .map_err(|e| anyhow::anyhow!("Failed to parse schemas/actions.ron: {}", e))?;
    Ok(schemas.into_iter().collect())
}
