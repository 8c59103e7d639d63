//! Baseline statistics loader.

use skill_core::{MemoryStatistics, ParameterStatistics};

use crate::LoadResult;

/// Baseline parameter distributions from embedded RON data.
pub fn baseline_statistics() -> LoadResult<MemoryStatistics> {
    let ron = include_str!("../data/statistics/baseline.ron");
    let entries: Vec<ParameterStatistics> = ron::from_str(ron)
        .map_err(|e| anyhow::anyhow!("Failed to parse statistics/baseline.ron: {}", e))?;
    Ok(entries.into_iter().collect())
}
