//! Assembles a fully-wired advisor from the embedded seed data.

use skill_core::SkillAdvisor;

use crate::{LoadResult, baseline_statistics, default_schemas};

/// An advisor over the builtin registry document, the seeded dependency
/// rules, and the embedded schemas and baseline statistics.
///
/// This is the quickest way to a working advisor; embedders with their own
/// data wire [`SkillAdvisor::builder`] directly instead.
pub fn advisor_with_seed_data() -> LoadResult<SkillAdvisor> {
    let schemas = default_schemas()?;
    let statistics = baseline_statistics()?;

    Ok(SkillAdvisor::builder()
        .schemas(schemas)
        .statistics(statistics)
        .build())
}
