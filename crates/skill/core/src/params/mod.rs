//! Parameter-level knowledge: schemas, dependency rules, and statistics.

pub mod graph;
pub mod rule;
pub mod schema;
pub mod stats;

pub use graph::ParameterDependencyGraph;
pub use rule::{ParameterRule, ParameterRuleKind, ValueRange};
pub use schema::{ActionSchema, FieldKind, FieldSpec, SchemaRegistry};
pub use stats::{MemoryStatistics, ParameterStatistics, StatisticsSource, stats_key};
