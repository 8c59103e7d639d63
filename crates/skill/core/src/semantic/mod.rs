//! Semantic registry: the action ontology and combination rule set.
//!
//! The registry owns the curated knowledge about action types (purpose,
//! effect profile, dependency graph, business priority) and the named rules
//! constraining how actions combine. It is loaded from a versioned JSON
//! document, shared read-only across the engine, and hot-reloadable with
//! build-then-swap semantics.

pub mod document;
pub mod info;
pub mod registry;
pub mod rule;
pub mod source;

pub use document::{DOCUMENT_VERSION, RegistryDocument};
pub use info::{
    ActionDependency, ActionPurpose, ActionSemanticInfo, EffectProfile, RangeKind, TargetKind,
};
pub use registry::{RegistrySnapshot, SemanticRegistry};
pub use rule::{CombinationRule, CombinationRuleKind};
pub use source::{BuiltinSource, DocumentSource, FileSource, StaticSource};
