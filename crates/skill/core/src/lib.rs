//! Rules-and-ranking engine for skill-building action recommendations.
//!
//! `skill-core` turns raw similarity-ranked action candidates into
//! trustworthy, explainable recommendations: it re-scores them against
//! curated business priority, flags rule-violating combinations, and infers
//! concrete parameter values with calibrated confidence. The pieces compose
//! behind [`advisor::SkillAdvisor`]; each is also usable on its own.
pub mod advisor;
pub mod constraint;
pub mod error;
pub mod infer;
pub mod params;
pub mod recommend;
pub mod report;
pub mod semantic;
pub mod value;

pub use advisor::{AdvisorBuilder, SkillAdvisor};
pub use constraint::ConstraintValidator;
pub use error::DocumentError;
pub use infer::{InferenceResult, ParameterInference, ParameterInferencer};
pub use params::{
    ActionSchema, FieldKind, FieldSpec, MemoryStatistics, ParameterDependencyGraph, ParameterRule,
    ParameterRuleKind, ParameterStatistics, SchemaRegistry, StatisticsSource, ValueRange,
};
pub use recommend::{ActionCandidate, EnhancedRecommendation, RecommendationScorer, ScoreWeights};
pub use report::{IssueCode, Severity, ValidationIssue, ValidationResult};
pub use semantic::{
    ActionDependency, ActionPurpose, ActionSemanticInfo, BuiltinSource, CombinationRule,
    CombinationRuleKind, DocumentSource, EffectProfile, FileSource, RangeKind, RegistryDocument,
    RegistrySnapshot, SemanticRegistry, StaticSource, TargetKind,
};
pub use value::{CurveShape, ParamMap, ParamValue, VALUE_EPSILON};
