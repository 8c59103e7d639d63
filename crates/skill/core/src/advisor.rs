//! High-level advisor facade.
//!
//! [`SkillAdvisor`] wires the registry, validator, scorer, dependency graph,
//! and inferencer together behind one handle. Construction goes through
//! [`AdvisorBuilder`]; there is deliberately no global instance, so tests and
//! embedders assemble isolated advisors with their own data.

use std::sync::Arc;

use crate::constraint::ConstraintValidator;
use crate::error::DocumentError;
use crate::infer::{InferenceResult, ParameterInferencer};
use crate::params::{
    ActionSchema, MemoryStatistics, ParameterDependencyGraph, ParameterRule, SchemaRegistry,
    StatisticsSource, ValueRange,
};
use crate::recommend::{
    ActionCandidate, EnhancedRecommendation, RecommendationScorer, ScoreWeights, explain,
};
use crate::report::ValidationResult;
use crate::semantic::{DocumentSource, SemanticRegistry};
use crate::value::ParamMap;

/// One-stop entry point over the whole recommendation engine.
pub struct SkillAdvisor {
    registry: Arc<SemanticRegistry>,
    validator: ConstraintValidator,
    scorer: RecommendationScorer,
    graph: Arc<ParameterDependencyGraph>,
    inferencer: ParameterInferencer,
}

impl SkillAdvisor {
    pub fn builder() -> AdvisorBuilder {
        AdvisorBuilder::new()
    }

    /// Advisor over the builtin document and seeded dependency rules, with
    /// no schemas or statistics. Good enough for combination checks and
    /// scoring; inference needs data from the builder.
    pub fn with_defaults() -> Self {
        Self::builder().build()
    }

    /// Scores, validates, explains, and ranks a candidate list.
    ///
    /// `existing` holds action types already placed in the skill under
    /// construction; combination checks run against them. `max_results == 0`
    /// means no limit.
    pub fn enhance(
        &self,
        candidates: &[ActionCandidate],
        context: &str,
        existing: &[String],
        filter_invalid: bool,
        max_results: usize,
    ) -> Vec<EnhancedRecommendation> {
        let mut scored = self.scorer.score(candidates, context, existing);

        for recommendation in &mut scored {
            let action_type = recommendation.action_type().to_string();
            let info = self.registry.info(&action_type);
            let synergies = self.validator.synergy_recommendations(&action_type);
            let follow_ups = self.validator.follow_up_recommendations(&action_type);
            explain::annotate(
                recommendation,
                info.as_ref(),
                context,
                existing,
                &synergies,
                &follow_ups,
            );
        }

        self.scorer.filter_and_rank(scored, filter_invalid, max_results)
    }

    /// Checks a set of action types against combination rules.
    pub fn validate_combination(&self, action_types: &[String]) -> ValidationResult {
        ValidationResult::from_issues(self.validator.validate_combination(action_types))
    }

    /// Action types that pair well with the given one.
    pub fn synergies_of(&self, action_type: &str) -> Vec<String> {
        self.validator.synergy_recommendations(action_type)
    }

    /// Natural next actions after the given one.
    pub fn follow_ups_of(&self, action_type: &str) -> Vec<String> {
        self.validator.follow_up_recommendations(action_type)
    }

    /// Suggests parameter values for an action type.
    pub fn infer_parameters(
        &self,
        action_type: &str,
        context: &str,
        reference_skills: &[String],
    ) -> InferenceResult {
        self.inferencer.infer(action_type, context, reference_skills)
    }

    /// Validates a concrete parameter assignment.
    pub fn validate_parameters(
        &self,
        action_type: &str,
        params: &ParamMap,
    ) -> ValidationResult {
        self.graph.validate(action_type, params)
    }

    /// Recommended bounds for a parameter, if a range rule exists.
    pub fn recommended_range(&self, action_type: &str, parameter: &str) -> Option<ValueRange> {
        self.graph.recommended_range(action_type, parameter)
    }

    /// Re-reads the registry document; on failure the live data stays.
    pub fn reload_registry(&self) -> Result<(), DocumentError> {
        self.registry.reload()
    }

    /// Replaces the scoring weights (normalized to sum to 1).
    pub fn set_weights(&self, semantic: f32, business: f32) {
        self.scorer.set_weights(semantic, business);
    }

    pub fn weights(&self) -> ScoreWeights {
        self.scorer.weights()
    }

    pub fn registry(&self) -> &Arc<SemanticRegistry> {
        &self.registry
    }

    pub fn dependency_graph(&self) -> &Arc<ParameterDependencyGraph> {
        &self.graph
    }
}

/// Builder for [`SkillAdvisor`] with flexible data wiring.
pub struct AdvisorBuilder {
    source: Option<Box<dyn DocumentSource>>,
    schemas: SchemaRegistry,
    statistics: Option<Arc<dyn StatisticsSource>>,
    graph: Option<ParameterDependencyGraph>,
    extra_rules: Vec<ParameterRule>,
    weights: Option<(f32, f32)>,
}

impl AdvisorBuilder {
    fn new() -> Self {
        Self {
            source: None,
            schemas: SchemaRegistry::new(),
            statistics: None,
            graph: None,
            extra_rules: Vec::new(),
            weights: None,
        }
    }

    /// Where the registry document comes from (default: builtin document).
    pub fn document_source(mut self, source: impl DocumentSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Replaces the schema registry used for inference.
    pub fn schemas(mut self, schemas: SchemaRegistry) -> Self {
        self.schemas = schemas;
        self
    }

    /// Adds one schema to the registry used for inference.
    pub fn schema(mut self, schema: ActionSchema) -> Self {
        self.schemas.register(schema);
        self
    }

    /// Statistics source for inference (default: empty).
    pub fn statistics(mut self, statistics: impl StatisticsSource + 'static) -> Self {
        self.statistics = Some(Arc::new(statistics));
        self
    }

    /// Replaces the dependency graph entirely (default: seeded defaults).
    pub fn dependency_graph(mut self, graph: ParameterDependencyGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Registers an extra parameter rule on top of the graph.
    pub fn parameter_rule(mut self, rule: ParameterRule) -> Self {
        self.extra_rules.push(rule);
        self
    }

    /// Initial scoring weights (default 0.7/0.3, normalized).
    pub fn weights(mut self, semantic: f32, business: f32) -> Self {
        self.weights = Some((semantic, business));
        self
    }

    pub fn build(self) -> SkillAdvisor {
        let registry = Arc::new(match self.source {
            Some(source) => SemanticRegistry::open_boxed(source),
            None => SemanticRegistry::with_builtin(),
        });

        let validator = ConstraintValidator::new(Arc::clone(&registry));
        let scorer = RecommendationScorer::new(Arc::clone(&registry), validator.clone());
        if let Some((semantic, business)) = self.weights {
            scorer.set_weights(semantic, business);
        }

        let mut graph = self
            .graph
            .unwrap_or_else(ParameterDependencyGraph::with_defaults);
        for rule in self.extra_rules {
            graph.register(rule);
        }
        let graph = Arc::new(graph);

        let statistics = self
            .statistics
            .unwrap_or_else(|| Arc::new(MemoryStatistics::new()));
        let inferencer = ParameterInferencer::new(
            Arc::new(self.schemas),
            statistics,
            Arc::clone(&graph),
        );

        SkillAdvisor {
            registry,
            validator,
            scorer,
            graph,
            inferencer,
        }
    }
}

impl Default for AdvisorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
