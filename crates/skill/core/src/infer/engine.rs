//! Parameter value inference.
//!
//! For every field an action schema declares, the inferencer picks the best
//! available value source in fixed precedence: historical statistics, then a
//! curated graph default, then the field's own default. Confidence reflects
//! the source; validation of the complete inferred assignment closes the
//! loop.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::params::{
    FieldKind, FieldSpec, ParameterDependencyGraph, ParameterStatistics, SchemaRegistry,
    StatisticsSource,
};
use crate::value::{ParamMap, ParamValue, VALUE_EPSILON};

use super::types::{InferenceResult, ParameterInference};

/// Confidence below which a suggestion is flagged for manual confirmation.
const CONFIRMATION_THRESHOLD: f32 = 0.7;

/// Sample volume at which the count term of the confidence saturates.
const FULL_CONFIDENCE_SAMPLES: f64 = 20.0;

/// Suggests concrete parameter values for an action type.
pub struct ParameterInferencer {
    schemas: Arc<SchemaRegistry>,
    statistics: Arc<dyn StatisticsSource>,
    graph: Arc<ParameterDependencyGraph>,
}

impl ParameterInferencer {
    pub fn new(
        schemas: Arc<SchemaRegistry>,
        statistics: Arc<dyn StatisticsSource>,
        graph: Arc<ParameterDependencyGraph>,
    ) -> Self {
        Self {
            schemas,
            statistics,
            graph,
        }
    }

    /// Infers a value for every declared parameter of the action type.
    ///
    /// An action type without a registered schema yields an empty result;
    /// callers treat that as "nothing to infer", not as a failure. The
    /// returned validation verdict covers exactly the inferred assignment.
    pub fn infer(
        &self,
        action_type: &str,
        context: &str,
        reference_skills: &[String],
    ) -> InferenceResult {
        let Some(schema) = self.schemas.get(action_type) else {
            warn!(action_type, "no schema registered, nothing to infer");
            return InferenceResult::empty(action_type);
        };
        debug!(action_type, context, "inferring parameters");

        let references: Vec<String> = reference_skills.iter().take(3).cloned().collect();
        let mut inferences = Vec::with_capacity(schema.fields.len());
        let mut inferred_params = ParamMap::new();

        for field in &schema.fields {
            let mut inference = self.infer_field(action_type, field);
            inference.reference_skills = references.clone();

            inferred_params.insert(field.name.clone(), inference.recommended.clone());
            inferences.push(inference);
        }

        let validation = self.graph.validate(action_type, &inferred_params);

        InferenceResult {
            action_type: action_type.to_string(),
            inferences,
            validation,
        }
    }

    fn infer_field(&self, action_type: &str, field: &FieldSpec) -> ParameterInference {
        let range = self.graph.recommended_range(action_type, &field.name);

        let mut inference = if let Some(stats) = self
            .statistics
            .get(action_type, &field.name)
            .filter(|stats| stats.sample_count > 0 && field.kind.is_numeric())
        {
            from_statistics(field, &stats)
        } else if let Some(default) = self.graph.default_value(action_type, &field.name) {
            debug!(
                action_type,
                parameter = %field.name,
                "no usable statistics, falling back to the configured default"
            );
            ParameterInference {
                parameter: field.name.clone(),
                kind: field.kind.clone(),
                recommended: default,
                alternatives: Vec::new(),
                confidence: 0.5,
                recommended_min: None,
                recommended_max: None,
                reason: "configured system default".to_string(),
                needs_confirmation: false,
                reference_skills: Vec::new(),
            }
        } else {
            debug!(
                action_type,
                parameter = %field.name,
                "no statistics or configured default, using the type default"
            );
            ParameterInference {
                parameter: field.name.clone(),
                kind: field.kind.clone(),
                recommended: field.fallback_value(),
                alternatives: Vec::new(),
                confidence: 0.3,
                recommended_min: None,
                recommended_max: None,
                reason: format!(
                    "no historical data; using the {} default",
                    field.kind.name()
                ),
                needs_confirmation: true,
                reference_skills: Vec::new(),
            }
        };

        if let Some(range) = range {
            inference.recommended_min = range.min;
            inference.recommended_max = range.max;
        }
        inference
    }
}

/// Builds an inference from a historical distribution: the median as the
/// value, the quartiles as alternatives, and a confidence rewarding both
/// sample volume and low dispersion.
fn from_statistics(field: &FieldSpec, stats: &ParameterStatistics) -> ParameterInference {
    let volume = clamp01(f64::from(stats.sample_count) / FULL_CONFIDENCE_SAMPLES);
    let spread = clamp01(stats.std_dev / (stats.max - stats.min + VALUE_EPSILON));
    let confidence = (0.6 * volume + 0.4 * (1.0 - spread)) as f32;

    let mut reason = format!(
        "median of {} shipped skills (p25 {}, p75 {})",
        stats.sample_count, stats.p25, stats.p75
    );
    let needs_confirmation = confidence < CONFIRMATION_THRESHOLD;
    if needs_confirmation {
        reason.push_str("; low confidence, confirm manually");
    }

    ParameterInference {
        parameter: field.name.clone(),
        kind: field.kind.clone(),
        recommended: numeric_value(&field.kind, stats.median),
        alternatives: [stats.p25, stats.median, stats.p75]
            .into_iter()
            .map(|v| numeric_value(&field.kind, v))
            .collect(),
        confidence,
        recommended_min: None,
        recommended_max: None,
        reason,
        needs_confirmation,
        reference_skills: Vec::new(),
    }
}

fn numeric_value(kind: &FieldKind, value: f64) -> ParamValue {
    match kind {
        FieldKind::Int => ParamValue::Int(value.round() as i64),
        _ => ParamValue::Float(value),
    }
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MemoryStatistics;

    fn base_damage_stats(sample_count: u32) -> ParameterStatistics {
        ParameterStatistics {
            action_type: "DamageAction".to_string(),
            parameter: "base_damage".to_string(),
            sample_count,
            mean: 140.0,
            median: 120.0,
            std_dev: 80.0,
            min: 20.0,
            max: 500.0,
            p25: 80.0,
            p75: 200.0,
        }
    }

    fn damage_schema() -> SchemaRegistry {
        [crate::params::ActionSchema::new(
            "DamageAction",
            [
                crate::params::FieldSpec::new("base_damage", FieldKind::Float),
                crate::params::FieldSpec::new(
                    "damage_type",
                    FieldKind::Enum(vec!["Physical".to_string(), "Magical".to_string()]),
                ),
                crate::params::FieldSpec::new("spell_vamp_percentage", FieldKind::Float),
            ],
        )]
        .into_iter()
        .collect()
    }

    fn inferencer(stats: MemoryStatistics) -> ParameterInferencer {
        ParameterInferencer::new(
            Arc::new(damage_schema()),
            Arc::new(stats),
            Arc::new(ParameterDependencyGraph::with_defaults()),
        )
    }

    #[test]
    fn statistics_drive_value_alternatives_and_confidence() {
        let stats: MemoryStatistics = [base_damage_stats(50)].into_iter().collect();
        let result = inferencer(stats).infer("DamageAction", "burst skill", &[]);

        let inference = result.inference("base_damage").expect("inferred");
        assert_eq!(inference.recommended, ParamValue::Float(120.0));
        assert_eq!(
            inference.alternatives,
            vec![
                ParamValue::Float(80.0),
                ParamValue::Float(120.0),
                ParamValue::Float(200.0),
            ]
        );
        // 0.6 * 1.0 + 0.4 * (1 - 80 / 480.0001) = 0.9333...
        assert!((inference.confidence - 0.9333).abs() < 1e-3);
        assert!(!inference.needs_confirmation);
        // Range bounds come from the dependency graph.
        assert_eq!(inference.recommended_min, Some(1.0));
        assert_eq!(inference.recommended_max, Some(999.0));
    }

    #[test]
    fn sparse_statistics_trigger_confirmation() {
        let stats: MemoryStatistics = [base_damage_stats(3)].into_iter().collect();
        let result = inferencer(stats).infer("DamageAction", "", &[]);

        let inference = result.inference("base_damage").expect("inferred");
        // 0.6 * 0.15 + 0.4 * 0.8333 = 0.4233...
        assert!(inference.confidence < CONFIRMATION_THRESHOLD);
        assert!(inference.needs_confirmation);
        assert!(inference.reason.contains("confirm manually"));
    }

    #[test]
    fn fallback_chain_orders_graph_default_before_type_default() {
        let result = inferencer(MemoryStatistics::new()).infer("DamageAction", "", &[]);

        // damage_type has a curated graph default.
        let damage_type = result.inference("damage_type").expect("inferred");
        assert_eq!(
            damage_type.recommended,
            ParamValue::Enum("Physical".to_string())
        );
        assert_eq!(damage_type.confidence, 0.5);
        assert!(!damage_type.needs_confirmation);

        // base_damage has neither statistics nor a graph default.
        let base_damage = result.inference("base_damage").expect("inferred");
        assert_eq!(base_damage.recommended, ParamValue::Float(0.0));
        assert_eq!(base_damage.confidence, 0.3);
        assert!(base_damage.needs_confirmation);
    }

    #[test]
    fn unknown_action_type_yields_empty_result() {
        let result = inferencer(MemoryStatistics::new()).infer("MysteryAction", "", &[]);
        assert!(result.is_empty());
        assert!(result.validation.is_valid);
    }

    #[test]
    fn validation_covers_the_inferred_assignment() {
        // Statistics push spell_vamp_percentage to a non-zero value while the
        // graph default keeps damage_type at Physical; the exclusive rule
        // must fire on exactly the map that was inferred.
        let stats: MemoryStatistics = [ParameterStatistics {
            action_type: "DamageAction".to_string(),
            parameter: "spell_vamp_percentage".to_string(),
            sample_count: 40,
            mean: 12.0,
            median: 10.0,
            std_dev: 4.0,
            min: 1.0,
            max: 25.0,
            p25: 6.0,
            p75: 15.0,
        }]
        .into_iter()
        .collect();

        let result = inferencer(stats).infer("DamageAction", "", &[]);
        assert!(!result.validation.is_valid);
        assert!(
            result
                .validation
                .issues
                .iter()
                .any(|issue| issue.subject == "spell_vamp_percentage")
        );
    }

    #[test]
    fn reference_skills_are_capped_at_three() {
        let references: Vec<String> = ["a", "b", "c", "d"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let result = inferencer(MemoryStatistics::new()).infer("DamageAction", "", &references);

        for inference in &result.inferences {
            assert_eq!(inference.reference_skills.len(), 3);
        }
    }

    #[test]
    fn integer_fields_round_the_median() {
        let schemas: SchemaRegistry = [crate::params::ActionSchema::new(
            "TestAction",
            [crate::params::FieldSpec::new("hits", FieldKind::Int)],
        )]
        .into_iter()
        .collect();
        let stats: MemoryStatistics = [ParameterStatistics {
            action_type: "TestAction".to_string(),
            parameter: "hits".to_string(),
            sample_count: 30,
            mean: 3.4,
            median: 3.6,
            std_dev: 1.0,
            min: 1.0,
            max: 6.0,
            p25: 2.4,
            p75: 4.6,
        }]
        .into_iter()
        .collect();

        let inferencer = ParameterInferencer::new(
            Arc::new(schemas),
            Arc::new(stats),
            Arc::new(ParameterDependencyGraph::new()),
        );
        let result = inferencer.infer("TestAction", "", &[]);
        let inference = result.inference("hits").expect("inferred");
        assert_eq!(inference.recommended, ParamValue::Int(4));
        assert_eq!(
            inference.alternatives,
            vec![ParamValue::Int(2), ParamValue::Int(4), ParamValue::Int(5)]
        );
    }
}
