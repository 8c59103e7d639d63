//! Weighted scoring and ranking of action candidates.

use std::cmp::Ordering;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::constraint::ConstraintValidator;
use crate::report::IssueCode;
use crate::semantic::SemanticRegistry;

use super::candidate::{ActionCandidate, EnhancedRecommendation};

/// Relative weight of semantic similarity versus business priority.
///
/// The two components always sum to 1; construction normalizes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScoreWeights {
    pub semantic: f32,
    pub business: f32,
}

impl ScoreWeights {
    /// Normalizes an arbitrary weight pair so the components sum to 1.
    ///
    /// A non-finite or non-positive sum falls back to the 0.7/0.3 defaults
    /// instead of producing a degenerate scorer.
    pub fn normalized(semantic: f32, business: f32) -> Self {
        let sum = semantic + business;
        if !sum.is_finite() || sum <= 0.0 {
            return Self::default();
        }
        Self {
            semantic: semantic / sum,
            business: business / sum,
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            semantic: 0.7,
            business: 0.3,
        }
    }
}

/// Applied to the final score of any candidate that fails validation.
const INVALID_PENALTY: f32 = 0.5;

/// Turns raw similarity-ranked candidates into calibrated, validated,
/// explained recommendations.
pub struct RecommendationScorer {
    registry: Arc<SemanticRegistry>,
    validator: ConstraintValidator,
    weights: RwLock<ScoreWeights>,
}

impl RecommendationScorer {
    pub fn new(registry: Arc<SemanticRegistry>, validator: ConstraintValidator) -> Self {
        Self {
            registry,
            validator,
            weights: RwLock::new(ScoreWeights::default()),
        }
    }

    /// Replaces the scoring weights; inputs are normalized to sum to 1.
    pub fn set_weights(&self, semantic: f32, business: f32) {
        let mut guard = self.weights.write().unwrap_or_else(PoisonError::into_inner);
        *guard = ScoreWeights::normalized(semantic, business);
    }

    pub fn weights(&self) -> ScoreWeights {
        *self.weights.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Scores and validates candidates against the query context and any
    /// already-selected actions.
    ///
    /// `final = clamp01(similarity * Ws + (business / 2) * Wb)`; the business
    /// priority's nominal 0-2 range is halved into 0-1 before weighting. Any
    /// validation finding marks the entry invalid and halves the final score
    /// after clamping, so the penalty is exactly a factor of two. The result
    /// is sorted by score descending, input order preserved on ties.
    pub fn score(
        &self,
        candidates: &[ActionCandidate],
        context: &str,
        existing: &[String],
    ) -> Vec<EnhancedRecommendation> {
        let weights = self.weights();
        let mut scored: Vec<EnhancedRecommendation> = candidates
            .iter()
            .map(|candidate| self.score_one(candidate, context, existing, weights))
            .collect();

        sort_by_score(&mut scored);
        scored
    }

    fn score_one(
        &self,
        candidate: &ActionCandidate,
        context: &str,
        existing: &[String],
        weights: ScoreWeights,
    ) -> EnhancedRecommendation {
        let business = self.registry.business_priority(&candidate.action_type);
        let raw = candidate.similarity * weights.semantic + (business / 2.0) * weights.business;
        let mut recommendation =
            EnhancedRecommendation::scored(candidate.clone(), business, raw.clamp(0.0, 1.0));

        let mut issues = self
            .validator
            .validate_single(&candidate.action_type, context);
        if !existing.is_empty() {
            let mut combined: Vec<String> = existing.to_vec();
            combined.push(candidate.action_type.clone());
            issues.extend(self.validator.validate_combination(&combined));
        }

        if !issues.is_empty() {
            recommendation.is_valid = false;
            // Deliberately not re-clamped: the penalty is exactly half.
            recommendation.final_score *= INVALID_PENALTY;
            recommendation.validation_issues =
                issues.iter().map(ToString::to_string).collect();
        }

        recommendation
    }

    /// Final ranking stage: optionally drops invalid entries, re-sorts, and
    /// truncates. `max_results == 0` means no limit.
    ///
    /// Logs the exclusivity ratio of the surviving list as a health
    /// diagnostic; the ratio never influences the result.
    pub fn filter_and_rank(
        &self,
        mut recommendations: Vec<EnhancedRecommendation>,
        filter_invalid: bool,
        max_results: usize,
    ) -> Vec<EnhancedRecommendation> {
        if filter_invalid {
            recommendations.retain(|rec| rec.is_valid);
        }
        sort_by_score(&mut recommendations);
        if max_results > 0 {
            recommendations.truncate(max_results);
        }

        debug!(
            results = recommendations.len(),
            exclusivity_ratio = self.exclusivity_ratio(&recommendations),
            "ranked recommendation list"
        );
        recommendations
    }

    /// Fraction of unordered pairs in the list that are mutually exclusive,
    /// judged by the combination validator's typed findings.
    pub fn exclusivity_ratio(&self, recommendations: &[EnhancedRecommendation]) -> f32 {
        let n = recommendations.len();
        if n < 2 {
            return 0.0;
        }

        let mut exclusive_pairs = 0usize;
        let mut total_pairs = 0usize;
        for i in 0..n {
            for j in (i + 1)..n {
                total_pairs += 1;
                let pair = vec![
                    recommendations[i].action_type().to_string(),
                    recommendations[j].action_type().to_string(),
                ];
                let conflicting = self.validator.validate_combination(&pair).iter().any(|issue| {
                    matches!(
                        issue.code,
                        IssueCode::ExclusiveRule | IssueCode::IncompatiblePair
                    )
                });
                if conflicting {
                    exclusive_pairs += 1;
                }
            }
        }
        exclusive_pairs as f32 / total_pairs as f32
    }
}

/// Stable descending sort; equal scores keep their input order.
fn sort_by_score(recommendations: &mut [EnhancedRecommendation]) {
    recommendations.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> RecommendationScorer {
        let registry = Arc::new(SemanticRegistry::with_builtin());
        let validator = ConstraintValidator::new(Arc::clone(&registry));
        RecommendationScorer::new(registry, validator)
    }

    #[test]
    fn weights_always_sum_to_one() {
        for (a, b) in [(0.7, 0.3), (7.0, 3.0), (1.0, 0.0), (0.25, 0.25)] {
            let weights = ScoreWeights::normalized(a, b);
            assert!((weights.semantic + weights.business - 1.0).abs() < 1e-6);
        }

        // Degenerate inputs fall back to the defaults.
        for (a, b) in [(0.0, 0.0), (-1.0, 1.0), (f32::NAN, 0.5), (f32::INFINITY, 1.0)] {
            assert_eq!(ScoreWeights::normalized(a, b), ScoreWeights::default());
        }
    }

    #[test]
    fn default_weight_scoring_matches_hand_arithmetic() {
        let scorer = scorer();
        // Unknown types score at neutral priority with no validation drag.
        let candidates = vec![
            ActionCandidate::new("AlphaAction", "Alpha", "Misc", 0.9),
            ActionCandidate::new("BetaAction", "Beta", "Misc", 0.5),
        ];

        let scored = scorer.score(&candidates, "", &[]);
        assert_eq!(scored[0].action_type(), "AlphaAction");
        // 0.9 * 0.7 + (1.0 / 2) * 0.3 = 0.78
        assert!((scored[0].final_score - 0.78).abs() < 1e-6);
        // 0.5 * 0.7 + 0.5 * 0.3 = 0.50
        assert!((scored[1].final_score - 0.50).abs() < 1e-6);
    }

    #[test]
    fn invalid_candidates_score_exactly_half() {
        let scorer = scorer();
        let candidate = vec![ActionCandidate::new(
            "HealAction",
            "Heal",
            "Heal",
            0.8,
        )];

        let clean = scorer.score(&candidate, "restore health after the fight", &[]);
        assert!(clean[0].is_valid);

        // Combining with DamageAction trips the exclusive rule.
        let existing = vec!["DamageAction".to_string()];
        let penalized = scorer.score(&candidate, "restore health after the fight", &existing);
        assert!(!penalized[0].is_valid);
        assert!(!penalized[0].validation_issues.is_empty());
        assert!((penalized[0].final_score - clean[0].final_score * 0.5).abs() < 1e-6);
    }

    #[test]
    fn ties_preserve_input_order() {
        let scorer = scorer();
        let candidates = vec![
            ActionCandidate::new("FirstAction", "First", "Misc", 0.6),
            ActionCandidate::new("SecondAction", "Second", "Misc", 0.6),
        ];

        let scored = scorer.score(&candidates, "", &[]);
        assert_eq!(scored[0].action_type(), "FirstAction");
        assert_eq!(scored[1].action_type(), "SecondAction");
    }

    #[test]
    fn filter_and_rank_truncates_after_filtering() {
        let scorer = scorer();
        let mut list = vec![
            EnhancedRecommendation::scored(
                ActionCandidate::new("AlphaAction", "Alpha", "Misc", 0.9),
                1.0,
                0.9,
            ),
            EnhancedRecommendation::scored(
                ActionCandidate::new("BetaAction", "Beta", "Misc", 0.7),
                1.0,
                0.7,
            ),
        ];
        list[1].is_valid = false;

        let kept = scorer.filter_and_rank(list.clone(), true, 0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].action_type(), "AlphaAction");

        let truncated = scorer.filter_and_rank(list, false, 1);
        assert_eq!(truncated.len(), 1);
    }

    #[test]
    fn exclusivity_ratio_counts_conflicting_pairs() {
        let scorer = scorer();
        let list: Vec<EnhancedRecommendation> = ["DamageAction", "HealAction", "MovementAction"]
            .iter()
            .map(|ty| {
                EnhancedRecommendation::scored(
                    ActionCandidate::new(*ty, *ty, "Misc", 0.5),
                    1.0,
                    0.5,
                )
            })
            .collect();

        // Damage/Heal conflict; Damage/Movement and Heal/Movement do not.
        let ratio = scorer.exclusivity_ratio(&list);
        assert!((ratio - 1.0 / 3.0).abs() < 1e-6);

        assert_eq!(scorer.exclusivity_ratio(&list[..1]), 0.0);
    }
}
