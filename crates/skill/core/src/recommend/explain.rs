//! Structured explanations for scored recommendations.
//!
//! Everything here derives deterministically from data the scorer and
//! validator already computed; annotation adds no new state and consults no
//! new sources.

use crate::semantic::ActionSemanticInfo;

use super::candidate::EnhancedRecommendation;

/// Similarity floor below which a candidate gets a verification warning.
const LOW_SIMILARITY: f32 = 0.4;

/// Fills `reasons`, `warnings`, and `suggestions` on a scored entry.
pub fn annotate(
    recommendation: &mut EnhancedRecommendation,
    info: Option<&ActionSemanticInfo>,
    context: &str,
    existing: &[String],
    synergies: &[String],
    follow_ups: &[String],
) {
    recommendation.reasons =
        build_reasons(recommendation, info, context, existing, synergies);
    recommendation.warnings = build_warnings(recommendation, info, existing);
    recommendation.suggestions =
        build_suggestions(recommendation, info, synergies, follow_ups);
}

fn build_reasons(
    recommendation: &EnhancedRecommendation,
    info: Option<&ActionSemanticInfo>,
    context: &str,
    existing: &[String],
    synergies: &[String],
) -> Vec<String> {
    let mut reasons = Vec::new();

    let similarity = recommendation.similarity();
    if let Some(tier) = similarity_tier(similarity) {
        reasons.push(format!(
            "{tier} semantic match for the request (similarity {similarity:.2})"
        ));
    }

    if !recommendation.candidate.category.is_empty() {
        reasons.push(format!(
            "belongs to the {} category",
            recommendation.candidate.category
        ));
    }

    if let Some(info) = info {
        let matched = matched_keywords(info, context);
        if !matched.is_empty() {
            reasons.push(format!("matches keywords: {}", matched.join(", ")));
        }

        if info.business_priority > 1.0 {
            reasons.push(format!(
                "curated business priority {:.1} boosts this action",
                info.business_priority
            ));
        }
    }

    let paired: Vec<&str> = synergies
        .iter()
        .filter(|synergy| existing.contains(synergy))
        .map(String::as_str)
        .collect();
    if !paired.is_empty() {
        reasons.push(format!(
            "synergizes with already-selected {}",
            paired.join(", ")
        ));
    }

    reasons
}

fn build_warnings(
    recommendation: &EnhancedRecommendation,
    info: Option<&ActionSemanticInfo>,
    existing: &[String],
) -> Vec<String> {
    let mut warnings = recommendation.validation_issues.clone();

    if let Some(info) = info
        && !existing.is_empty()
    {
        for incompatible in &info.dependency.incompatibles {
            if existing.contains(incompatible) {
                warnings.push(format!(
                    "incompatible with already-selected '{incompatible}'"
                ));
            }
        }
        for prerequisite in &info.dependency.prerequisites {
            if !existing.contains(prerequisite) {
                warnings.push(format!(
                    "prerequisite '{prerequisite}' is not among the selected actions"
                ));
            }
        }
    }

    let similarity = recommendation.similarity();
    if similarity < LOW_SIMILARITY {
        warnings.push(format!(
            "low semantic similarity ({similarity:.2}); verify the match manually"
        ));
    }

    warnings
}

fn build_suggestions(
    recommendation: &EnhancedRecommendation,
    info: Option<&ActionSemanticInfo>,
    synergies: &[String],
    follow_ups: &[String],
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if !synergies.is_empty() {
        suggestions.push(format!("consider pairing with {}", synergies.join(", ")));
    }
    if !follow_ups.is_empty() {
        suggestions.push(format!("often followed by {}", follow_ups.join(", ")));
    }

    if let Some(info) = info
        && !info.purpose.scenarios.is_empty()
    {
        suggestions.push(format!(
            "typical scenarios: {}",
            info.purpose.scenarios.join(", ")
        ));
    }

    suggestions.push(parameter_hint(&recommendation.candidate.category).to_string());
    suggestions
}

fn similarity_tier(similarity: f32) -> Option<&'static str> {
    if similarity >= 0.8 {
        Some("strong")
    } else if similarity >= 0.6 {
        Some("good")
    } else if similarity >= 0.4 {
        Some("partial")
    } else {
        None
    }
}

fn matched_keywords<'a>(info: &'a ActionSemanticInfo, context: &str) -> Vec<&'a str> {
    let context = context.to_lowercase();
    info.purpose
        .keywords
        .iter()
        .filter(|keyword| context.contains(&keyword.to_lowercase()))
        .map(String::as_str)
        .collect()
}

/// Static per-category starting point for parameter tuning.
fn parameter_hint(category: &str) -> &'static str {
    match category {
        "Damage" => "tune base_damage and crit_multiplier first",
        "Heal" => "tune heal_amount and heal_mode first",
        "Shield" => "tune shield_amount and duration first",
        "Movement" => "tune distance and speed first",
        "Control" => "tune duration and resistance interactions first",
        _ => "review the action's required parameters before committing",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::candidate::ActionCandidate;
    use crate::semantic::RegistryDocument;

    fn damage_info() -> ActionSemanticInfo {
        RegistryDocument::builtin()
            .action("DamageAction")
            .cloned()
            .expect("builtin entry")
    }

    fn scored(similarity: f32) -> EnhancedRecommendation {
        EnhancedRecommendation::scored(
            ActionCandidate::new("DamageAction", "Damage", "Damage", similarity),
            1.5,
            similarity,
        )
    }

    #[test]
    fn annotation_is_deterministic() {
        let info = damage_info();
        let existing = vec!["MovementAction".to_string()];
        let synergies = vec!["MovementAction".to_string()];
        let follow_ups = vec!["ShieldAction".to_string()];

        let mut first = scored(0.9);
        let mut second = scored(0.9);
        for rec in [&mut first, &mut second] {
            annotate(
                rec,
                Some(&info),
                "burst damage opener",
                &existing,
                &synergies,
                &follow_ups,
            );
        }
        assert_eq!(first, second);
    }

    #[test]
    fn reasons_cover_tier_keywords_priority_and_synergy() {
        let info = damage_info();
        let mut rec = scored(0.85);
        annotate(
            &mut rec,
            Some(&info),
            "heavy damage burst",
            &["MovementAction".to_string()],
            &["MovementAction".to_string()],
            &[],
        );

        assert!(rec.reasons.iter().any(|r| r.starts_with("strong")));
        assert!(rec.reasons.iter().any(|r| r.contains("damage")));
        assert!(rec.reasons.iter().any(|r| r.contains("priority 1.5")));
        assert!(rec.reasons.iter().any(|r| r.contains("MovementAction")));
    }

    #[test]
    fn low_similarity_warns_instead_of_reasoning() {
        let mut rec = scored(0.2);
        annotate(&mut rec, None, "", &[], &[], &[]);

        assert!(!rec.reasons.iter().any(|r| r.contains("semantic match")));
        assert!(rec.warnings.iter().any(|w| w.contains("low semantic similarity")));
        // The per-category hint is always present.
        assert!(rec.suggestions.iter().any(|s| s.contains("base_damage")));
    }

    #[test]
    fn incompatibility_with_existing_selection_warns() {
        let info = damage_info();
        let mut rec = scored(0.9);
        annotate(
            &mut rec,
            Some(&info),
            "damage",
            &["HealAction".to_string()],
            &[],
            &[],
        );

        assert!(
            rec.warnings
                .iter()
                .any(|w| w.contains("incompatible with already-selected 'HealAction'"))
        );
    }
}
