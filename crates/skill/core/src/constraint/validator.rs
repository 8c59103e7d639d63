//! Rule checking for single actions and action combinations.

use std::sync::Arc;

use crate::report::{IssueCode, Severity, ValidationIssue};
use crate::semantic::{CombinationRuleKind, RegistrySnapshot, SemanticRegistry};

/// Checks actions against the registry's ontology and combination rules.
///
/// Every check reads one registry snapshot, so results stay internally
/// consistent even while a reload runs. Violations come back as issue lists;
/// the validator itself never fails.
#[derive(Clone)]
pub struct ConstraintValidator {
    registry: Arc<SemanticRegistry>,
}

impl ConstraintValidator {
    pub fn new(registry: Arc<SemanticRegistry>) -> Self {
        Self { registry }
    }

    /// Checks whether an action fits the free-text query context.
    ///
    /// Action types without semantic info always pass, as do entries with no
    /// configured keywords or intents. A configured entry that matches
    /// nothing in the context yields a single warning, never a hard failure.
    pub fn validate_single(&self, action_type: &str, context: &str) -> Vec<ValidationIssue> {
        let snapshot = self.registry.snapshot();
        let Some(info) = snapshot.info(action_type) else {
            return Vec::new();
        };
        if info.purpose.is_unconstrained() {
            return Vec::new();
        }

        let context = context.to_lowercase();
        let matched = info
            .purpose
            .keywords
            .iter()
            .chain(&info.purpose.intents)
            .any(|needle| context.contains(&needle.to_lowercase()));
        if matched {
            return Vec::new();
        }

        vec![ValidationIssue::new(
            Severity::Warning,
            IssueCode::ContextMismatch,
            action_type,
            format!(
                "no keyword or intent of '{}' matches the query context",
                info.display_name
            ),
        )]
    }

    /// Checks a set of action types against combination rules and the
    /// ontology's relational lists.
    ///
    /// Three passes run over the same input and their issues concatenate:
    /// exclusive rules, missing prerequisites, and the pairwise
    /// incompatibility scan. The pairwise scan inspects only the earlier
    /// action's `incompatibles` for each `i < j` pair; the rule pass is
    /// direction-agnostic and covers the symmetric cases. The two passes
    /// overlap by design and are kept separate so asymmetric incompatibility
    /// lists keep reporting exactly as authored.
    pub fn validate_combination(&self, action_types: &[String]) -> Vec<ValidationIssue> {
        let snapshot = self.registry.snapshot();
        let mut issues = Vec::new();

        for rule in snapshot.rules_of_kind(CombinationRuleKind::Exclusive) {
            let matched = rule.members_in(action_types);
            if matched.len() > 1 {
                issues.push(
                    ValidationIssue::new(
                        Severity::Error,
                        IssueCode::ExclusiveRule,
                        &rule.rule_name,
                        format!(
                            "exclusive rule '{}' matched {}",
                            rule.rule_name,
                            matched.join(", ")
                        ),
                    )
                    .with_explanation(&rule.description),
                );
            }
        }

        for action_type in action_types {
            let Some(info) = snapshot.info(action_type) else {
                continue;
            };
            for prerequisite in &info.dependency.prerequisites {
                if !action_types.contains(prerequisite) {
                    issues.push(ValidationIssue::new(
                        Severity::Warning,
                        IssueCode::MissingPrerequisite,
                        action_type,
                        format!("'{action_type}' expects '{prerequisite}' in the combination"),
                    ));
                }
            }
        }

        for (i, earlier) in action_types.iter().enumerate() {
            let Some(info) = snapshot.info(earlier) else {
                continue;
            };
            for later in &action_types[i + 1..] {
                if info.dependency.incompatibles.contains(later) {
                    issues.push(ValidationIssue::new(
                        Severity::Error,
                        IssueCode::IncompatiblePair,
                        earlier,
                        format!("'{earlier}' is incompatible with '{later}'"),
                    ));
                }
            }
        }

        issues
    }

    /// Greedy, order-preserving removal of mutually exclusive actions.
    ///
    /// Walks the input in its given order (callers pass similarity-ranked
    /// lists) and keeps an action only if it conflicts with nothing already
    /// kept. First seen wins.
    pub fn filter_exclusive(&self, action_types: &[String]) -> Vec<String> {
        let snapshot = self.registry.snapshot();
        let mut kept: Vec<String> = Vec::new();

        for candidate in action_types {
            let conflicts = kept
                .iter()
                .any(|held| self.pair_exclusive(&snapshot, held, candidate));
            if !conflicts {
                kept.push(candidate.clone());
            }
        }
        kept
    }

    /// True when the two types cannot share a skill: either a shared enabled
    /// exclusive rule or an incompatibility declared on either side.
    fn pair_exclusive(&self, snapshot: &RegistrySnapshot, a: &str, b: &str) -> bool {
        let rule_conflict = snapshot
            .rules_of_kind(CombinationRuleKind::Exclusive)
            .iter()
            .any(|rule| rule.involves(a) && rule.involves(b));
        if rule_conflict {
            return true;
        }

        let declared = |from: &str, to: &str| {
            snapshot
                .info(from)
                .is_some_and(|info| info.dependency.incompatibles.iter().any(|t| t == to))
        };
        declared(a, b) || declared(b, a)
    }

    /// Action types that pair well with the given one: the ontology's
    /// synergy list merged with co-members of enabled synergy rules,
    /// deduplicated, the type itself excluded.
    pub fn synergy_recommendations(&self, action_type: &str) -> Vec<String> {
        let snapshot = self.registry.snapshot();
        let mut synergies: Vec<String> = Vec::new();

        if let Some(info) = snapshot.info(action_type) {
            for synergy in &info.dependency.synergies {
                push_unique(&mut synergies, synergy, action_type);
            }
        }
        for rule in snapshot.rules_of_kind(CombinationRuleKind::Synergy) {
            if rule.involves(action_type) {
                for member in &rule.action_types {
                    push_unique(&mut synergies, member, action_type);
                }
            }
        }
        synergies
    }

    /// Natural next actions after the given one, straight from the ontology.
    pub fn follow_up_recommendations(&self, action_type: &str) -> Vec<String> {
        self.registry
            .snapshot()
            .info(action_type)
            .map(|info| info.dependency.follow_ups.clone())
            .unwrap_or_default()
    }
}

fn push_unique(list: &mut Vec<String>, candidate: &str, excluded: &str) {
    if candidate != excluded && !list.iter().any(|existing| existing == candidate) {
        list.push(candidate.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> ConstraintValidator {
        ConstraintValidator::new(Arc::new(SemanticRegistry::with_builtin()))
    }

    fn types(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unknown_action_passes_context_check() {
        let issues = validator().validate_single("UnregisteredAction", "burst damage combo");
        assert!(issues.is_empty());
    }

    #[test]
    fn context_miss_is_one_warning() {
        let validator = validator();

        assert!(
            validator
                .validate_single("DamageAction", "need a strong ATTACK skill")
                .is_empty(),
            "keyword match is case-insensitive"
        );

        let issues = validator.validate_single("DamageAction", "picking flowers");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].code, IssueCode::ContextMismatch);
    }

    #[test]
    fn exclusive_rule_names_all_matched_members() {
        let issues = validator().validate_combination(&types(&["DamageAction", "HealAction"]));

        let exclusive: Vec<_> = issues
            .iter()
            .filter(|issue| issue.code == IssueCode::ExclusiveRule)
            .collect();
        assert_eq!(exclusive.len(), 1);
        assert!(exclusive[0].message.contains("Damage_Heal_Exclusive"));
        assert!(exclusive[0].message.contains("DamageAction"));
        assert!(exclusive[0].message.contains("HealAction"));
    }

    #[test]
    fn combination_verdict_survives_reordering() {
        let validator = validator();
        let forward = validator.validate_combination(&types(&["DamageAction", "HealAction"]));
        let backward = validator.validate_combination(&types(&["HealAction", "DamageAction"]));

        // Same issue codes regardless of input order; only ordering within
        // the list may differ.
        let codes = |issues: &[ValidationIssue]| {
            let mut codes: Vec<_> = issues.iter().map(|issue| issue.code).collect();
            codes.sort_by_key(|code| format!("{code:?}"));
            codes
        };
        assert_eq!(codes(&forward), codes(&backward));
    }

    #[test]
    fn missing_prerequisite_is_a_warning_per_absent_type() {
        use crate::semantic::{
            ActionDependency, ActionSemanticInfo, RegistryDocument, StaticSource,
        };

        let mut document = RegistryDocument::builtin();
        document.actions.push(
            ActionSemanticInfo::new("ComboFinisherAction", "Finisher", "Damage").with_dependency(
                ActionDependency {
                    prerequisites: vec!["DamageAction".to_string(), "MovementAction".to_string()],
                    incompatibles: Vec::new(),
                    synergies: Vec::new(),
                    follow_ups: Vec::new(),
                },
            ),
        );
        let validator = ConstraintValidator::new(Arc::new(SemanticRegistry::open(
            StaticSource::new(document, "finisher"),
        )));

        let issues =
            validator.validate_combination(&types(&["ComboFinisherAction", "DamageAction"]));
        let missing: Vec<_> = issues
            .iter()
            .filter(|issue| issue.code == IssueCode::MissingPrerequisite)
            .collect();
        assert_eq!(missing.len(), 1, "one warning per absent prerequisite");
        assert_eq!(missing[0].severity, Severity::Warning);
        assert!(missing[0].message.contains("MovementAction"));

        let complete = validator.validate_combination(&types(&[
            "ComboFinisherAction",
            "DamageAction",
            "MovementAction",
        ]));
        assert!(
            complete
                .iter()
                .all(|issue| issue.code != IssueCode::MissingPrerequisite)
        );
    }

    #[test]
    fn filter_keeps_first_seen_and_preserves_order() {
        let validator = validator();

        // HealAction conflicts with the already-kept DamageAction;
        // MovementAction conflicts with nothing kept.
        let kept = validator.filter_exclusive(&types(&[
            "DamageAction",
            "HealAction",
            "MovementAction",
        ]));
        assert_eq!(kept, types(&["DamageAction", "MovementAction"]));

        // Reversed input flips the winner: first seen wins.
        let kept = validator.filter_exclusive(&types(&["HealAction", "DamageAction"]));
        assert_eq!(kept, types(&["HealAction"]));
    }

    #[test]
    fn synergies_merge_ontology_and_rules() {
        let validator = validator();

        // Ontology lists MovementAction; the Damage_Movement_Synergy rule
        // contributes the same pair, deduplicated, self excluded.
        let synergies = validator.synergy_recommendations("DamageAction");
        assert_eq!(synergies, types(&["MovementAction"]));

        let follow_ups = validator.follow_up_recommendations("ShieldAction");
        assert_eq!(follow_ups, types(&["HealAction"]));

        assert!(validator.synergy_recommendations("UnknownAction").is_empty());
        assert!(validator.follow_up_recommendations("UnknownAction").is_empty());
    }
}
