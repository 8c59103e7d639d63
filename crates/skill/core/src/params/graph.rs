//! Dependency rule table over concrete parameter assignments.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::report::{IssueCode, Severity, ValidationIssue, ValidationResult};
use crate::value::{ParamMap, ParamValue};

use super::rule::{ParameterRule, ParameterRuleKind, ValueRange};

/// Rule table keyed by action type.
///
/// The graph validates fully-specified parameter maps and answers range and
/// default lookups for the inferencer. It is independent of the semantic
/// registry; rules arrive from the seeded defaults and from programmatic
/// registration.
#[derive(Clone, Debug, Default)]
pub struct ParameterDependencyGraph {
    rules: HashMap<String, Vec<ParameterRule>>,
}

impl ParameterDependencyGraph {
    /// An empty graph with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph seeded with the documented rule set for the default action
    /// types.
    pub fn with_defaults() -> Self {
        let mut graph = Self::new();
        for rule in default_rules() {
            graph.register(rule);
        }
        graph
    }

    /// Appends a rule. Existing rules for the same target stay in place and
    /// keep being evaluated.
    pub fn register(&mut self, rule: ParameterRule) {
        self.rules
            .entry(rule.action_type.clone())
            .or_default()
            .push(rule);
    }

    /// All rules registered for an action type, in registration order.
    pub fn rules_for(&self, action_type: &str) -> &[ParameterRule] {
        self.rules
            .get(action_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Checks a concrete assignment against every rule for the type.
    ///
    /// All rules are evaluated independently; issues accumulate without
    /// short-circuiting. An action type with no rules validates clean.
    pub fn validate(&self, action_type: &str, params: &ParamMap) -> ValidationResult {
        let mut result = ValidationResult::valid();

        for rule in self.rules_for(action_type) {
            match rule.kind {
                ParameterRuleKind::ConditionalRequired => {
                    if rule.source_matches(params)
                        && !params.contains_key(&rule.target_parameter)
                    {
                        result.push(
                            ValidationIssue::new(
                                Severity::Error,
                                IssueCode::RequiredMissing,
                                &rule.target_parameter,
                                format!(
                                    "'{}' is required when {} is {}",
                                    rule.target_parameter,
                                    rule.source_parameter,
                                    rule.source_value
                                ),
                            )
                            .with_explanation(&rule.explanation),
                        );
                    }
                }
                ParameterRuleKind::Exclusive => {
                    if rule.source_matches(params)
                        && params
                            .get(&rule.target_parameter)
                            .is_some_and(value_counts_as_set)
                    {
                        result.push(
                            ValidationIssue::new(
                                Severity::Warning,
                                IssueCode::ExclusiveParameter,
                                &rule.target_parameter,
                                format!(
                                    "'{}' has no effect when {} is {}",
                                    rule.target_parameter,
                                    rule.source_parameter,
                                    rule.source_value
                                ),
                            )
                            .with_explanation(&rule.explanation),
                        );
                    }
                }
                ParameterRuleKind::RangeConstraint => {
                    // Non-numeric values under a numeric rule skip the rule,
                    // they do not fail validation.
                    let Some(value) = params
                        .get(&rule.target_parameter)
                        .and_then(ParamValue::as_f64)
                    else {
                        continue;
                    };

                    if let Some(min) = rule.min
                        && value < min
                    {
                        result.push(
                            ValidationIssue::new(
                                Severity::Warning,
                                IssueCode::OutOfRange,
                                &rule.target_parameter,
                                format!(
                                    "'{}' is {} but the minimum is {}",
                                    rule.target_parameter, value, min
                                ),
                            )
                            .with_explanation(&rule.explanation),
                        );
                    }
                    if let Some(max) = rule.max
                        && value > max
                    {
                        result.push(
                            ValidationIssue::new(
                                Severity::Warning,
                                IssueCode::OutOfRange,
                                &rule.target_parameter,
                                format!(
                                    "'{}' is {} but the maximum is {}",
                                    rule.target_parameter, value, max
                                ),
                            )
                            .with_explanation(&rule.explanation),
                        );
                    }
                }
                ParameterRuleKind::DefaultValue => {}
            }
        }

        result
    }

    /// Bounds of the first range rule for the parameter, if any.
    pub fn recommended_range(&self, action_type: &str, parameter: &str) -> Option<ValueRange> {
        self.rules_for(action_type)
            .iter()
            .find(|rule| {
                rule.kind == ParameterRuleKind::RangeConstraint
                    && rule.target_parameter == parameter
            })
            .map(ParameterRule::bounds)
    }

    /// Curated default for the parameter from the first default rule
    /// carrying a value.
    pub fn default_value(&self, action_type: &str, parameter: &str) -> Option<ParamValue> {
        self.rules_for(action_type)
            .iter()
            .filter(|rule| {
                rule.kind == ParameterRuleKind::DefaultValue
                    && rule.target_parameter == parameter
            })
            .find_map(|rule| rule.default.clone())
    }

    /// Human-readable summary of the rules for an action type, grouped by
    /// kind. Presentation only.
    pub fn dependency_report(&self, action_type: &str) -> String {
        let rules = self.rules_for(action_type);
        if rules.is_empty() {
            return format!("No parameter dependencies registered for {action_type}");
        }

        let mut report = format!("Parameter dependencies for {action_type}:\n");
        for (kind, title) in [
            (ParameterRuleKind::ConditionalRequired, "Required"),
            (ParameterRuleKind::Exclusive, "Excluded"),
            (ParameterRuleKind::RangeConstraint, "Ranges"),
            (ParameterRuleKind::DefaultValue, "Defaults"),
        ] {
            for rule in rules.iter().filter(|rule| rule.kind == kind) {
                let _ = match kind {
                    ParameterRuleKind::ConditionalRequired => writeln!(
                        report,
                        "  [{title}] {} (when {} is {})",
                        rule.target_parameter, rule.source_parameter, rule.source_value
                    ),
                    ParameterRuleKind::Exclusive => writeln!(
                        report,
                        "  [{title}] {} (when {} is {})",
                        rule.target_parameter, rule.source_parameter, rule.source_value
                    ),
                    ParameterRuleKind::RangeConstraint => writeln!(
                        report,
                        "  [{title}] {} in [{}, {}]",
                        rule.target_parameter,
                        rule.min.map_or("-".to_string(), |v| v.to_string()),
                        rule.max.map_or("-".to_string(), |v| v.to_string()),
                    ),
                    ParameterRuleKind::DefaultValue => writeln!(
                        report,
                        "  [{title}] {} = {}",
                        rule.target_parameter,
                        rule.default
                            .as_ref()
                            .map_or("-".to_string(), ToString::to_string),
                    ),
                };
            }
        }
        report
    }
}

/// "Set" for exclusive-rule purposes: numeric and meaningfully non-zero, or
/// any non-numeric value.
fn value_counts_as_set(value: &ParamValue) -> bool {
    !value.is_zero()
}

/// The documented seed rules for the four default action types.
fn default_rules() -> Vec<ParameterRule> {
    vec![
        // DamageAction
        ParameterRule::exclusive(
            "DamageAction",
            "damage_type",
            "Physical",
            "spell_vamp_percentage",
            "Spell vamp only procs on magical damage",
        ),
        ParameterRule::conditional_required(
            "DamageAction",
            "damage_type",
            "Magical",
            "element",
            "Magical damage needs an element for resistance lookup",
        ),
        ParameterRule::range(
            "DamageAction",
            "base_damage",
            Some(1.0),
            Some(999.0),
            "Balance envelope for a single damage instance",
        ),
        ParameterRule::range(
            "DamageAction",
            "crit_multiplier",
            Some(1.0),
            Some(5.0),
            "Crits below 1x are a data error, above 5x break scaling",
        ),
        ParameterRule::default_value(
            "DamageAction",
            "damage_type",
            ParamValue::Enum("Physical".to_string()),
            "Physical is the common case for new skills",
        ),
        // HealAction
        ParameterRule::conditional_required(
            "HealAction",
            "heal_mode",
            "Percentage",
            "percentage",
            "Percentage healing needs the percentage value",
        ),
        ParameterRule::exclusive(
            "HealAction",
            "heal_mode",
            "Flat",
            "percentage",
            "Flat healing ignores the percentage field",
        ),
        ParameterRule::range(
            "HealAction",
            "heal_amount",
            Some(1.0),
            Some(500.0),
            "Balance envelope for a single heal instance",
        ),
        ParameterRule::default_value(
            "HealAction",
            "heal_mode",
            ParamValue::Enum("Flat".to_string()),
            "Flat healing is predictable for designers",
        ),
        // ShieldAction
        ParameterRule::conditional_required(
            "ShieldAction",
            "break_effect",
            "true",
            "break_damage",
            "A break effect needs its damage payload",
        ),
        ParameterRule::range(
            "ShieldAction",
            "shield_amount",
            Some(1.0),
            Some(2000.0),
            "Balance envelope for shield strength",
        ),
        ParameterRule::range(
            "ShieldAction",
            "duration",
            Some(0.5),
            Some(30.0),
            "Shields shorter than a tick or longer than a fight are bugs",
        ),
        ParameterRule::default_value(
            "ShieldAction",
            "duration",
            ParamValue::Float(5.0),
            "Five seconds covers one engage window",
        ),
        // MovementAction
        ParameterRule::exclusive(
            "MovementAction",
            "movement_type",
            "Teleport",
            "speed",
            "Teleports are instantaneous, speed does not apply",
        ),
        ParameterRule::conditional_required(
            "MovementAction",
            "movement_type",
            "Teleport",
            "ignore_obstacles",
            "Teleports must state whether terrain blocks them",
        ),
        ParameterRule::range(
            "MovementAction",
            "distance",
            Some(0.5),
            Some(50.0),
            "Map-scale sanity bounds for displacement",
        ),
        ParameterRule::default_value(
            "MovementAction",
            "movement_type",
            ParamValue::Enum("Dash".to_string()),
            "Dashes are the baseline movement verb",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physical_with_vamp() -> ParamMap {
        let mut params = ParamMap::new();
        params.insert(
            "damage_type".to_string(),
            ParamValue::Enum("Physical".to_string()),
        );
        params.insert("spell_vamp_percentage".to_string(), ParamValue::Float(5.0));
        params
    }

    #[test]
    fn exclusive_violation_is_a_single_warning() {
        let graph = ParameterDependencyGraph::with_defaults();
        let result = graph.validate("DamageAction", &physical_with_vamp());

        assert!(!result.is_valid);
        assert_eq!(result.issues.len(), 1);
        let issue = &result.issues[0];
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.code, IssueCode::ExclusiveParameter);
        assert_eq!(issue.subject, "spell_vamp_percentage");
    }

    #[test]
    fn zero_valued_exclusive_target_passes() {
        let graph = ParameterDependencyGraph::with_defaults();
        let mut params = physical_with_vamp();
        params.insert("spell_vamp_percentage".to_string(), ParamValue::Float(0.0));

        let result = graph.validate("DamageAction", &params);
        assert!(result.is_valid, "a zeroed target is not meaningfully set");
    }

    #[test]
    fn conditional_requirement_fires_only_when_condition_holds() {
        let graph = ParameterDependencyGraph::with_defaults();

        let mut magical = ParamMap::new();
        magical.insert(
            "damage_type".to_string(),
            ParamValue::Enum("Magical".to_string()),
        );
        let result = graph.validate("DamageAction", &magical);
        assert!(!result.is_valid);
        assert_eq!(result.issues[0].code, IssueCode::RequiredMissing);
        assert_eq!(result.issues[0].severity, Severity::Error);
        assert_eq!(result.issues[0].subject, "element");

        magical.insert(
            "element".to_string(),
            ParamValue::Enum("Fire".to_string()),
        );
        assert!(graph.validate("DamageAction", &magical).is_valid);
    }

    #[test]
    fn range_violations_emit_one_issue_per_bound() {
        let mut graph = ParameterDependencyGraph::new();
        graph.register(ParameterRule::range(
            "TestAction",
            "value",
            Some(10.0),
            Some(20.0),
            "",
        ));
        // A second rule on the same target is evaluated too.
        graph.register(ParameterRule::range(
            "TestAction",
            "value",
            Some(12.0),
            None,
            "",
        ));

        let mut params = ParamMap::new();
        params.insert("value".to_string(), ParamValue::Float(5.0));
        let result = graph.validate("TestAction", &params);
        assert_eq!(result.issues.len(), 2, "both min bounds violated");
        assert!(
            result
                .issues
                .iter()
                .all(|issue| issue.code == IssueCode::OutOfRange)
        );
    }

    #[test]
    fn non_numeric_value_skips_range_rule() {
        let graph = ParameterDependencyGraph::with_defaults();
        let mut params = ParamMap::new();
        params.insert(
            "base_damage".to_string(),
            ParamValue::Text("high".to_string()),
        );

        let result = graph.validate("DamageAction", &params);
        assert!(result.is_valid, "non-numeric values skip numeric rules");
    }

    #[test]
    fn unknown_action_type_validates_clean() {
        let graph = ParameterDependencyGraph::with_defaults();
        let mut params = ParamMap::new();
        params.insert("anything".to_string(), ParamValue::Float(1e9));
        assert!(graph.validate("UnknownAction", &params).is_valid);
    }

    #[test]
    fn lookups_return_first_matching_rule() {
        let graph = ParameterDependencyGraph::with_defaults();

        let range = graph
            .recommended_range("DamageAction", "base_damage")
            .expect("seeded");
        assert_eq!(range.min, Some(1.0));
        assert_eq!(range.max, Some(999.0));
        assert!(graph.recommended_range("DamageAction", "element").is_none());

        assert_eq!(
            graph.default_value("DamageAction", "damage_type"),
            Some(ParamValue::Enum("Physical".to_string()))
        );
        assert!(graph.default_value("DamageAction", "base_damage").is_none());
    }

    #[test]
    fn report_groups_rules_by_kind() {
        let graph = ParameterDependencyGraph::with_defaults();
        let report = graph.dependency_report("DamageAction");
        assert!(report.contains("[Required] element"));
        assert!(report.contains("[Excluded] spell_vamp_percentage"));
        assert!(report.contains("[Ranges] base_damage in [1, 999]"));
        assert!(report.contains("[Defaults] damage_type = Physical"));

        assert!(
            graph
                .dependency_report("UnknownAction")
                .starts_with("No parameter dependencies")
        );
    }
}
