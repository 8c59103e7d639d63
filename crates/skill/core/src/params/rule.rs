//! Per-parameter dependency rules.

use crate::value::{ParamMap, ParamValue};

/// What a parameter rule asserts.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum ParameterRuleKind {
    /// When the source condition holds, the target parameter must be set.
    ConditionalRequired,
    /// When the source condition holds, a set target parameter is suspect.
    Exclusive,
    /// Supplies a curated value for the target parameter; never validates.
    DefaultValue,
    /// The target parameter must fall inside the configured bounds.
    RangeConstraint,
}

/// An inclusive numeric range with optional bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValueRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ValueRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// One dependency rule scoped to a single action type.
///
/// Several rules may target the same `(action_type, target_parameter)` pair;
/// validation evaluates all of them and collects issues additively.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParameterRule {
    pub action_type: String,
    pub kind: ParameterRuleKind,
    /// Parameter whose value activates the rule; unused by range and default
    /// rules.
    #[serde(default)]
    pub source_parameter: String,
    /// Literal the source value must render to for the rule to apply.
    #[serde(default)]
    pub source_value: String,
    pub target_parameter: String,
    #[serde(default)]
    pub default: Option<ParamValue>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    /// Designer-facing justification, copied into issues and inferences.
    #[serde(default)]
    pub explanation: String,
}

impl ParameterRule {
    /// A rule requiring `target` whenever `source` renders to `source_value`.
    pub fn conditional_required(
        action_type: impl Into<String>,
        source: impl Into<String>,
        source_value: impl Into<String>,
        target: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            action_type: action_type.into(),
            kind: ParameterRuleKind::ConditionalRequired,
            source_parameter: source.into(),
            source_value: source_value.into(),
            target_parameter: target.into(),
            default: None,
            min: None,
            max: None,
            explanation: explanation.into(),
        }
    }

    /// A rule flagging `target` as out of place whenever `source` renders to
    /// `source_value`.
    pub fn exclusive(
        action_type: impl Into<String>,
        source: impl Into<String>,
        source_value: impl Into<String>,
        target: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            action_type: action_type.into(),
            kind: ParameterRuleKind::Exclusive,
            source_parameter: source.into(),
            source_value: source_value.into(),
            target_parameter: target.into(),
            default: None,
            min: None,
            max: None,
            explanation: explanation.into(),
        }
    }

    /// A curated default for `target`.
    pub fn default_value(
        action_type: impl Into<String>,
        target: impl Into<String>,
        value: ParamValue,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            action_type: action_type.into(),
            kind: ParameterRuleKind::DefaultValue,
            source_parameter: String::new(),
            source_value: String::new(),
            target_parameter: target.into(),
            default: Some(value),
            min: None,
            max: None,
            explanation: explanation.into(),
        }
    }

    /// An inclusive range constraint on `target`; either bound may be open.
    pub fn range(
        action_type: impl Into<String>,
        target: impl Into<String>,
        min: Option<f64>,
        max: Option<f64>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            action_type: action_type.into(),
            kind: ParameterRuleKind::RangeConstraint,
            source_parameter: String::new(),
            source_value: String::new(),
            target_parameter: target.into(),
            default: None,
            min,
            max,
            explanation: explanation.into(),
        }
    }

    /// The configured bounds as a [`ValueRange`], for range rules.
    pub fn bounds(&self) -> ValueRange {
        ValueRange::new(self.min, self.max)
    }

    /// True when the activating condition holds for the given assignment.
    ///
    /// The comparison is against the value's canonical text, exactly as the
    /// rule author wrote it.
    pub fn source_matches(&self, params: &ParamMap) -> bool {
        params
            .get(&self.source_parameter)
            .is_some_and(|value| value.matches_str(&self.source_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_matching_is_exact_text() {
        let rule = ParameterRule::exclusive(
            "DamageAction",
            "damage_type",
            "Physical",
            "spell_vamp_percentage",
            "physical damage cannot spell-vamp",
        );

        let mut params = ParamMap::new();
        params.insert(
            "damage_type".to_string(),
            ParamValue::Enum("Physical".to_string()),
        );
        assert!(rule.source_matches(&params));

        params.insert(
            "damage_type".to_string(),
            ParamValue::Enum("physical".to_string()),
        );
        assert!(!rule.source_matches(&params), "comparison is case-sensitive");

        params.remove("damage_type");
        assert!(!rule.source_matches(&params), "absent source never matches");
    }

    #[test]
    fn open_bounds_accept_everything_on_that_side() {
        let range = ValueRange::new(Some(1.0), None);
        assert!(range.contains(1.0));
        assert!(range.contains(1e9));
        assert!(!range.contains(0.5));
    }
}
