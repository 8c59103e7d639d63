//! Named combination rules over sets of action types.

fn default_enabled() -> bool {
    true
}

/// What a combination rule asserts about its member set.
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
pub enum CombinationRuleKind {
    /// At most one member may appear in a combination.
    Exclusive,
    /// Members describe a required pairing (documentation for designers;
    /// combination checks enforce prerequisites from the ontology instead).
    Prerequisite,
    /// Members amplify each other; feeds recommendations, never blocks.
    Synergy,
}

/// A named constraint over a set of action types.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CombinationRule {
    /// Unique key across the registry.
    pub rule_name: String,
    pub kind: CombinationRuleKind,
    /// Member set; order carries no meaning.
    pub action_types: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Descriptive ordering for editors. Evaluation never consults it.
    #[serde(default)]
    pub priority: i32,
    /// Disabled rules are excluded from every registry query.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl CombinationRule {
    pub fn new<I, S>(rule_name: impl Into<String>, kind: CombinationRuleKind, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rule_name: rule_name.into(),
            kind,
            action_types: members.into_iter().map(Into::into).collect(),
            description: String::new(),
            priority: 0,
            enabled: true,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// True if the rule's member set contains the action type.
    pub fn involves(&self, action_type: &str) -> bool {
        self.action_types.iter().any(|member| member == action_type)
    }

    /// Members of this rule that appear in the given pool, in rule order.
    pub fn members_in<'a>(&'a self, pool: &[String]) -> Vec<&'a str> {
        self.action_types
            .iter()
            .filter(|member| pool.iter().any(|candidate| candidate == *member))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_in_respects_rule_order() {
        let rule = CombinationRule::new(
            "Damage_Heal_Exclusive",
            CombinationRuleKind::Exclusive,
            ["DamageAction", "HealAction"],
        );

        let pool = vec!["HealAction".to_string(), "DamageAction".to_string()];
        assert_eq!(rule.members_in(&pool), vec!["DamageAction", "HealAction"]);
        assert!(rule.involves("HealAction"));
        assert!(!rule.involves("ShieldAction"));
    }
}
