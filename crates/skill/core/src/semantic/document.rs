//! The versioned registry document.
//!
//! This is the single configuration artifact of the engine: a JSON document
//! holding the action ontology and the combination rule set. It round-trips
//! losslessly through load -> save so external editors and the registry can
//! share one file.

use chrono::{DateTime, Utc};

use super::info::{
    ActionDependency, ActionPurpose, ActionSemanticInfo, EffectProfile, RangeKind, TargetKind,
};
use super::rule::{CombinationRule, CombinationRuleKind};

/// Current document schema version.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Serialized form of the semantic registry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegistryDocument {
    pub version: String,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub actions: Vec<ActionSemanticInfo>,
    #[serde(default)]
    pub rules: Vec<CombinationRule>,
}

impl RegistryDocument {
    /// An empty document stamped with the current time.
    pub fn new() -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            last_modified: Utc::now(),
            actions: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Parses a document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Renders the document as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Updates the modification stamp; called on save.
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    /// Looks up an action entry by type.
    pub fn action(&self, action_type: &str) -> Option<&ActionSemanticInfo> {
        self.actions
            .iter()
            .find(|info| info.action_type == action_type)
    }

    /// Looks up a rule by name.
    pub fn rule(&self, rule_name: &str) -> Option<&CombinationRule> {
        self.rules.iter().find(|rule| rule.rule_name == rule_name)
    }

    /// The documented default set: four actions and five rules.
    ///
    /// This is what a registry bootstraps from when its backing document is
    /// missing or unreadable on first load. The `last_modified` stamp is the
    /// epoch placeholder until a save touches it, which keeps the builtin
    /// document deterministic.
    ///
    /// Incompatibility lists here are symmetric (damage <-> heal), so
    /// combination checks stay order-independent for the default data.
    pub fn builtin() -> Self {
        let actions = vec![
            ActionSemanticInfo::new("DamageAction", "Damage", "Damage")
                .with_priority(1.5)
                .with_purpose(ActionPurpose {
                    intents: strings(["deal damage", "burst down a target", "clear waves"]),
                    scenarios: strings(["boss burst", "wave clear", "duel pressure"]),
                    keywords: strings(["damage", "attack", "strike", "burn", "hurt"]),
                })
                .with_effect(EffectProfile {
                    primary_effect: "damage".to_string(),
                    secondary_effects: strings(["on-hit triggers"]),
                    target: TargetKind::SingleEnemy,
                    range: RangeKind::Melee,
                    instantaneous: true,
                })
                .with_dependency(ActionDependency {
                    prerequisites: Vec::new(),
                    incompatibles: strings(["HealAction"]),
                    synergies: strings(["MovementAction"]),
                    follow_ups: strings(["ShieldAction"]),
                }),
            ActionSemanticInfo::new("HealAction", "Heal", "Heal")
                .with_priority(1.2)
                .with_purpose(ActionPurpose {
                    intents: strings(["restore health", "sustain allies"]),
                    scenarios: strings(["ally sustain", "post-fight recovery"]),
                    keywords: strings(["heal", "restore", "regenerate", "recover"]),
                })
                .with_effect(EffectProfile {
                    primary_effect: "heal".to_string(),
                    secondary_effects: Vec::new(),
                    target: TargetKind::Ally,
                    range: RangeKind::Ranged,
                    instantaneous: true,
                })
                .with_dependency(ActionDependency {
                    prerequisites: Vec::new(),
                    incompatibles: strings(["DamageAction"]),
                    synergies: strings(["ShieldAction"]),
                    follow_ups: Vec::new(),
                }),
            ActionSemanticInfo::new("ShieldAction", "Shield", "Shield")
                .with_purpose(ActionPurpose {
                    intents: strings(["absorb incoming damage", "protect an ally"]),
                    scenarios: strings(["pre-engage cover", "clutch save"]),
                    keywords: strings(["shield", "absorb", "barrier", "block"]),
                })
                .with_effect(EffectProfile {
                    primary_effect: "shield".to_string(),
                    secondary_effects: strings(["break effect"]),
                    target: TargetKind::Ally,
                    range: RangeKind::Ranged,
                    instantaneous: false,
                })
                .with_dependency(ActionDependency {
                    prerequisites: Vec::new(),
                    incompatibles: Vec::new(),
                    synergies: strings(["HealAction"]),
                    follow_ups: strings(["HealAction"]),
                }),
            ActionSemanticInfo::new("MovementAction", "Movement", "Movement")
                .with_priority(0.8)
                .with_purpose(ActionPurpose {
                    intents: strings(["close the gap", "escape danger"]),
                    scenarios: strings(["gap close", "disengage"]),
                    keywords: strings(["dash", "teleport", "blink", "reposition", "move"]),
                })
                .with_effect(EffectProfile {
                    primary_effect: "displacement".to_string(),
                    secondary_effects: Vec::new(),
                    target: TargetKind::SelfTarget,
                    range: RangeKind::None,
                    instantaneous: true,
                })
                .with_dependency(ActionDependency {
                    prerequisites: Vec::new(),
                    incompatibles: Vec::new(),
                    synergies: strings(["DamageAction"]),
                    follow_ups: strings(["DamageAction"]),
                }),
        ];

        let rules = vec![
            CombinationRule::new(
                "Damage_Heal_Exclusive",
                CombinationRuleKind::Exclusive,
                ["DamageAction", "HealAction"],
            )
            .with_description("Damage and healing payloads conflict within a single skill")
            .with_priority(10),
            CombinationRule::new(
                "Movement_Shield_Exclusive",
                CombinationRuleKind::Exclusive,
                ["MovementAction", "ShieldAction"],
            )
            .with_description("Displacement drops the shield layer mid-cast")
            .with_priority(8),
            CombinationRule::new(
                "Damage_Movement_Synergy",
                CombinationRuleKind::Synergy,
                ["DamageAction", "MovementAction"],
            )
            .with_description("Gap-close into burst is a proven combo")
            .with_priority(5),
            CombinationRule::new(
                "Shield_Heal_Synergy",
                CombinationRuleKind::Synergy,
                ["ShieldAction", "HealAction"],
            )
            .with_description("Shield first, then top up health behind it")
            .with_priority(5),
            CombinationRule::new(
                "Heal_After_Shield_Prerequisite",
                CombinationRuleKind::Prerequisite,
                ["ShieldAction", "HealAction"],
            )
            .with_description("Healing plans assume a shield layer is already in place")
            .with_priority(3),
        ];

        Self {
            version: DOCUMENT_VERSION.to_string(),
            last_modified: DateTime::UNIX_EPOCH,
            actions,
            rules,
        }
    }
}

impl Default for RegistryDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn strings<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_documented_shape() {
        let doc = RegistryDocument::builtin();
        assert_eq!(doc.actions.len(), 4);
        assert_eq!(doc.rules.len(), 5);
        assert!(doc.action("DamageAction").is_some());
        assert!(doc.rule("Damage_Heal_Exclusive").is_some());

        // Default incompatibilities are symmetric.
        let damage = doc.action("DamageAction").unwrap();
        let heal = doc.action("HealAction").unwrap();
        assert!(damage.dependency.incompatibles.contains(&"HealAction".to_string()));
        assert!(heal.dependency.incompatibles.contains(&"DamageAction".to_string()));
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let doc = RegistryDocument::builtin();
        let json = doc.to_json_string().expect("serializes");
        let reparsed = RegistryDocument::from_json_str(&json).expect("parses back");
        assert_eq!(doc, reparsed);
    }
}
