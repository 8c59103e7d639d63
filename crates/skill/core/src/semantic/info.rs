//! Per-action ontology entries.
//!
//! One [`ActionSemanticInfo`] describes what an action type is *for*: the
//! intents and keywords it answers to, the effect it delivers, and how it
//! relates to other action types. Entries are authored in the registry
//! document; action types absent from the registry are a valid state and
//! every consumer degrades to a pass for them.

fn default_business_priority() -> f32 {
    1.0
}

/// How an action's effect lands, descriptive only in this engine.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum TargetKind {
    /// One hostile target.
    #[default]
    SingleEnemy,
    /// Several hostile targets.
    MultiEnemy,
    /// The caster itself.
    SelfTarget,
    /// One friendly target.
    Ally,
    /// A ground area rather than entities.
    Area,
}

/// Delivery range class, descriptive only in this engine.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum RangeKind {
    #[default]
    Melee,
    Ranged,
    Global,
    /// Range does not apply (self-cast, passives).
    None,
}

/// Free-text matching material for intent checks.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActionPurpose {
    /// What a designer wants when reaching for this action.
    #[serde(default)]
    pub intents: Vec<String>,
    /// Typical situations the action is built for.
    #[serde(default)]
    pub scenarios: Vec<String>,
    /// Short tokens matched case-insensitively against query context.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ActionPurpose {
    /// True when neither keywords nor intents are configured - the "no
    /// constraint" state that context validation passes unconditionally.
    pub fn is_unconstrained(&self) -> bool {
        self.keywords.is_empty() && self.intents.is_empty()
    }
}

/// Descriptive effect profile. Nothing in scoring or validation branches on
/// these fields; they feed explanations and downstream editors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectProfile {
    #[serde(default)]
    pub primary_effect: String,
    #[serde(default)]
    pub secondary_effects: Vec<String>,
    #[serde(default)]
    pub target: TargetKind,
    #[serde(default)]
    pub range: RangeKind,
    #[serde(default)]
    pub instantaneous: bool,
}

impl Default for EffectProfile {
    fn default() -> Self {
        Self {
            primary_effect: String::new(),
            secondary_effects: Vec::new(),
            target: TargetKind::default(),
            range: RangeKind::default(),
            instantaneous: true,
        }
    }
}

/// Relations to other action types, keyed by `action_type`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActionDependency {
    /// Types that must accompany this action in a combination.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Types this action cannot share a skill with.
    #[serde(default)]
    pub incompatibles: Vec<String>,
    /// Types that pair well with this action.
    #[serde(default)]
    pub synergies: Vec<String>,
    /// Types that naturally come next in a skill sequence.
    #[serde(default)]
    pub follow_ups: Vec<String>,
}

/// Complete ontology entry for one action type.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActionSemanticInfo {
    /// Unique key across the registry.
    pub action_type: String,
    pub display_name: String,
    pub category: String,
    /// Curated weight in the nominal 0-2 range; 1.0 is neutral.
    #[serde(default = "default_business_priority")]
    pub business_priority: f32,
    #[serde(default)]
    pub purpose: ActionPurpose,
    #[serde(default)]
    pub effect: EffectProfile,
    #[serde(default)]
    pub dependency: ActionDependency,
}

impl ActionSemanticInfo {
    pub fn new(
        action_type: impl Into<String>,
        display_name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            action_type: action_type.into(),
            display_name: display_name.into(),
            category: category.into(),
            business_priority: default_business_priority(),
            purpose: ActionPurpose::default(),
            effect: EffectProfile::default(),
            dependency: ActionDependency::default(),
        }
    }

    /// Sets the curated priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: f32) -> Self {
        self.business_priority = priority;
        self
    }

    #[must_use]
    pub fn with_purpose(mut self, purpose: ActionPurpose) -> Self {
        self.purpose = purpose;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: EffectProfile) -> Self {
        self.effect = effect;
        self
    }

    #[must_use]
    pub fn with_dependency(mut self, dependency: ActionDependency) -> Self {
        self.dependency = dependency;
        self
    }
}
