//! Explicit parameter schemas per action type.
//!
//! The inferencer needs to know which parameters an action type exposes and
//! what type each one has. That knowledge is supplied up front as data by the
//! embedding application (the `skill-content` crate ships schemas for the
//! default action set) instead of being discovered at runtime.

use std::collections::HashMap;
use std::fmt;

use crate::value::{CurveShape, ParamValue};

/// Declared type of a schema field.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FieldKind {
    Int,
    Float,
    Bool,
    Text,
    Vector3,
    /// Closed set of named variants; the first variant is the neutral choice.
    Enum(Vec<String>),
    Curve,
}

impl FieldKind {
    /// The kind's neutral value, used when neither statistics nor a
    /// configured default cover a field.
    pub fn zero_value(&self) -> ParamValue {
        match self {
            Self::Int => ParamValue::Int(0),
            Self::Float => ParamValue::Float(0.0),
            Self::Bool => ParamValue::Bool(false),
            Self::Text => ParamValue::Text(String::new()),
            Self::Vector3 => ParamValue::Vector3([0.0; 3]),
            Self::Enum(variants) => {
                ParamValue::Enum(variants.first().cloned().unwrap_or_default())
            }
            Self::Curve => ParamValue::Curve(CurveShape::Linear),
        }
    }

    /// Static name of the kind, for diagnostics and reasons.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Text => "text",
            Self::Vector3 => "vector3",
            Self::Enum(_) => "enum",
            Self::Curve => "curve",
        }
    }

    /// True for kinds with a numeric view, where medians and ranges apply.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One declared parameter of an action type.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    /// Schema-level default, consulted after statistics and graph defaults.
    #[serde(default)]
    pub default: Option<ParamValue>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: ParamValue) -> Self {
        self.default = Some(default);
        self
    }

    /// The schema default if configured, else the kind's neutral value.
    pub fn fallback_value(&self) -> ParamValue {
        self.default
            .clone()
            .unwrap_or_else(|| self.kind.zero_value())
    }
}

/// All declared parameters of one action type, in declaration order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActionSchema {
    pub action_type: String,
    pub fields: Vec<FieldSpec>,
}

impl ActionSchema {
    pub fn new<I>(action_type: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = FieldSpec>,
    {
        Self {
            action_type: action_type.into(),
            fields: fields.into_iter().collect(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Map of action type to schema. Registration replaces any earlier schema
/// for the same type; consumers treat an absent schema as "nothing to infer".
#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, ActionSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, schema: ActionSchema) {
        self.schemas.insert(schema.action_type.clone(), schema);
    }

    pub fn get(&self, action_type: &str) -> Option<&ActionSchema> {
        self.schemas.get(action_type)
    }

    pub fn contains(&self, action_type: &str) -> bool {
        self.schemas.contains_key(action_type)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl FromIterator<ActionSchema> for SchemaRegistry {
    fn from_iter<I: IntoIterator<Item = ActionSchema>>(iter: I) -> Self {
        let mut registry = Self::new();
        for schema in iter {
            registry.register(schema);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_prefers_configured_default() {
        let plain = FieldSpec::new("speed", FieldKind::Float);
        assert_eq!(plain.fallback_value(), ParamValue::Float(0.0));

        let with_default =
            FieldSpec::new("speed", FieldKind::Float).with_default(ParamValue::Float(10.0));
        assert_eq!(with_default.fallback_value(), ParamValue::Float(10.0));
    }

    #[test]
    fn enum_zero_is_first_variant() {
        let kind = FieldKind::Enum(vec!["Physical".to_string(), "Magical".to_string()]);
        assert_eq!(kind.zero_value(), ParamValue::Enum("Physical".to_string()));

        // A degenerate variant-free enum still yields a value.
        assert_eq!(
            FieldKind::Enum(Vec::new()).zero_value(),
            ParamValue::Enum(String::new())
        );
    }

    #[test]
    fn registration_replaces_existing_schema() {
        let mut registry = SchemaRegistry::new();
        registry.register(ActionSchema::new(
            "DamageAction",
            [FieldSpec::new("base_damage", FieldKind::Float)],
        ));
        registry.register(ActionSchema::new(
            "DamageAction",
            [
                FieldSpec::new("base_damage", FieldKind::Float),
                FieldSpec::new("can_crit", FieldKind::Bool),
            ],
        ));

        assert_eq!(registry.len(), 1);
        let schema = registry.get("DamageAction").expect("registered");
        assert_eq!(schema.fields.len(), 2);
    }
}
