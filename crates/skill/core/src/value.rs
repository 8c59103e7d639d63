//! Tagged parameter values.
//!
//! Skill parameters travel through the advisor as explicit variants instead of
//! untyped maps, so numeric comparisons and zero-checks are exhaustive rather
//! than conversion-based. Absence is expressed by leaving a key out of the
//! [`ParamMap`]; there is deliberately no null variant.

use std::collections::BTreeMap;
use std::fmt;

/// Numeric tolerance shared by the zero-check in exclusive parameter rules
/// and the dispersion guard in confidence scoring.
pub const VALUE_EPSILON: f64 = 1e-4;

/// A concrete parameter assignment, keyed by parameter name.
///
/// `BTreeMap` keeps iteration order deterministic, which in turn keeps
/// validation issue ordering deterministic.
pub type ParamMap = BTreeMap<String, ParamValue>;

/// Shape presets for curve-typed parameters (scaling over time/distance).
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
pub enum CurveShape {
    /// Identity mapping - the value applies unchanged.
    #[default]
    Linear,
    /// Slow start, fast finish.
    EaseIn,
    /// Fast start, slow finish.
    EaseOut,
    /// Slow at both ends.
    EaseInOut,
}

/// One concrete parameter value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Vector3([f32; 3]),
    /// Named variant of an application-defined enum field.
    Enum(String),
    Curve(CurveShape),
}

impl ParamValue {
    /// Numeric view of the value.
    ///
    /// Only genuinely numeric variants convert; `Bool` maps to 0/1. Textual
    /// content is never parsed - a `Text("5")` stays non-numeric on purpose.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            Self::Text(_) | Self::Vector3(_) | Self::Enum(_) | Self::Curve(_) => None,
        }
    }

    /// Returns true if the value has a numeric view.
    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }

    /// Returns true for numeric values within [`VALUE_EPSILON`] of zero.
    ///
    /// Non-numeric values are never "zero": a set enum or text value counts
    /// as meaningfully present.
    pub fn is_zero(&self) -> bool {
        matches!(self.as_f64(), Some(v) if v.abs() <= VALUE_EPSILON)
    }

    /// Compares the canonical text form against a rule's expected literal.
    ///
    /// Comparison is exact: rule authors write the same literal that the
    /// value renders to (enum variant names, `true`/`false`, plain numbers).
    pub fn matches_str(&self, expected: &str) -> bool {
        self.to_string() == expected
    }

    /// Static name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Text(_) => "text",
            Self::Vector3(_) => "vector3",
            Self::Enum(_) => "enum",
            Self::Curve(_) => "curve",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Vector3([x, y, z]) => write!(f, "({x}, {y}, {z})"),
            Self::Enum(name) => write!(f, "{name}"),
            Self::Curve(shape) => write!(f, "{shape}"),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}
