//! Inference output records.

use crate::params::FieldKind;
use crate::report::ValidationResult;
use crate::value::ParamValue;

/// A suggested value for one parameter, with provenance and confidence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParameterInference {
    pub parameter: String,
    pub kind: FieldKind,
    pub recommended: ParamValue,
    /// Nearby plausible values (quartiles when statistics back the
    /// recommendation).
    pub alternatives: Vec<ParamValue>,
    /// Trustworthiness of the recommendation in `[0, 1]`.
    pub confidence: f32,
    pub recommended_min: Option<f64>,
    pub recommended_max: Option<f64>,
    /// Where the value came from, in designer-readable form.
    pub reason: String,
    /// Set when the value should not ship without a human look.
    pub needs_confirmation: bool,
    /// Up to three skills whose data informed the suggestion.
    pub reference_skills: Vec<String>,
}

/// All inferences for one action type plus the validation verdict over the
/// inferred assignment.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InferenceResult {
    pub action_type: String,
    pub inferences: Vec<ParameterInference>,
    pub validation: ValidationResult,
}

impl InferenceResult {
    /// The "nothing to infer" result for unresolvable action types.
    pub fn empty(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            inferences: Vec::new(),
            validation: ValidationResult::valid(),
        }
    }

    pub fn inference(&self, parameter: &str) -> Option<&ParameterInference> {
        self.inferences
            .iter()
            .find(|inference| inference.parameter == parameter)
    }

    pub fn is_empty(&self) -> bool {
        self.inferences.is_empty()
    }
}
