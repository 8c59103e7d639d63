//! Scorer input and output records.

/// One candidate from the external similarity search.
///
/// The list a caller hands over is assumed pre-ranked by similarity; that
/// order is preserved on score ties and drives first-seen-wins filtering.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActionCandidate {
    pub action_type: String,
    pub display_name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Raw semantic similarity in `[0, 1]` as reported by the search.
    pub similarity: f32,
}

impl ActionCandidate {
    pub fn new(
        action_type: impl Into<String>,
        display_name: impl Into<String>,
        category: impl Into<String>,
        similarity: f32,
    ) -> Self {
        Self {
            action_type: action_type.into(),
            display_name: display_name.into(),
            category: category.into(),
            description: String::new(),
            similarity,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A candidate after scoring, validation, and explanation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EnhancedRecommendation {
    pub candidate: ActionCandidate,
    /// Curated business priority of the action type (1.0 when unknown).
    pub business_score: f32,
    /// Calibrated ranking score, already penalized when invalid.
    pub final_score: f32,
    pub is_valid: bool,
    /// Rendered findings from context and combination validation.
    pub validation_issues: Vec<String>,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    pub reference_skills: Vec<String>,
}

impl EnhancedRecommendation {
    /// A freshly scored entry with no annotations yet.
    pub fn scored(candidate: ActionCandidate, business_score: f32, final_score: f32) -> Self {
        Self {
            candidate,
            business_score,
            final_score,
            is_valid: true,
            validation_issues: Vec::new(),
            reasons: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
            reference_skills: Vec::new(),
        }
    }

    pub fn action_type(&self) -> &str {
        &self.candidate.action_type
    }

    pub fn similarity(&self) -> f32 {
        self.candidate.similarity
    }
}
