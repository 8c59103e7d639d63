//! Shared validation report types.
//!
//! Rule violations in this crate are expected, data-driven outcomes: they are
//! collected as [`ValidationIssue`] values and never surfaced as `Err`.
//! Errors proper are reserved for I/O and malformed configuration (see
//! [`crate::error`]).

use std::fmt;

/// Severity level of a validation issue.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
pub enum Severity {
    /// Informational note; never affects validity on its own.
    Info,
    /// Questionable configuration that the caller should review.
    Warning,
    /// A requirement is unmet; the checked subject is not usable as-is.
    Error,
}

impl Severity {
    /// Returns true for issues that demand attention before shipping.
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// Static classification of what a validation issue is about.
///
/// Downstream diagnostics (e.g. the exclusivity ratio) branch on the code
/// instead of sniffing message text.
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
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum IssueCode {
    /// An enabled exclusive combination rule matched more than one action.
    ExclusiveRule,
    /// An action's declared prerequisite is absent from the combination.
    MissingPrerequisite,
    /// Two actions in the combination declare each other incompatible.
    IncompatiblePair,
    /// No configured keyword or intent matched the query context.
    ContextMismatch,
    /// A conditionally required parameter is missing.
    RequiredMissing,
    /// A parameter is set although the active condition excludes it.
    ExclusiveParameter,
    /// A numeric parameter violates its configured range.
    OutOfRange,
}

/// One finding produced by a validator.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: IssueCode,
    /// Parameter or action the issue refers to.
    pub subject: String,
    /// Human-readable description of the finding.
    pub message: String,
    /// Optional rule explanation carried over from configuration.
    pub explanation: String,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            subject: subject.into(),
            message: message.into(),
            explanation: String::new(),
        }
    }

    /// Attaches the configured explanation text (builder pattern).
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.subject, self.message)
    }
}

/// Outcome of validating a subject against its rule set.
///
/// `is_valid` is true iff no issue was recorded; the field is maintained by
/// [`ValidationResult::push`] so the two can never drift apart.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// A passing result with no findings.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
        }
    }

    /// Builds a result from collected issues.
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
        }
    }

    /// Records a finding; any issue invalidates the result.
    pub fn push(&mut self, issue: ValidationIssue) {
        self.is_valid = false;
        self.issues.push(issue);
    }

    /// Folds another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid = self.is_valid && other.is_valid;
        self.issues.extend(other.issues);
    }

    /// Issues at or above the given severity.
    pub fn issues_at_least(&self, floor: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |issue| issue.severity >= floor)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_invalidates() {
        let mut result = ValidationResult::valid();
        assert!(result.is_valid);

        result.push(ValidationIssue::new(
            Severity::Info,
            IssueCode::ContextMismatch,
            "DamageAction",
            "no keyword matched",
        ));

        // Even an Info finding flips validity: is_valid mirrors issue presence.
        assert!(!result.is_valid);
        assert_eq!(result.issues.len(), 1);
    }

    #[test]
    fn merge_combines_issue_lists() {
        let mut left = ValidationResult::valid();
        let mut right = ValidationResult::valid();
        right.push(ValidationIssue::new(
            Severity::Error,
            IssueCode::RequiredMissing,
            "element",
            "element is required",
        ));

        left.merge(right);
        assert!(!left.is_valid);
        assert_eq!(left.issues.len(), 1);
    }

    #[test]
    fn severity_ordering_supports_floors() {
        let mut result = ValidationResult::valid();
        result.push(ValidationIssue::new(
            Severity::Info,
            IssueCode::ContextMismatch,
            "a",
            "info",
        ));
        result.push(ValidationIssue::new(
            Severity::Error,
            IssueCode::OutOfRange,
            "b",
            "error",
        ));

        assert_eq!(result.issues_at_least(Severity::Warning).count(), 1);
    }
}
