//! Validation error types.
//!
//! These errors are raised by the constructors and `validate()` methods that
//! build grade snapshots. The engines themselves never fail: once a snapshot
//! has been accepted, every computation yields a value.

use thiserror::Error;

use crate::model::AssessmentKind;

/// Errors raised when a snapshot is built from invalid input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A score fell outside the 0–100 range.
    #[error("score {score} is outside the range 0-100")]
    ScoreOutOfRange { score: f64 },

    /// A numeric field was NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// An assessment type weight was negative.
    #[error("weight {weight} for {kind} is negative")]
    NegativeWeight { kind: AssessmentKind, weight: f64 },

    /// An assessment type weight exceeded 100%.
    #[error("weight {weight} for {kind} exceeds 100")]
    WeightTooLarge { kind: AssessmentKind, weight: f64 },

    /// A goal percentage was negative.
    #[error("goal percentage {0} must not be negative")]
    InvalidGoal(f64),

    /// The same assessment kind was configured twice for one subject.
    #[error("subject '{subject}' configures {kind} more than once")]
    DuplicateKind {
        subject: String,
        kind: AssessmentKind,
    },

    /// A subject's type map filed a type under a different kind.
    #[error("subject '{subject}' files {actual} under {key}")]
    KindMismatch {
        subject: String,
        key: AssessmentKind,
        actual: AssessmentKind,
    },

    /// A singleton kind (midterm, final exam, final project) had more than one record.
    #[error("{kind} takes a single record, found {count}")]
    TooManyRecords { kind: AssessmentKind, count: usize },

    /// A grade scale was malformed.
    #[error("invalid grade scale: {0}")]
    InvalidScale(String),

    /// The configured program length was zero.
    #[error("program must span at least one semester")]
    InvalidProgramLength,

    /// A recorded semester GPA fell outside 0.0–4.0.
    #[error("semester GPA {0} is outside the range 0.0-4.0")]
    GpaOutOfRange(f64),
}

/// Reject NaN and infinities for the named field.
pub(crate) fn ensure_finite(value: f64, field: &'static str) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

/// Validate a goal percentage supplied by a caller.
///
/// Goals above 100 are accepted: they are a legitimate question whose answer
/// is "infeasible", not malformed input.
pub fn validate_goal_percentage(goal: f64) -> Result<f64, ValidationError> {
    ensure_finite(goal, "goal percentage")?;
    if goal < 0.0 {
        return Err(ValidationError::InvalidGoal(goal));
    }
    Ok(goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_validation() {
        assert_eq!(validate_goal_percentage(85.0), Ok(85.0));
        assert_eq!(validate_goal_percentage(150.0), Ok(150.0));
        assert_eq!(
            validate_goal_percentage(-1.0),
            Err(ValidationError::InvalidGoal(-1.0))
        );
        assert!(matches!(
            validate_goal_percentage(f64::NAN),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn messages_name_the_kind() {
        let err = ValidationError::TooManyRecords {
            kind: AssessmentKind::Midterm,
            count: 2,
        };
        assert_eq!(err.to_string(), "midterm takes a single record, found 2");
    }
}
