//! Onboarding step machine for the founder diagnosis flow.
//!
//! The multi-step form state is an explicit object persisted per identity
//! and mutated through validated transitions, rather than an ambient
//! client-side store. The API layer exposes it as get / set-step / reset.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Onboarding status
// ---------------------------------------------------------------------------

/// Status values for an onboarding flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    InProgress,
    Completed,
    Abandoned,
}

impl OnboardingStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(CoreError::Validation(format!(
                "Invalid onboarding status '{s}'. Must be one of: in_progress, completed, abandoned"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

// ---------------------------------------------------------------------------
// Onboarding steps
// ---------------------------------------------------------------------------

/// The five steps of the founder diagnosis flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Welcome,
    Industry,
    Stage,
    Concerns,
    Goal,
}

/// Minimum step number (1-based).
pub const MIN_STEP: i16 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: i16 = 5;

impl OnboardingStep {
    /// Convert a 1-based step number to an `OnboardingStep`.
    pub fn from_number(n: i16) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Welcome),
            2 => Ok(Self::Industry),
            3 => Ok(Self::Stage),
            4 => Ok(Self::Concerns),
            5 => Ok(Self::Goal),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> i16 {
        match self {
            Self::Welcome => 1,
            Self::Industry => 2,
            Self::Stage => 3,
            Self::Concerns => 4,
            Self::Goal => 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Step answers
// ---------------------------------------------------------------------------

/// Accumulated answers across the flow. Persisted as JSON alongside the
/// current step; fields fill in as steps are submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingAnswers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub concerns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

/// The completed founder profile, extracted once all steps are answered.
/// This is the input to the curriculum prompt builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FounderProfile {
    pub user_name: String,
    pub industry: String,
    pub stage: String,
    pub concerns: Vec<String>,
    pub goal: String,
}

// ---------------------------------------------------------------------------
// Transitions and validation
// ---------------------------------------------------------------------------

/// Validate a step transition.
///
/// A transition is valid if the next step is exactly one step forward or
/// one step backward from the current step.
pub fn validate_step_transition(current: i16, next: i16) -> Result<(), CoreError> {
    validate_step_number(current)?;
    validate_step_number(next)?;

    let diff = next - current;
    if diff != 1 && diff != -1 {
        return Err(CoreError::Validation(format!(
            "Cannot transition from step {current} to step {next}. \
             Must advance or go back exactly one step."
        )));
    }
    Ok(())
}

/// Validate that a step number is within the valid range.
pub fn validate_step_number(step: i16) -> Result<(), CoreError> {
    if !(MIN_STEP..=MAX_STEP).contains(&step) {
        return Err(CoreError::Validation(format!(
            "Step {step} is out of range ({MIN_STEP}..{MAX_STEP})"
        )));
    }
    Ok(())
}

fn require_text(value: &Option<String>, field: &str, step: OnboardingStep) -> Result<(), CoreError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "Step {} ({:?}) requires a non-empty '{field}'",
            step.to_number(),
            step,
        ))),
    }
}

/// Validate that the answers contain what a given step must have filled in.
///
/// Structural validation only; the handler merges the submitted fields into
/// the stored answers before calling this.
pub fn validate_step_answers(step: i16, answers: &OnboardingAnswers) -> Result<(), CoreError> {
    let step = OnboardingStep::from_number(step)?;
    match step {
        OnboardingStep::Welcome => require_text(&answers.user_name, "user_name", step),
        OnboardingStep::Industry => require_text(&answers.industry, "industry", step),
        OnboardingStep::Stage => require_text(&answers.stage, "stage", step),
        OnboardingStep::Concerns => {
            if answers.concerns.iter().any(|c| !c.trim().is_empty()) {
                Ok(())
            } else {
                Err(CoreError::Validation(
                    "Step 4 (Concerns) requires at least one concern".to_string(),
                ))
            }
        }
        OnboardingStep::Goal => require_text(&answers.goal, "goal", step),
    }
}

/// Check whether the flow can be completed: not already completed, the
/// final step must be current, and every step's answers must be present.
///
/// Completing twice would re-run the downstream side effects (curriculum
/// generation, XP award), so a completed flow is a conflict; regenerating
/// the curriculum is a separate operation.
pub fn can_complete(
    status: OnboardingStatus,
    current_step: i16,
    answers: &OnboardingAnswers,
) -> Result<(), CoreError> {
    if status == OnboardingStatus::Completed {
        return Err(CoreError::Conflict(
            "Onboarding is already completed; request a new curriculum instead of \
             repeating the flow"
                .into(),
        ));
    }
    if current_step != MAX_STEP {
        return Err(CoreError::Validation(format!(
            "Cannot complete onboarding: must be on step {MAX_STEP} (Goal), \
             currently on step {current_step}"
        )));
    }
    for step in MIN_STEP..=MAX_STEP {
        validate_step_answers(step, answers)?;
    }
    Ok(())
}

/// Extract the founder profile from completed answers.
///
/// Call only after [`can_complete`] has passed; missing fields are still
/// reported as validation errors rather than panicking.
pub fn into_profile(answers: OnboardingAnswers) -> Result<FounderProfile, CoreError> {
    let missing = |field: &str| CoreError::Validation(format!("Onboarding answer '{field}' is missing"));
    Ok(FounderProfile {
        user_name: answers.user_name.ok_or_else(|| missing("user_name"))?,
        industry: answers.industry.ok_or_else(|| missing("industry"))?,
        stage: answers.stage.ok_or_else(|| missing("stage"))?,
        concerns: answers.concerns,
        goal: answers.goal.ok_or_else(|| missing("goal"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_answers() -> OnboardingAnswers {
        OnboardingAnswers {
            user_name: Some("Ada".to_string()),
            industry: Some("fintech".to_string()),
            stage: Some("pre-seed".to_string()),
            concerns: vec!["finding first users".to_string()],
            goal: Some("launch an MVP".to_string()),
        }
    }

    // -- status --

    #[test]
    fn status_round_trips_through_db_strings() {
        for status in [
            OnboardingStatus::InProgress,
            OnboardingStatus::Completed,
            OnboardingStatus::Abandoned,
        ] {
            assert_eq!(OnboardingStatus::from_str_db(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_rejected() {
        assert!(OnboardingStatus::from_str_db("paused").is_err());
    }

    // -- steps --

    #[test]
    fn step_numbers_round_trip() {
        for n in MIN_STEP..=MAX_STEP {
            assert_eq!(OnboardingStep::from_number(n).unwrap().to_number(), n);
        }
    }

    #[test]
    fn out_of_range_step_rejected() {
        assert!(OnboardingStep::from_number(0).is_err());
        assert!(OnboardingStep::from_number(6).is_err());
    }

    // -- transitions --

    #[test]
    fn single_step_moves_are_valid() {
        for current in MIN_STEP..MAX_STEP {
            assert!(validate_step_transition(current, current + 1).is_ok());
            assert!(validate_step_transition(current + 1, current).is_ok());
        }
    }

    #[test]
    fn jumps_and_self_transitions_are_invalid() {
        assert!(validate_step_transition(1, 3).is_err());
        assert!(validate_step_transition(5, 3).is_err());
        assert!(validate_step_transition(2, 2).is_err());
    }

    #[test]
    fn out_of_range_transitions_are_invalid() {
        assert!(validate_step_transition(0, 1).is_err());
        assert!(validate_step_transition(5, 6).is_err());
    }

    // -- answers validation --

    #[test]
    fn each_step_requires_its_answer() {
        let empty = OnboardingAnswers::default();
        for step in MIN_STEP..=MAX_STEP {
            assert!(validate_step_answers(step, &empty).is_err());
        }
        let full = full_answers();
        for step in MIN_STEP..=MAX_STEP {
            assert!(validate_step_answers(step, &full).is_ok());
        }
    }

    #[test]
    fn whitespace_only_answers_rejected() {
        let answers = OnboardingAnswers {
            user_name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(validate_step_answers(1, &answers).is_err());
    }

    #[test]
    fn blank_concern_entries_do_not_count() {
        let answers = OnboardingAnswers {
            concerns: vec!["".to_string(), "  ".to_string()],
            ..Default::default()
        };
        assert!(validate_step_answers(4, &answers).is_err());
    }

    // -- completion --

    #[test]
    fn complete_requires_final_step() {
        assert!(can_complete(OnboardingStatus::InProgress, 3, &full_answers()).is_err());
        assert!(can_complete(OnboardingStatus::InProgress, MAX_STEP, &full_answers()).is_ok());
    }

    #[test]
    fn complete_requires_all_answers() {
        let mut answers = full_answers();
        answers.stage = None;
        assert!(can_complete(OnboardingStatus::InProgress, MAX_STEP, &answers).is_err());
    }

    #[test]
    fn completed_flow_cannot_complete_again() {
        // Even with the step and answers still valid, a second completion
        // must be refused so the XP award and curriculum generation stay
        // once-per-flow.
        let err = can_complete(OnboardingStatus::Completed, MAX_STEP, &full_answers())
            .expect_err("repeat completion should be refused");
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn abandoned_flow_can_resume_and_complete() {
        assert!(can_complete(OnboardingStatus::Abandoned, MAX_STEP, &full_answers()).is_ok());
    }

    #[test]
    fn profile_extraction() {
        let profile = into_profile(full_answers()).unwrap();
        assert_eq!(profile.user_name, "Ada");
        assert_eq!(profile.concerns, vec!["finding first users".to_string()]);
    }

    #[test]
    fn profile_extraction_reports_missing_field() {
        let mut answers = full_answers();
        answers.goal = None;
        assert!(into_profile(answers).is_err());
    }
}
