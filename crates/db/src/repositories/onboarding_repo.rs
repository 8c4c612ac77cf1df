//! Repository for the `onboarding_states` table.

use mate_core::identity::Identity;
use mate_core::onboarding::OnboardingStatus;
use sqlx::PgPool;

use crate::models::onboarding::OnboardingState;

const COLUMNS: &str = "\
    id, user_id, session_token, current_step, status, answers, \
    created_at, updated_at";

/// Provides data access for per-identity onboarding state.
pub struct OnboardingRepo;

impl OnboardingRepo {
    /// Get the identity's onboarding state, creating a fresh step-1 record
    /// on first read.
    ///
    /// The partial unique index per identity column makes the insert
    /// idempotent under concurrent first reads; the conflict arm returns
    /// the existing row untouched.
    pub async fn get_or_create(
        pool: &PgPool,
        identity: Identity,
    ) -> Result<OnboardingState, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let conflict_column = match identity {
            Identity::Account { .. } => "user_id",
            Identity::AnonymousSession { .. } => "session_token",
        };
        let query = format!(
            "INSERT INTO onboarding_states (user_id, session_token) \
             VALUES ($1, $2) \
             ON CONFLICT ({conflict_column}) WHERE {conflict_column} IS NOT NULL \
             DO UPDATE SET {conflict_column} = EXCLUDED.{conflict_column} \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingState>(&query)
            .bind(user_id)
            .bind(session_token)
            .fetch_one(pool)
            .await
    }

    /// Persist a step change with merged answers.
    pub async fn set_step(
        pool: &PgPool,
        identity: Identity,
        step: i16,
        answers: &serde_json::Value,
    ) -> Result<Option<OnboardingState>, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let query = format!(
            "UPDATE onboarding_states \
             SET current_step = $3, answers = $4, updated_at = now() \
             WHERE (user_id = $1 OR session_token = $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingState>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(step)
            .bind(answers)
            .fetch_optional(pool)
            .await
    }

    /// Mark the flow's status (completed / abandoned).
    pub async fn set_status(
        pool: &PgPool,
        identity: Identity,
        status: OnboardingStatus,
    ) -> Result<Option<OnboardingState>, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let query = format!(
            "UPDATE onboarding_states \
             SET status = $3, updated_at = now() \
             WHERE (user_id = $1 OR session_token = $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingState>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Reset the flow to step 1 with empty answers.
    pub async fn reset(
        pool: &PgPool,
        identity: Identity,
    ) -> Result<Option<OnboardingState>, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let query = format!(
            "UPDATE onboarding_states \
             SET current_step = 1, status = 'in_progress', answers = '{{}}', updated_at = now() \
             WHERE (user_id = $1 OR session_token = $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingState>(&query)
            .bind(user_id)
            .bind(session_token)
            .fetch_optional(pool)
            .await
    }
}
