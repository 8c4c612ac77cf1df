//! Handlers and shared flows for streaks, weekly goals, badges, levels,
//! and the combined dashboard.
//!
//! The pure rules live in `mate_core` (reducer, evaluators, tier table);
//! this module wires them to persistence and request handling.

use axum::extract::State;
use axum::Json;
use chrono::{Days, NaiveDate, Utc};
use mate_core::achievement::{self, EvaluatedAchievement, CATALOG};
use mate_core::error::CoreError;
use mate_core::goal;
use mate_core::identity::Identity;
use mate_core::level::{compute_level, default_tiers, LevelStatus};
use mate_core::streak::{apply_activity, week_start, weekly_activity};
use mate_core::types::DbId;
use mate_db::models::streak::StreakRow;
use mate_db::repositories::{BadgeRepo, GoalRepo, StatsRepo, StreakRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::identity::RequireIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// Streak payload: counters plus a Monday-indexed bitmap of this week.
#[derive(Debug, Serialize)]
pub struct StreakView {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: Option<NaiveDate>,
    /// Monday-first; `week[0]` is Monday of the current week.
    pub week: [bool; 7],
}

/// Weekly goal payload with derived percent/achieved.
#[derive(Debug, Serialize)]
pub struct WeeklyGoalView {
    pub week_start: NaiveDate,
    pub target_count: i32,
    pub completed_count: i32,
    /// Completion percent, rounded and clamped to 0..=100.
    pub percent: i32,
    pub achieved: bool,
}

/// Request body for `PUT /goals/weekly`.
#[derive(Debug, Deserialize)]
pub struct SetWeeklyTarget {
    pub target_count: i32,
}

/// Combined dashboard payload.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub level: LevelStatus,
    pub total_xp: i64,
    pub streak: StreakView,
    pub weekly_goal: WeeklyGoalView,
    pub badges: Vec<EvaluatedAchievement>,
}

/// Gamification summary returned after a qualifying activity.
#[derive(Debug, Serialize)]
pub struct GamificationSummary {
    pub level: LevelStatus,
    pub total_xp: i64,
    pub streak: StreakView,
    pub weekly_goal: WeeklyGoalView,
    /// Badge ids crossed by this activity.
    pub new_badges: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/streak
pub async fn streak(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
) -> AppResult<Json<DataResponse<StreakView>>> {
    let today = Utc::now().date_naive();
    let view = streak_view(&state, identity, today).await?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/goals/weekly
pub async fn weekly_goal(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
) -> AppResult<Json<DataResponse<WeeklyGoalView>>> {
    let today = Utc::now().date_naive();
    let view = goal_view(&state, identity, today).await?;
    Ok(Json(DataResponse { data: view }))
}

/// PUT /api/v1/goals/weekly
///
/// Update this week's target. The achieved flag is re-derived against the
/// new target.
pub async fn set_weekly_target(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Json(input): Json<SetWeeklyTarget>,
) -> AppResult<Json<DataResponse<WeeklyGoalView>>> {
    if input.target_count < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "Weekly target must be at least 1".into(),
        )));
    }

    let today = Utc::now().date_naive();
    let start = week_start(today);

    // Lazy-create so the update always has a row to hit.
    GoalRepo::get_or_create(&state.pool, identity, start).await?;
    let row = GoalRepo::set_target(&state.pool, identity, start, input.target_count)
        .await?
        .ok_or_else(|| AppError::InternalError("Weekly goal vanished mid-update".into()))?;

    let progress = goal::evaluate(row.target_count, row.completed_count);
    Ok(Json(DataResponse {
        data: WeeklyGoalView {
            week_start: row.week_start,
            target_count: row.target_count,
            completed_count: row.completed_count,
            percent: progress.percent,
            achieved: progress.achieved,
        },
    }))
}

/// GET /api/v1/badges
///
/// Evaluate the full catalog against current stats. Thresholds crossed
/// since the last read are recorded as earned here.
pub async fn badges(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
) -> AppResult<Json<DataResponse<Vec<EvaluatedAchievement>>>> {
    let (evaluated, _) = evaluate_and_record_badges(&state, identity).await?;
    Ok(Json(DataResponse { data: evaluated }))
}

/// GET /api/v1/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
) -> AppResult<Json<DataResponse<DashboardView>>> {
    let today = Utc::now().date_naive();

    let total_xp = StatsRepo::total_xp(&state.pool, identity).await?;
    let level = compute_level(total_xp, &default_tiers())?;
    let streak = streak_view(&state, identity, today).await?;
    let weekly_goal = goal_view(&state, identity, today).await?;
    let (badges, _) = evaluate_and_record_badges(&state, identity).await?;

    Ok(Json(DataResponse {
        data: DashboardView {
            level,
            total_xp,
            streak,
            weekly_goal,
            badges,
        },
    }))
}

// ---------------------------------------------------------------------------
// Shared flows (also used by the progress and action handlers)
// ---------------------------------------------------------------------------

/// Feed one day of activity through the streak reducer and persist it.
/// Same-day repeats are absorbed by the reducer and the conditional write.
pub(crate) async fn bump_streak(
    state: &AppState,
    identity: Identity,
    today: NaiveDate,
) -> AppResult<StreakRow> {
    let row = StreakRepo::get_or_create(&state.pool, identity).await?;
    let next = apply_activity(row.record(), today);
    let row = StreakRepo::apply(&state.pool, identity, next, today).await?;
    Ok(row)
}

/// Evaluate the achievement catalog and persist any newly crossed
/// thresholds. Returns the evaluated list and the newly earned ids.
pub(crate) async fn evaluate_and_record_badges(
    state: &AppState,
    identity: Identity,
) -> AppResult<(Vec<EvaluatedAchievement>, Vec<DbId>)> {
    let snapshot = StatsRepo::snapshot(&state.pool, identity).await?;
    let earned = BadgeRepo::earned_ids(&state.pool, identity).await?;

    let evaluated = achievement::evaluate(CATALOG, &snapshot, &earned);
    let new = achievement::newly_earned(&evaluated);
    if !new.is_empty() {
        BadgeRepo::record_earned(&state.pool, identity, &new).await?;
        tracing::info!(%identity, badges = ?new, "Badges earned");
    }

    Ok((evaluated, new))
}

/// Build the post-activity summary: level, streak, weekly goal, new badges.
pub(crate) async fn build_summary(
    state: &AppState,
    identity: Identity,
    today: NaiveDate,
    new_badges: Vec<DbId>,
) -> AppResult<GamificationSummary> {
    let total_xp = StatsRepo::total_xp(&state.pool, identity).await?;
    let level = compute_level(total_xp, &default_tiers())?;
    let streak = streak_view(state, identity, today).await?;
    let weekly_goal = goal_view(state, identity, today).await?;

    Ok(GamificationSummary {
        level,
        total_xp,
        streak,
        weekly_goal,
        new_badges,
    })
}

async fn streak_view(
    state: &AppState,
    identity: Identity,
    today: NaiveDate,
) -> AppResult<StreakView> {
    let row = StreakRepo::get_or_create(&state.pool, identity).await?;

    let start = week_start(today);
    let end = start + Days::new(6);
    let dates = StreakRepo::activity_dates(&state.pool, identity, start, end).await?;
    let week = weekly_activity(today, &dates);

    Ok(StreakView {
        current_streak: row.current_streak,
        longest_streak: row.longest_streak,
        last_activity_date: row.last_activity_date,
        week,
    })
}

async fn goal_view(
    state: &AppState,
    identity: Identity,
    today: NaiveDate,
) -> AppResult<WeeklyGoalView> {
    let start = week_start(today);
    let row = GoalRepo::get_or_create(&state.pool, identity, start).await?;

    let progress = goal::evaluate(row.target_count, row.completed_count);

    Ok(WeeklyGoalView {
        week_start: row.week_start,
        target_count: row.target_count,
        completed_count: row.completed_count,
        percent: progress.percent,
        achieved: progress.achieved,
    })
}
