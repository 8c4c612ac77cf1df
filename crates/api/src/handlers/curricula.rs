//! Handlers for the `/curricula` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mate_core::error::CoreError;
use mate_core::identity::Identity;
use mate_core::onboarding::{into_profile, FounderProfile, OnboardingAnswers, OnboardingStatus};
use mate_core::types::DbId;
use mate_db::models::curriculum::{
    Content, Curriculum, CurriculumModule, NewContent, NewCurriculum, NewModule,
};
use mate_db::repositories::{CurriculumRepo, OnboardingRepo};
use mate_llm::{curriculum_prompt, parse_curriculum, CurriculumRequest, CURRICULUM_SYSTEM_PROMPT};

use crate::error::{AppError, AppResult};
use crate::middleware::identity::RequireIdentity;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/curricula
pub async fn list(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Curriculum>>>> {
    let curricula =
        CurriculumRepo::list(&state.pool, identity, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: curricula }))
}

/// POST /api/v1/curricula
///
/// Generate a fresh curriculum from the caller's completed onboarding
/// profile. Requires onboarding to be completed first.
pub async fn regenerate(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
) -> AppResult<(StatusCode, Json<DataResponse<Curriculum>>)> {
    let onboarding = OnboardingRepo::get_or_create(&state.pool, identity).await?;

    let status = OnboardingStatus::from_str_db(&onboarding.status)?;
    if status != OnboardingStatus::Completed {
        return Err(AppError::Core(CoreError::Validation(
            "Complete onboarding before generating a curriculum".into(),
        )));
    }

    let answers: OnboardingAnswers = serde_json::from_value(onboarding.answers)
        .map_err(|e| AppError::Core(CoreError::Validation(format!("Malformed answers: {e}"))))?;
    let profile = into_profile(answers)?;

    let curriculum = generate_curriculum(&state, identity, profile).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: curriculum })))
}

/// GET /api/v1/curricula/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Curriculum>>> {
    let curriculum = CurriculumRepo::find(&state.pool, identity, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "curriculum",
            id,
        })?;
    Ok(Json(DataResponse { data: curriculum }))
}

/// GET /api/v1/curricula/{id}/modules
pub async fn list_modules(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CurriculumModule>>>> {
    // Ownership check first so foreign curricula 404 rather than leak.
    CurriculumRepo::find(&state.pool, identity, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "curriculum",
            id,
        })?;

    let modules = CurriculumRepo::list_modules(&state.pool, id).await?;
    Ok(Json(DataResponse { data: modules }))
}

/// GET /api/v1/curricula/modules/{id}/contents
pub async fn list_contents(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Content>>>> {
    if !CurriculumRepo::module_owned_by(&state.pool, identity, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "curriculum module",
            id,
        }));
    }

    let contents = CurriculumRepo::list_contents(&state.pool, id).await?;
    Ok(Json(DataResponse { data: contents }))
}

/// Run one generation round-trip: render the prompt, call the LLM, parse
/// the reply, and persist the plan as a curriculum tree.
///
/// A malformed reply surfaces as 502 and persists nothing; the caller can
/// simply retry the request.
pub(crate) async fn generate_curriculum(
    state: &AppState,
    identity: Identity,
    profile: FounderProfile,
) -> AppResult<Curriculum> {
    let title = format!("{} founder plan: {}", profile.industry, profile.goal);
    let request = CurriculumRequest::from(profile);
    let prompt = curriculum_prompt(&request);

    let reply = state
        .llm
        .complete(CURRICULUM_SYSTEM_PROMPT, &[], &prompt)
        .await?;
    let plan = parse_curriculum(&reply)?;

    let new = NewCurriculum {
        title,
        industry: request.industry,
        stage: request.stage,
        goal: request.goal,
        weeks: plan
            .weeks
            .into_iter()
            .map(|week| NewModule {
                week_number: week.week,
                theme: week.theme,
                items: week
                    .items
                    .into_iter()
                    .map(|item| NewContent {
                        title: item.title,
                        summary: item.summary,
                        kind: item.kind,
                    })
                    .collect(),
            })
            .collect(),
    };

    let curriculum = CurriculumRepo::create(&state.pool, identity, &new).await?;
    tracing::info!(%identity, curriculum_id = curriculum.id, "Curriculum generated");
    Ok(curriculum)
}
