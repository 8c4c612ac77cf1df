//! Handlers for the `/subscription` resource (account only).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use mate_core::error::CoreError;
use mate_core::subscription::{period_end, Plan};
use mate_db::models::subscription::Subscription;
use mate_db::repositories::SubscriptionRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::identity::RequireAccount;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /subscription/confirm`.
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    /// Payment key handed to the client by the gateway checkout.
    pub payment_key: String,
    pub order_id: String,
    /// Charged amount in KRW; must match the plan price.
    pub amount: i64,
    /// `"monthly"` or `"yearly"`.
    pub plan: String,
}

/// GET /api/v1/subscription
pub async fn get(
    State(state): State<AppState>,
    RequireAccount(user_id): RequireAccount,
) -> AppResult<Json<DataResponse<Subscription>>> {
    let subscription = SubscriptionRepo::find_by_user(&state.pool, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "subscription",
            id: user_id,
        })?;
    Ok(Json(DataResponse { data: subscription }))
}

/// POST /api/v1/subscription/confirm
///
/// Verify the `(payment_key, order_id, amount)` triple with the gateway,
/// then activate the subscription through the end of the plan period.
pub async fn confirm(
    State(state): State<AppState>,
    RequireAccount(user_id): RequireAccount,
    Json(input): Json<ConfirmRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Subscription>>)> {
    let plan = Plan::from_str_db(&input.plan)?;

    if input.amount != plan.amount() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Amount {} does not match the {} plan price {}",
            input.amount,
            plan.as_str(),
            plan.amount()
        ))));
    }

    let approval = state
        .payments
        .confirm(&input.payment_key, &input.order_id, input.amount)
        .await?;

    if approval.status != "DONE" {
        return Err(AppError::Core(CoreError::Upstream(format!(
            "Payment not finalized (status: {})",
            approval.status
        ))));
    }
    if approval.total_amount != input.amount {
        return Err(AppError::Core(CoreError::Upstream(format!(
            "Gateway approved {} but {} was requested",
            approval.total_amount, input.amount
        ))));
    }

    let now = Utc::now();
    let end = period_end(now, plan);
    let subscription =
        SubscriptionRepo::upsert(&state.pool, user_id, plan, &input.order_id, end).await?;

    tracing::info!(user_id, plan = plan.as_str(), "Subscription activated");
    Ok((StatusCode::CREATED, Json(DataResponse { data: subscription })))
}

/// POST /api/v1/subscription/cancel
pub async fn cancel(
    State(state): State<AppState>,
    RequireAccount(user_id): RequireAccount,
) -> AppResult<Json<DataResponse<Subscription>>> {
    let subscription = SubscriptionRepo::cancel(&state.pool, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "subscription",
            id: user_id,
        })?;
    Ok(Json(DataResponse { data: subscription }))
}
