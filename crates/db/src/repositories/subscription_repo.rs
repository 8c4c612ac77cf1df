//! Repository for the `subscriptions` table.
//!
//! Subscriptions require an account; anonymous sessions cannot hold one.

use mate_core::subscription::Plan;
use mate_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::subscription::Subscription;

const COLUMNS: &str = "\
    id, user_id, plan, status, order_id, current_period_end, \
    created_at, updated_at";

/// Provides data access for subscriptions.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Get the user's subscription, if any.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscriptions WHERE user_id = $1");
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or replace the user's subscription after a confirmed payment.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        plan: Plan,
        order_id: &str,
        current_period_end: Timestamp,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions (user_id, plan, status, order_id, current_period_end) \
             VALUES ($1, $2, 'active', $3, $4) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 plan = EXCLUDED.plan, \
                 status = 'active', \
                 order_id = EXCLUDED.order_id, \
                 current_period_end = EXCLUDED.current_period_end, \
                 updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .bind(plan.as_str())
            .bind(order_id)
            .bind(current_period_end)
            .fetch_one(pool)
            .await
    }

    /// Mark the user's subscription cancelled. It stays usable until the
    /// period end; expiry is a read-time comparison.
    pub async fn cancel(pool: &PgPool, user_id: DbId) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!(
            "UPDATE subscriptions SET status = 'cancelled', updated_at = now() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
