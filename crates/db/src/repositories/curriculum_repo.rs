//! Repository for the `curricula`, `curriculum_modules`, and `contents`
//! tables.

use mate_core::identity::Identity;
use mate_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use mate_core::types::DbId;
use sqlx::PgPool;

use crate::models::curriculum::{Content, Curriculum, CurriculumModule, NewCurriculum};

const COLUMNS: &str = "id, user_id, session_token, title, industry, stage, goal, created_at";

const MODULE_COLUMNS: &str = "id, curriculum_id, week_number, theme";

const CONTENT_COLUMNS: &str = "id, module_id, position, title, summary, kind";

/// Provides data access for generated curricula and their contents.
pub struct CurriculumRepo;

impl CurriculumRepo {
    /// Persist a parsed curriculum plan: the curriculum row, one module per
    /// week, and the contents of each module, in a single transaction.
    pub async fn create(
        pool: &PgPool,
        identity: Identity,
        new: &NewCurriculum,
    ) -> Result<Curriculum, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let mut tx = pool.begin().await?;

        let insert_curriculum = format!(
            "INSERT INTO curricula (user_id, session_token, title, industry, stage, goal) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let curriculum = sqlx::query_as::<_, Curriculum>(&insert_curriculum)
            .bind(user_id)
            .bind(session_token)
            .bind(&new.title)
            .bind(&new.industry)
            .bind(&new.stage)
            .bind(&new.goal)
            .fetch_one(&mut *tx)
            .await?;

        for week in &new.weeks {
            let module_id: DbId = sqlx::query_scalar(
                "INSERT INTO curriculum_modules (curriculum_id, week_number, theme) \
                 VALUES ($1, $2, $3) \
                 RETURNING id",
            )
            .bind(curriculum.id)
            .bind(week.week_number)
            .bind(&week.theme)
            .fetch_one(&mut *tx)
            .await?;

            for (position, item) in week.items.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO contents (module_id, position, title, summary, kind) \
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(module_id)
                .bind(position as i32 + 1)
                .bind(&item.title)
                .bind(&item.summary)
                .bind(&item.kind)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(curriculum)
    }

    /// List the identity's curricula, newest first.
    pub async fn list(
        pool: &PgPool,
        identity: Identity,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Curriculum>, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let limit = clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} FROM curricula \
             WHERE (user_id = $1 OR session_token = $2) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Curriculum>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Get one curriculum, scoped to the identity.
    pub async fn find(
        pool: &PgPool,
        identity: Identity,
        id: DbId,
    ) -> Result<Option<Curriculum>, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let query = format!(
            "SELECT {COLUMNS} FROM curricula \
             WHERE id = $3 AND (user_id = $1 OR session_token = $2)"
        );
        sqlx::query_as::<_, Curriculum>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a curriculum's modules ordered by week.
    pub async fn list_modules(
        pool: &PgPool,
        curriculum_id: DbId,
    ) -> Result<Vec<CurriculumModule>, sqlx::Error> {
        let query = format!(
            "SELECT {MODULE_COLUMNS} FROM curriculum_modules \
             WHERE curriculum_id = $1 \
             ORDER BY week_number"
        );
        sqlx::query_as::<_, CurriculumModule>(&query)
            .bind(curriculum_id)
            .fetch_all(pool)
            .await
    }

    /// List a module's contents in display order.
    pub async fn list_contents(pool: &PgPool, module_id: DbId) -> Result<Vec<Content>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTENT_COLUMNS} FROM contents \
             WHERE module_id = $1 \
             ORDER BY position"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(module_id)
            .fetch_all(pool)
            .await
    }

    /// Check whether a module belongs to one of the identity's curricula.
    pub async fn module_owned_by(
        pool: &PgPool,
        identity: Identity,
        module_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let owned: Option<DbId> = sqlx::query_scalar(
            "SELECT m.id FROM curriculum_modules m \
             JOIN curricula c ON c.id = m.curriculum_id \
             WHERE m.id = $3 AND (c.user_id = $1 OR c.session_token = $2)",
        )
        .bind(user_id)
        .bind(session_token)
        .bind(module_id)
        .fetch_optional(pool)
        .await?;
        Ok(owned.is_some())
    }
}
