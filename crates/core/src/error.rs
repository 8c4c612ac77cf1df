use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Generation reply did not parse: {0}")]
    GenerationParse(String),

    #[error("Upstream call failed: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
