use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use uuid::Uuid;

use crate::models::common::ApiResponse;

/// PostgreSQL SQLSTATE for a serialization failure
const SERIALIZATION_FAILURE: &str = "40001";
/// PostgreSQL SQLSTATE for a detected deadlock
const DEADLOCK_DETECTED: &str = "40P01";

#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("At least one match is required")]
    EmptyBatch,

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Match {index}: a club cannot play against itself")]
    InvalidMatch { index: usize },

    #[error("Club {club_id} can only be home or away once per batch")]
    DuplicateParticipant { club_id: Uuid },

    /// A batch references a club that does not exist or was deleted
    #[error("Club {club_id} not found")]
    UnknownClub { club_id: Uuid },

    #[error("Match {index}: {field} must be a non-negative integer")]
    InvalidScore { index: usize, field: &'static str },

    #[error("{0}")]
    InvalidClub(String),

    #[error("Club name '{0}' already exists")]
    DuplicateClubName(String),

    #[error("A concurrent update touched the same clubs, please retry")]
    ConcurrencyConflict,

    #[error("Database error: {0}")]
    StoreUnavailable(#[source] sqlx::Error),
}

impl LeagueError {
    pub fn club_not_found(id: Uuid) -> Self {
        LeagueError::NotFound { entity: "Club", id }
    }

    pub fn match_not_found(id: Uuid) -> Self {
        LeagueError::NotFound { entity: "Match", id }
    }

    /// Whether re-running the whole operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, LeagueError::ConcurrencyConflict)
    }
}

impl From<sqlx::Error> for LeagueError {
    fn from(error: sqlx::Error) -> Self {
        let is_conflict = error
            .as_database_error()
            .and_then(|db_error| db_error.code())
            .map(|code| code == SERIALIZATION_FAILURE || code == DEADLOCK_DETECTED)
            .unwrap_or(false);

        if is_conflict {
            LeagueError::ConcurrencyConflict
        } else {
            LeagueError::StoreUnavailable(error)
        }
    }
}

impl ResponseError for LeagueError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeagueError::EmptyBatch
            | LeagueError::InvalidMatch { .. }
            | LeagueError::DuplicateParticipant { .. }
            | LeagueError::UnknownClub { .. }
            | LeagueError::InvalidScore { .. }
            | LeagueError::InvalidClub(_) => StatusCode::BAD_REQUEST,
            LeagueError::NotFound { .. } => StatusCode::NOT_FOUND,
            LeagueError::DuplicateClubName(_) => StatusCode::CONFLICT,
            LeagueError::ConcurrencyConflict => StatusCode::SERVICE_UNAVAILABLE,
            LeagueError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            // Never leak SQL details to the client
            LeagueError::StoreUnavailable(e) => {
                tracing::error!("Database error: {}", e);
                ApiResponse::<()>::error_with_message("Internal Server Error", "Database error")
            }
            other => ApiResponse::<()>::error(other.to_string()),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
