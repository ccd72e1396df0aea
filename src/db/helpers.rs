//! Helpers that turn store results into early-return responses for handlers.
//!
//! ```ignore
//! let user = ok_or_return!(require_record(find_by_username(pool, name).await, "User not found"));
//! ```

use actix_web::HttpResponse;

use crate::models::common::ApiResponse;

/// Macro for handlers returning `HttpResponse`.
/// Converts a `DbResult<T>` into an early return of the error response.
#[macro_export]
macro_rules! ok_or_return {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(response) => return response,
        }
    };
}

/// Result type for database operations that return an HttpResponse on error
pub type DbResult<T> = Result<T, HttpResponse>;

/// Unwrap an optional database result, returning NotFound if None.
pub fn require_record<T>(
    result: Result<Option<T>, sqlx::Error>,
    not_found_message: &str,
) -> DbResult<T> {
    match db_result(result)? {
        Some(record) => Ok(record),
        None => Err(HttpResponse::NotFound().json(ApiResponse::<()>::error(not_found_message))),
    }
}

/// Ensure a record does NOT exist, returning Conflict if it does.
pub fn ensure_not_exists<T>(
    result: Result<Option<T>, sqlx::Error>,
    conflict_message: &str,
) -> DbResult<()> {
    match db_result(result)? {
        Some(_) => Err(HttpResponse::Conflict().json(ApiResponse::<()>::error(conflict_message))),
        None => Ok(()),
    }
}

/// PostgreSQL SQLSTATE for a unique constraint violation
const UNIQUE_VIOLATION: &str = "23505";

/// Whether the store rejected a write because of a unique constraint
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db_error| db_error.code())
        .map(|code| code == UNIQUE_VIOLATION)
        .unwrap_or(false)
}

/// Unwrap an insert result, returning Conflict when a unique constraint
/// caught a duplicate that slipped past an earlier existence check.
pub fn insert_result<T>(result: Result<T, sqlx::Error>, conflict_message: &str) -> DbResult<T> {
    match result {
        Err(e) if is_unique_violation(&e) => {
            tracing::info!("Insert hit a unique constraint: {}", e);
            Err(HttpResponse::Conflict().json(ApiResponse::<()>::error(conflict_message)))
        }
        other => db_result(other),
    }
}

/// Unwrap a database result, returning InternalServerError on error.
pub fn db_result<T>(result: Result<T, sqlx::Error>) -> DbResult<T> {
    result.map_err(|e| {
        tracing::error!("Database error: {}", e);
        HttpResponse::InternalServerError().json(ApiResponse::<()>::error_with_message(
            "Internal Server Error",
            "Database error",
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_missing_record_maps_to_not_found() {
        let response = require_record::<u8>(Ok(None), "User not found").unwrap_err();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(require_record(Ok(Some(7u8)), "User not found").unwrap(), 7);
    }

    #[test]
    fn test_existing_record_maps_to_conflict() {
        let response = ensure_not_exists(Ok(Some(())), "Username already taken").unwrap_err();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(ensure_not_exists::<()>(Ok(None), "Username already taken").is_ok());
    }

    #[test]
    fn test_insert_result_passes_through_other_outcomes() {
        assert_eq!(insert_result(Ok(3u8), "Username already taken").unwrap(), 3);
        let response = insert_result::<()>(Err(sqlx::Error::PoolTimedOut), "Username already taken").unwrap_err();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn test_store_error_maps_to_internal_error() {
        let response = db_result::<()>(Err(sqlx::Error::PoolTimedOut)).unwrap_err();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
