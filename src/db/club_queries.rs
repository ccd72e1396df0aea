//! Club store.
//!
//! Every read here hides soft-deleted clubs; callers never repeat the
//! predicate themselves.

use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::league::aggregate::ClubAggregate;
use crate::models::club::{Club, ClubDetails};

const CLUB_COLUMNS: &str = r#"
    id, club_name, city, stadium, slug,
    wins, draws, losses, goals_for, goals_against, points, match_ids,
    created_at, created_by, updated_at, updated_by, deleted_at, deleted_by
"#;

/// Default read predicate for clubs
const LIVE_CLUB: &str = "deleted_at IS NULL";

/// Listing order for [`find_many`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClubOrder {
    /// Oldest first, ties by id. Stable across calls.
    Registration,
    MostRecent,
}

impl ClubOrder {
    fn as_sql(&self) -> &'static str {
        match self {
            ClubOrder::Registration => "created_at ASC, id ASC",
            ClubOrder::MostRecent => "created_at DESC, id DESC",
        }
    }
}

pub async fn find_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<Option<Club>> {
    let query = format!("SELECT {} FROM clubs WHERE id = $1 AND {}", CLUB_COLUMNS, LIVE_CLUB);
    sqlx::query_as::<_, Club>(&query)
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_many<'e>(executor: impl PgExecutor<'e>, order: ClubOrder) -> SqlxResult<Vec<Club>> {
    let query = format!(
        "SELECT {} FROM clubs WHERE {} ORDER BY {}",
        CLUB_COLUMNS, LIVE_CLUB, order.as_sql()
    );
    sqlx::query_as::<_, Club>(&query)
        .fetch_all(executor)
        .await
}

/// Load and row-lock the given clubs for the rest of the transaction.
///
/// Rows are locked in id order so concurrent batches over overlapping clubs
/// queue up instead of deadlocking. Missing or deleted ids are simply absent
/// from the result.
pub async fn lock_for_update<'e>(executor: impl PgExecutor<'e>, ids: &[Uuid]) -> SqlxResult<Vec<Club>> {
    let query = format!(
        "SELECT {} FROM clubs WHERE id = ANY($1) AND {} ORDER BY id FOR UPDATE",
        CLUB_COLUMNS, LIVE_CLUB
    );
    sqlx::query_as::<_, Club>(&query)
        .bind(ids)
        .fetch_all(executor)
        .await
}

/// Case-insensitive name check among live clubs, optionally ignoring one club
pub async fn name_taken<'e>(
    executor: impl PgExecutor<'e>,
    club_name: &str,
    excluding: Option<Uuid>,
) -> SqlxResult<bool> {
    let query = format!(
        "SELECT EXISTS (
            SELECT 1 FROM clubs
            WHERE LOWER(club_name) = LOWER($1) AND {} AND ($2::uuid IS NULL OR id <> $2)
        )",
        LIVE_CLUB
    );
    sqlx::query_scalar::<_, bool>(&query)
        .bind(club_name)
        .bind(excluding)
        .fetch_one(executor)
        .await
}

pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    details: &ClubDetails,
    created_by: Uuid,
) -> SqlxResult<Club> {
    let query = format!(
        "INSERT INTO clubs (id, club_name, city, stadium, slug, created_at, created_by)
         VALUES ($1, $2, $3, $4, $5, NOW(), $6)
         RETURNING {}",
        CLUB_COLUMNS
    );
    sqlx::query_as::<_, Club>(&query)
        .bind(Uuid::new_v4())
        .bind(&details.club_name)
        .bind(&details.city)
        .bind(&details.stadium)
        .bind(&details.slug)
        .bind(created_by)
        .fetch_one(executor)
        .await
}

/// Update descriptive fields only; aggregates are untouched here
pub async fn update_details<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    details: &ClubDetails,
    updated_by: Uuid,
) -> SqlxResult<Option<Club>> {
    let query = format!(
        "UPDATE clubs
         SET club_name = $2, city = $3, stadium = $4, slug = $5, updated_at = NOW(), updated_by = $6
         WHERE id = $1 AND {}
         RETURNING {}",
        LIVE_CLUB, CLUB_COLUMNS
    );
    sqlx::query_as::<_, Club>(&query)
        .bind(id)
        .bind(&details.club_name)
        .bind(&details.city)
        .bind(&details.stadium)
        .bind(&details.slug)
        .bind(updated_by)
        .fetch_optional(executor)
        .await
}

/// Persist a club's aggregate in a single statement so readers never see
/// a partially applied result.
pub async fn update_aggregate<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    aggregate: &ClubAggregate,
    updated_by: Uuid,
) -> SqlxResult<Option<Club>> {
    let query = format!(
        "UPDATE clubs
         SET wins = $2, draws = $3, losses = $4, goals_for = $5, goals_against = $6,
             points = $7, match_ids = $8, updated_at = NOW(), updated_by = $9
         WHERE id = $1 AND {}
         RETURNING {}",
        LIVE_CLUB, CLUB_COLUMNS
    );
    sqlx::query_as::<_, Club>(&query)
        .bind(id)
        .bind(aggregate.wins)
        .bind(aggregate.draws)
        .bind(aggregate.losses)
        .bind(aggregate.goals_for)
        .bind(aggregate.goals_against)
        .bind(aggregate.points)
        .bind(&aggregate.match_ids[..])
        .bind(updated_by)
        .fetch_optional(executor)
        .await
}

/// Mark a club deleted. Returns false when it was already gone.
pub async fn soft_delete<'e>(executor: impl PgExecutor<'e>, id: Uuid, deleted_by: Uuid) -> SqlxResult<bool> {
    let query = format!(
        "UPDATE clubs SET deleted_at = NOW(), deleted_by = $2 WHERE id = $1 AND {}",
        LIVE_CLUB
    );
    let result = sqlx::query(&query)
        .bind(id)
        .bind(deleted_by)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() == 1)
}
