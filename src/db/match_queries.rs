use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::league_match::{LeagueMatch, MatchWithClubs, ValidatedMatch};

const MATCH_WITH_CLUBS: &str = r#"
    SELECT
        m.id, m.club_home, m.club_away, m.home_score, m.away_score, m.created_at, m.created_by,
        hc.club_name AS home_club_name,
        ac.club_name AS away_club_name
    FROM matches m
    JOIN clubs hc ON m.club_home = hc.id
    JOIN clubs ac ON m.club_away = ac.id
"#;

pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    proposed: &ValidatedMatch,
    created_by: Uuid,
) -> SqlxResult<LeagueMatch> {
    sqlx::query_as::<_, LeagueMatch>(
        r#"
        INSERT INTO matches (id, club_home, club_away, home_score, away_score, created_at, created_by)
        VALUES ($1, $2, $3, $4, $5, NOW(), $6)
        RETURNING id, club_home, club_away, home_score, away_score, created_at, created_by
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(proposed.club_home)
    .bind(proposed.club_away)
    .bind(proposed.home_score)
    .bind(proposed.away_score)
    .bind(created_by)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<Option<MatchWithClubs>> {
    let query = format!("{} WHERE m.id = $1", MATCH_WITH_CLUBS);
    sqlx::query_as::<_, MatchWithClubs>(&query)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// All recorded matches, newest first
pub async fn find_all<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<Vec<MatchWithClubs>> {
    let query = format!("{} ORDER BY m.created_at DESC, m.id", MATCH_WITH_CLUBS);
    sqlx::query_as::<_, MatchWithClubs>(&query)
        .fetch_all(executor)
        .await
}
