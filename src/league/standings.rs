use std::cmp::Ordering;

use sqlx::PgPool;

use crate::db::club_queries::{self, ClubOrder};
use crate::league::error::LeagueError;
use crate::models::club::Club;
use crate::models::standings::StandingRow;

/// Service responsible for the league table
#[derive(Debug)]
pub struct StandingsService {
    pool: PgPool,
}

impl StandingsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Current standings of all live clubs.
    ///
    /// Clubs are read in one statement, so each row is a consistent snapshot
    /// even while batches are being recorded.
    #[tracing::instrument(name = "Rank standings", skip(self))]
    pub async fn rank(&self) -> Result<Vec<StandingRow>, LeagueError> {
        let clubs = club_queries::find_many(&self.pool, ClubOrder::Registration).await?;
        let standings = rank_clubs(clubs);
        tracing::debug!("Ranked {} clubs", standings.len());
        Ok(standings)
    }
}

/// Points first, then goal difference, both descending.
///
/// Clubs level on both keep their relative input order; there is no
/// further tie-break.
pub fn compare_standings(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
}

/// Project clubs into an ordered table. The sort is stable.
pub fn rank_clubs(clubs: Vec<Club>) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = clubs
        .into_iter()
        .filter(|club| !club.is_deleted())
        .map(to_row)
        .collect();

    rows.sort_by(compare_standings);

    for (index, row) in rows.iter_mut().enumerate() {
        row.position = (index + 1) as u32;
    }
    rows
}

fn to_row(club: Club) -> StandingRow {
    let aggregate = &club.aggregate;
    StandingRow {
        position: 0,
        club_id: club.id,
        wins: aggregate.wins,
        draws: aggregate.draws,
        losses: aggregate.losses,
        goals_for: aggregate.goals_for,
        goals_against: aggregate.goals_against,
        goal_difference: aggregate.goal_difference(),
        points: aggregate.points,
        matches_played: aggregate.matches_played(),
        club_name: club.club_name,
    }
}
