use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::config::league::LeagueSettings;
use crate::db::{club_queries, match_queries};
use crate::league::aggregate::apply_match;
use crate::league::error::LeagueError;
use crate::league::validation::{participant_ids, LeagueValidator};
use crate::models::club::Club;
use crate::models::league_match::{MatchWithClubs, ProposedMatch, ValidatedMatch};

/// Records match results and keeps club aggregates in step with them
#[derive(Debug)]
pub struct MatchService {
    pool: PgPool,
    settings: LeagueSettings,
    validator: LeagueValidator,
}

impl MatchService {
    pub fn new(pool: PgPool, settings: LeagueSettings) -> Self {
        Self {
            pool,
            settings,
            validator: LeagueValidator::new(),
        }
    }

    /// Record a batch of results atomically.
    ///
    /// Either every match is stored and every involved aggregate updated, or
    /// nothing is. A lock conflict re-runs the whole batch up to
    /// `max_batch_retries` times before it is surfaced.
    #[tracing::instrument(
        name = "Record match batch",
        skip(self, proposed),
        fields(
            batch_size = proposed.len(),
            recorded_by = %recorded_by
        )
    )]
    pub async fn record_batch(
        &self,
        proposed: &[ProposedMatch],
        recorded_by: Uuid,
    ) -> Result<Vec<MatchWithClubs>, LeagueError> {
        let matches = self.validator.validate_batch(proposed)?;

        let mut attempt = 0;
        loop {
            match self.try_record_batch(&matches, recorded_by).await {
                Err(e) if e.is_retryable() && attempt < self.settings.max_batch_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Conflict while recording batch, retrying ({}/{})",
                        attempt, self.settings.max_batch_retries
                    );
                    tokio::time::sleep(self.settings.backoff_for(attempt)).await;
                }
                result => return result,
            }
        }
    }

    /// One attempt inside a single transaction.
    ///
    /// Returning early or dropping the future drops `tx` uncommitted, which
    /// rolls back everything written so far.
    async fn try_record_batch(
        &self,
        matches: &[ValidatedMatch],
        recorded_by: Uuid,
    ) -> Result<Vec<MatchWithClubs>, LeagueError> {
        let mut tx = self.pool.begin().await?;

        let club_ids = participant_ids(matches);
        let mut clubs: HashMap<Uuid, Club> = club_queries::lock_for_update(&mut *tx, &club_ids)
            .await?
            .into_iter()
            .map(|club| (club.id, club))
            .collect();

        if let Some(missing) = club_ids.iter().find(|id| !clubs.contains_key(*id)) {
            tracing::info!("Rejecting batch, club {} does not exist", missing);
            return Err(LeagueError::UnknownClub { club_id: *missing });
        }

        let offset = self.settings.display_offset();
        let mut recorded = Vec::with_capacity(matches.len());

        for (index, proposed) in matches.iter().enumerate() {
            let game = match_queries::insert(&mut *tx, proposed, recorded_by).await?;

            // Each club appears once per batch, so it can be taken out of the map
            let mut home = take_club(&mut clubs, proposed.club_home)?;
            let mut away = take_club(&mut clubs, proposed.club_away)?;

            apply_match(
                &mut home.aggregate,
                &mut away.aggregate,
                game.id,
                index,
                proposed.home_score,
                proposed.away_score,
            )?;

            for club in [&home, &away] {
                club_queries::update_aggregate(&mut *tx, club.id, &club.aggregate, recorded_by)
                    .await?
                    .ok_or(LeagueError::UnknownClub { club_id: club.id })?;
            }

            tracing::info!(
                "Recorded match {}: {} {} - {} {}",
                game.id, home.club_name, game.home_score, game.away_score, away.club_name
            );

            recorded.push(
                MatchWithClubs {
                    game,
                    home_club_name: home.club_name,
                    away_club_name: away.club_name,
                    created_at_local: None,
                }
                .with_local_time(offset),
            );
        }

        tx.commit().await?;
        Ok(recorded)
    }

    pub async fn detail(&self, match_id: Uuid) -> Result<MatchWithClubs, LeagueError> {
        let offset = self.settings.display_offset();
        match_queries::find_by_id(&self.pool, match_id)
            .await?
            .map(|game| game.with_local_time(offset))
            .ok_or_else(|| LeagueError::match_not_found(match_id))
    }

    /// All recorded matches, newest first
    pub async fn list(&self) -> Result<Vec<MatchWithClubs>, LeagueError> {
        let offset = self.settings.display_offset();
        let matches = match_queries::find_all(&self.pool).await?;
        Ok(matches.into_iter().map(|game| game.with_local_time(offset)).collect())
    }
}

fn take_club(clubs: &mut HashMap<Uuid, Club>, club_id: Uuid) -> Result<Club, LeagueError> {
    clubs
        .remove(&club_id)
        .ok_or(LeagueError::UnknownClub { club_id })
}
