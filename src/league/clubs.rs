use sqlx::PgPool;
use uuid::Uuid;

use crate::config::league::LeagueSettings;
use crate::db::club_queries::{self, ClubOrder};
use crate::db::helpers::is_unique_violation;
use crate::league::error::LeagueError;
use crate::league::validation::LeagueValidator;
use crate::models::club::{Club, ClubDetails, ClubResponse, CreateClubRequest, UpdateClubRequest};
use crate::models::common::format_local_timestamp;

/// Service responsible for the club lifecycle outside of match recording
#[derive(Debug)]
pub struct ClubService {
    pool: PgPool,
    settings: LeagueSettings,
    validator: LeagueValidator,
}

impl ClubService {
    pub fn new(pool: PgPool, settings: LeagueSettings) -> Self {
        Self {
            pool,
            settings,
            validator: LeagueValidator::new(),
        }
    }

    #[tracing::instrument(name = "Create club", skip(self, request), fields(club_name = %request.club_name))]
    pub async fn create(&self, request: &CreateClubRequest, created_by: Uuid) -> Result<ClubResponse, LeagueError> {
        let (club_name, city, stadium) =
            self.validator
                .validate_club_fields(&request.club_name, &request.city, &request.stadium)?;
        let details = club_details(&club_name, city, stadium);

        if club_queries::name_taken(&self.pool, &details.club_name, None).await? {
            return Err(LeagueError::DuplicateClubName(details.club_name));
        }

        let club = club_queries::insert(&self.pool, &details, created_by)
            .await
            .map_err(|e| map_name_conflict(e, &details.club_name))?;

        tracing::info!("Created club {} ({})", club.club_name, club.id);
        Ok(self.to_response(club))
    }

    /// All live clubs, most recently created first
    pub async fn list(&self) -> Result<Vec<ClubResponse>, LeagueError> {
        let clubs = club_queries::find_many(&self.pool, ClubOrder::MostRecent).await?;
        Ok(clubs.into_iter().map(|club| self.to_response(club)).collect())
    }

    pub async fn detail(&self, club_id: Uuid) -> Result<ClubResponse, LeagueError> {
        club_queries::find_by_id(&self.pool, club_id)
            .await?
            .map(|club| self.to_response(club))
            .ok_or_else(|| LeagueError::club_not_found(club_id))
    }

    #[tracing::instrument(name = "Update club", skip(self, request), fields(club_id = %club_id))]
    pub async fn update(
        &self,
        club_id: Uuid,
        request: &UpdateClubRequest,
        updated_by: Uuid,
    ) -> Result<ClubResponse, LeagueError> {
        let mut tx = self.pool.begin().await?;

        let existing = club_queries::find_by_id(&mut *tx, club_id)
            .await?
            .ok_or_else(|| LeagueError::club_not_found(club_id))?;

        let club_name = match &request.club_name {
            Some(name) => self.validator.validate_club_name(name)?,
            None => existing.club_name.clone(),
        };
        let city = match &request.city {
            Some(city) => self.validator.validate_city(city)?,
            None => existing.city.clone(),
        };
        let stadium = match &request.stadium {
            Some(stadium) => self.validator.validate_stadium(stadium)?,
            None => existing.stadium.clone(),
        };
        let details = club_details(&club_name, city, stadium);

        if club_queries::name_taken(&mut *tx, &details.club_name, Some(club_id)).await? {
            return Err(LeagueError::DuplicateClubName(details.club_name));
        }

        let club = club_queries::update_details(&mut *tx, club_id, &details, updated_by)
            .await
            .map_err(|e| map_name_conflict(e, &details.club_name))?
            .ok_or_else(|| LeagueError::club_not_found(club_id))?;

        tx.commit().await?;
        Ok(self.to_response(club))
    }

    /// Soft-delete a club. Its recorded matches and aggregates stay in place,
    /// but it disappears from listings, standings and future batches.
    #[tracing::instrument(name = "Delete club", skip(self), fields(club_id = %club_id))]
    pub async fn soft_delete(&self, club_id: Uuid, deleted_by: Uuid) -> Result<(), LeagueError> {
        if club_queries::soft_delete(&self.pool, club_id, deleted_by).await? {
            tracing::info!("Club {} soft-deleted by {}", club_id, deleted_by);
            Ok(())
        } else {
            Err(LeagueError::club_not_found(club_id))
        }
    }

    fn to_response(&self, club: Club) -> ClubResponse {
        ClubResponse {
            goal_difference: club.aggregate.goal_difference(),
            matches_played: club.aggregate.matches_played(),
            created_at_local: format_local_timestamp(club.created_at, self.settings.display_offset()),
            club,
        }
    }
}

fn club_details(club_name: &str, city: String, stadium: String) -> ClubDetails {
    let club_name = normalize_club_name(club_name);
    ClubDetails {
        slug: slugify(&club_name),
        club_name,
        city,
        stadium,
    }
}

/// The live-name unique index backs up the explicit check under races
fn map_name_conflict(error: sqlx::Error, club_name: &str) -> LeagueError {
    if is_unique_violation(&error) {
        LeagueError::DuplicateClubName(club_name.to_string())
    } else {
        LeagueError::from(error)
    }
}

/// Title-case each word and collapse inner whitespace
pub fn normalize_club_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Lowercase, hyphen-separated form of a club name
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
