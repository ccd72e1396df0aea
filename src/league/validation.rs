use std::collections::HashSet;
use uuid::Uuid;

use crate::league::error::LeagueError;
use crate::models::league_match::{ProposedMatch, ValidatedMatch};

pub const CLUB_NAME_MIN_LEN: usize = 3;
pub const CLUB_NAME_MAX_LEN: usize = 20;
pub const CITY_MIN_LEN: usize = 3;
pub const CITY_MAX_LEN: usize = 20;
pub const STADIUM_MIN_LEN: usize = 3;

/// Centralized validation for match batches and club fields
#[derive(Debug, Clone, Copy)]
pub struct LeagueValidator;

impl LeagueValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a batch of proposed matches as a whole.
    ///
    /// Nothing is written when this fails. Club existence is checked later,
    /// under row locks, by the recorder.
    pub fn validate_batch(&self, proposed: &[ProposedMatch]) -> Result<Vec<ValidatedMatch>, LeagueError> {
        if proposed.is_empty() {
            return Err(LeagueError::EmptyBatch);
        }

        let matches = proposed
            .iter()
            .enumerate()
            .map(|(index, proposed)| self.validate_match(index, proposed))
            .collect::<Result<Vec<_>, _>>()?;

        self.validate_participants(&matches)?;

        Ok(matches)
    }

    fn validate_match(&self, index: usize, proposed: &ProposedMatch) -> Result<ValidatedMatch, LeagueError> {
        let home_score = parse_goals(index, "homeScore", proposed.score.home_score.as_ref())?;
        let away_score = parse_goals(index, "awayScore", proposed.score.away_score.as_ref())?;

        if proposed.club_home == proposed.club_away {
            return Err(LeagueError::InvalidMatch { index });
        }

        Ok(ValidatedMatch {
            club_home: proposed.club_home,
            club_away: proposed.club_away,
            home_score,
            away_score,
        })
    }

    /// No club may fill more than one home/away slot in the batch
    fn validate_participants(&self, matches: &[ValidatedMatch]) -> Result<(), LeagueError> {
        let mut seen = HashSet::new();
        for club_id in matches.iter().flat_map(|m| [m.club_home, m.club_away]) {
            if !seen.insert(club_id) {
                return Err(LeagueError::DuplicateParticipant { club_id });
            }
        }
        Ok(())
    }

    /// Validate required club text fields, returning the trimmed values
    pub fn validate_club_fields(
        &self,
        club_name: &str,
        city: &str,
        stadium: &str,
    ) -> Result<(String, String, String), LeagueError> {
        Ok((
            self.validate_club_name(club_name)?,
            self.validate_city(city)?,
            self.validate_stadium(stadium)?,
        ))
    }

    pub fn validate_club_name(&self, club_name: &str) -> Result<String, LeagueError> {
        check_length("Club name", club_name, CLUB_NAME_MIN_LEN, Some(CLUB_NAME_MAX_LEN))
    }

    pub fn validate_city(&self, city: &str) -> Result<String, LeagueError> {
        check_length("City", city, CITY_MIN_LEN, Some(CITY_MAX_LEN))
    }

    pub fn validate_stadium(&self, stadium: &str) -> Result<String, LeagueError> {
        check_length("Stadium", stadium, STADIUM_MIN_LEN, None)
    }
}

impl Default for LeagueValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Goals must be a non-negative integer that fits the store column
fn parse_goals(
    index: usize,
    field: &'static str,
    value: Option<&serde_json::Number>,
) -> Result<i32, LeagueError> {
    let Some(value) = value else {
        return Ok(0);
    };

    value
        .as_u64()
        .and_then(|goals| i32::try_from(goals).ok())
        .ok_or(LeagueError::InvalidScore { index, field })
}

fn check_length(label: &str, value: &str, min: usize, max: Option<usize>) -> Result<String, LeagueError> {
    let trimmed = value.trim();
    let length = trimmed.chars().count();

    if trimmed.contains('\0') {
        return Err(LeagueError::InvalidClub(format!("{} contains invalid characters", label)));
    }

    match max {
        Some(max) if length < min || length > max => Err(LeagueError::InvalidClub(format!(
            "{} must be between {} and {} characters",
            label, min, max
        ))),
        None if length < min => Err(LeagueError::InvalidClub(format!(
            "{} must be at least {} characters",
            label, min
        ))),
        _ => Ok(trimmed.to_string()),
    }
}

/// Club ids referenced by a batch, sorted so locks are always taken in the same order
pub fn participant_ids(matches: &[ValidatedMatch]) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = matches
        .iter()
        .flat_map(|m| [m.club_home, m.club_away])
        .collect();
    ids.sort();
    ids.dedup();
    ids
}
