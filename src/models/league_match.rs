use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::common::format_local_timestamp;

/// A recorded match. Immutable once written.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct LeagueMatch {
    pub id: Uuid,
    pub club_home: Uuid,
    pub club_away: Uuid,
    pub home_score: i32,
    pub away_score: i32,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

/// A match joined with the names of both clubs
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct MatchWithClubs {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub game: LeagueMatch,
    pub home_club_name: String,
    pub away_club_name: String,
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_local: Option<String>,
}

impl MatchWithClubs {
    pub fn with_local_time(mut self, offset: FixedOffset) -> Self {
        self.created_at_local = Some(format_local_timestamp(self.game.created_at, offset));
        self
    }
}

// Request DTOs. Field names follow the public match submission contract.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecordMatchesRequest {
    pub matches: Vec<ProposedMatch>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProposedMatch {
    pub club_home: Uuid,
    pub club_away: Uuid,
    #[serde(default)]
    pub score: ProposedScore,
}

/// Raw goal values as submitted; a missing value counts as 0
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProposedScore {
    #[serde(default)]
    pub home_score: Option<serde_json::Number>,
    #[serde(default)]
    pub away_score: Option<serde_json::Number>,
}

/// A proposed match that passed batch validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedMatch {
    pub club_home: Uuid,
    pub club_away: Uuid,
    pub home_score: i32,
    pub away_score: i32,
}
