use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

use crate::league::aggregate::ClubAggregate;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Club {
    pub id: Uuid,
    pub club_name: String,
    pub city: String,
    pub stadium: String,
    pub slug: String,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub aggregate: ClubAggregate,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
}

impl Club {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Club as returned by the detail and listing endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ClubResponse {
    #[serde(flatten)]
    pub club: Club,
    pub goal_difference: i32,
    pub matches_played: i32,
    pub created_at_local: String,
}

// Request DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateClubRequest {
    pub club_name: String,
    pub city: String,
    pub stadium: String,
}

impl fmt::Display for CreateClubRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "club_name: {}, city: {}, stadium: {}", self.club_name, self.city, self.stadium)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdateClubRequest {
    pub club_name: Option<String>,
    pub city: Option<String>,
    pub stadium: Option<String>,
}

/// Validated, normalized fields ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct ClubDetails {
    pub club_name: String,
    pub slug: String,
    pub city: String,
    pub stadium: String,
}
