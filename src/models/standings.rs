use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of the standings table
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StandingRow {
    pub position: u32,
    pub club_id: Uuid,
    pub club_name: String,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
    pub points: i32,
    pub matches_played: i32,
}
