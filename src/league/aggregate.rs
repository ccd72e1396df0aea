use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::league::error::LeagueError;

pub const POINTS_FOR_WIN: i32 = 3;
pub const POINTS_FOR_DRAW: i32 = 1;

/// Outcome of a match from one club's point of view
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Win,
    Loss,
    Draw,
}

impl MatchOutcome {
    pub fn from_score(goals_scored: i32, goals_conceded: i32) -> Self {
        match goals_scored.cmp(&goals_conceded) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    /// The same result seen from the opponent's side
    pub fn inverse(&self) -> Self {
        match self {
            MatchOutcome::Win => MatchOutcome::Loss,
            MatchOutcome::Loss => MatchOutcome::Win,
            MatchOutcome::Draw => MatchOutcome::Draw,
        }
    }

    pub fn points(&self) -> i32 {
        match self {
            MatchOutcome::Win => POINTS_FOR_WIN,
            MatchOutcome::Draw => POINTS_FOR_DRAW,
            MatchOutcome::Loss => 0,
        }
    }
}

/// Running season totals of a single club.
///
/// Only the match recorder mutates these, and only through
/// [`ClubAggregate::apply_result`]. Goal difference and matches played are
/// always derived from the stored counters.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ClubAggregate {
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub points: i32,
    pub match_ids: Vec<Uuid>,
}

/// A running total that cannot absorb another result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalOverflow {
    pub total: &'static str,
}

fn add_to(total: &'static str, current: i32, amount: i32) -> Result<i32, TotalOverflow> {
    current.checked_add(amount).ok_or(TotalOverflow { total })
}

impl ClubAggregate {
    /// Fold one recorded match into the totals.
    ///
    /// Leaves the aggregate unchanged when any total would overflow.
    pub fn apply_result(
        &mut self,
        match_id: Uuid,
        goals_scored: i32,
        goals_conceded: i32,
    ) -> Result<(), TotalOverflow> {
        let outcome = MatchOutcome::from_score(goals_scored, goals_conceded);
        let (wins, draws, losses) = match outcome {
            MatchOutcome::Win => (add_to("wins", self.wins, 1)?, self.draws, self.losses),
            MatchOutcome::Loss => (self.wins, self.draws, add_to("losses", self.losses, 1)?),
            MatchOutcome::Draw => (self.wins, add_to("draws", self.draws, 1)?, self.losses),
        };
        let points = add_to("points", self.points, outcome.points())?;
        let goals_for = add_to("goals_for", self.goals_for, goals_scored)?;
        let goals_against = add_to("goals_against", self.goals_against, goals_conceded)?;

        self.wins = wins;
        self.draws = draws;
        self.losses = losses;
        self.points = points;
        self.goals_for = goals_for;
        self.goals_against = goals_against;
        self.match_ids.push(match_id);
        Ok(())
    }

    pub fn goal_difference(&self) -> i32 {
        self.goals_for - self.goals_against
    }

    pub fn matches_played(&self) -> i32 {
        self.wins + self.draws + self.losses
    }

    /// Check the counters agree with each other.
    ///
    /// Returns a description of the first broken rule.
    pub fn check_consistency(&self) -> Result<(), String> {
        let counters = [
            ("wins", self.wins),
            ("draws", self.draws),
            ("losses", self.losses),
            ("goals_for", self.goals_for),
            ("goals_against", self.goals_against),
            ("points", self.points),
        ];
        if let Some((name, value)) = counters.iter().find(|(_, value)| *value < 0) {
            return Err(format!("{} is negative ({})", name, value));
        }

        let expected_points = POINTS_FOR_WIN * self.wins + POINTS_FOR_DRAW * self.draws;
        if self.points != expected_points {
            return Err(format!(
                "points {} do not match 3 * {} wins + {} draws",
                self.points, self.wins, self.draws
            ));
        }

        if self.matches_played() as usize != self.match_ids.len() {
            return Err(format!(
                "{} results recorded but {} match ids referenced",
                self.matches_played(),
                self.match_ids.len()
            ));
        }

        Ok(())
    }
}

/// Apply a final score to both participating clubs.
///
/// Either both aggregates take the result or neither does. A total that
/// would overflow is reported as an invalid score of the match at `index`.
pub fn apply_match(
    home: &mut ClubAggregate,
    away: &mut ClubAggregate,
    match_id: Uuid,
    index: usize,
    home_goals: i32,
    away_goals: i32,
) -> Result<(), LeagueError> {
    let mut new_home = home.clone();
    let mut new_away = away.clone();
    new_home
        .apply_result(match_id, home_goals, away_goals)
        .map_err(|overflow| score_overflow(index, overflow, true))?;
    new_away
        .apply_result(match_id, away_goals, home_goals)
        .map_err(|overflow| score_overflow(index, overflow, false))?;

    *home = new_home;
    *away = new_away;
    Ok(())
}

/// Blame the submitted score that fed the overflowing total
fn score_overflow(index: usize, overflow: TotalOverflow, home_side: bool) -> LeagueError {
    let conceded = overflow.total == "goals_against";
    let field = if home_side != conceded { "homeScore" } else { "awayScore" };
    LeagueError::InvalidScore { index, field }
}
