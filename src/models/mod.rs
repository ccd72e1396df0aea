pub mod auth;
pub mod club;
pub mod common;
pub mod league_match;
pub mod standings;
pub mod user;
