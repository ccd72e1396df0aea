pub mod club_queries;
pub mod helpers;
pub mod match_queries;
pub mod user_queries;
