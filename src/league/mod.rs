pub mod aggregate;
pub mod clubs;
pub mod error;
pub mod matches;
pub mod standings;
pub mod validation;
