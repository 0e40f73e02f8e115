pub mod ranking;
pub mod resource;
pub mod score;

pub use score::{CachedUserRecord, LeaderboardSnapshot, RankedEntry, ScoreRecord};
