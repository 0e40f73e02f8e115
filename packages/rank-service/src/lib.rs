pub mod aggregate;
pub mod cache;
pub mod query;

mod error;

pub use aggregate::PassReport;
pub use cache::RankCache;
pub use error::{Error, Result};
pub use query::{UserScoreRequest, UserScoreResponse};

use std::sync::Arc;

use rank_config::Aggregation;
use rank_storage::{RankFeed, ScoreStore};

/// Passes are not serialized here. Callers that may start passes concurrently must hold their own
/// lock around [`RankService::precompute_leaderboard`].
pub struct RankService {
	pub cfg: Aggregation,
	pub store: Arc<dyn ScoreStore>,
	pub feed: Arc<dyn RankFeed>,
	pub cache: Arc<RankCache>,
}
impl RankService {
	pub fn new(
		cfg: Aggregation,
		store: Arc<dyn ScoreStore>,
		feed: Arc<dyn RankFeed>,
		cache: Arc<RankCache>,
	) -> Self {
		Self { cfg, store, feed, cache }
	}
}
