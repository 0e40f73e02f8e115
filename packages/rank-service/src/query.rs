use serde::{Deserialize, Serialize};

use rank_domain::{LeaderboardSnapshot, ScoreRecord};
use rank_storage::{models::StorageRead, objects};

use crate::{Error, RankService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScoreRequest {
	pub user_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScoreResponse {
	pub user_score: ScoreRecord,
	pub rank_info: String,
}

impl RankService {
	pub async fn get_user_score(&self, req: UserScoreRequest) -> Result<UserScoreResponse> {
		let user_id = req.user_id.trim();

		if user_id.is_empty() {
			return Err(Error::InvalidRequest { message: "userId is required.".to_string() });
		}

		let user_score = match self.cache.get(user_id) {
			Some(record) => record.user_score,
			None => {
				tracing::debug!(%user_id, "User score not cached.");

				ScoreRecord::empty(user_id)
			},
		};
		let rank_info = self.read_snapshot_payload().await?.unwrap_or_default();

		Ok(UserScoreResponse { user_score, rank_info })
	}

	pub async fn leaderboard(&self) -> Result<Option<LeaderboardSnapshot>> {
		let Some(raw) = self.read_snapshot_payload().await? else {
			return Ok(None);
		};
		let snapshot = LeaderboardSnapshot::decode(&raw)
			.map_err(|err| Error::MalformedSnapshot { message: err.to_string() })?;

		Ok(Some(snapshot))
	}

	pub async fn warm_cache(&self) -> Result<usize> {
		let Some(snapshot) = self.leaderboard().await? else {
			tracing::info!("No published leaderboard to warm the cache from.");

			return Ok(0);
		};
		let count = snapshot.len();

		for record in snapshot.final_rankings {
			self.cache.upsert_score(record);
		}

		tracing::info!(users = count, "Rank cache warmed from durable snapshot.");

		Ok(count)
	}

	pub fn evict(&self, user_id: &str) -> bool {
		self.cache.delete(user_id.trim())
	}

	async fn read_snapshot_payload(&self) -> Result<Option<String>> {
		let read = StorageRead::system(&self.cfg.snapshot.collection, &self.cfg.snapshot.key);
		let object = objects::read_value(self.store.as_ref(), read).await.map_err(|err| {
			tracing::error!(error = %err, "Failed to fetch cached leaderboard.");

			Error::store(err)
		})?;

		Ok(object.map(|object| object.value))
	}
}
