use serde::{Deserialize, Serialize};

/// One player's combined standing produced by an aggregation pass.
///
/// `total_score` is always `power_score + existing_score`. The fields are private so the sum can
/// only be derived, never assigned; decoding rejects records whose stored total disagrees.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawScoreRecord")]
pub struct ScoreRecord {
	user_id: String,
	power_score: i64,
	existing_score: i64,
	total_score: i64,
}
impl ScoreRecord {
	pub fn new(user_id: impl Into<String>, power_score: i64, existing_score: i64) -> Self {
		Self {
			user_id: user_id.into(),
			power_score,
			existing_score,
			total_score: power_score.saturating_add(existing_score),
		}
	}

	/// All-zero record answered for users the cache has not seen.
	pub fn empty(user_id: impl Into<String>) -> Self {
		Self::new(user_id, 0, 0)
	}

	pub fn user_id(&self) -> &str {
		&self.user_id
	}

	pub fn power_score(&self) -> i64 {
		self.power_score
	}

	pub fn existing_score(&self) -> i64 {
		self.existing_score
	}

	pub fn total_score(&self) -> i64 {
		self.total_score
	}
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScoreRecord {
	user_id: String,
	power_score: i64,
	existing_score: i64,
	total_score: i64,
}
impl TryFrom<RawScoreRecord> for ScoreRecord {
	type Error = String;

	fn try_from(raw: RawScoreRecord) -> Result<Self, Self::Error> {
		let record = Self::new(raw.user_id, raw.power_score, raw.existing_score);

		if record.total_score != raw.total_score {
			return Err(format!(
				"totalScore {} for user {} does not equal powerScore {} + existingScore {}.",
				raw.total_score, record.user_id, record.power_score, record.existing_score
			));
		}

		Ok(record)
	}
}

/// Entry read from the external ordered feed. `rank` is the feed's own 1-based position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedEntry {
	pub owner_id: String,
	pub rank: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedUserRecord {
	pub user_id: String,
	pub user_score: ScoreRecord,
}
impl CachedUserRecord {
	pub fn new(score: ScoreRecord) -> Self {
		Self { user_id: score.user_id().to_string(), user_score: score }
	}
}

/// The full sorted leaderboard published by one pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSnapshot {
	pub final_rankings: Vec<ScoreRecord>,
}
impl LeaderboardSnapshot {
	pub fn encode(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}

	pub fn decode(raw: &str) -> serde_json::Result<Self> {
		serde_json::from_str(raw)
	}

	pub fn len(&self) -> usize {
		self.final_rankings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.final_rankings.is_empty()
	}
}
