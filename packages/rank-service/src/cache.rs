use dashmap::{DashMap, mapref::entry::Entry};

use rank_domain::{CachedUserRecord, ScoreRecord};

/// Process-local map from user id to that user's latest published record.
///
/// Writes are atomic per key only. Readers always receive an owned copy.
#[derive(Debug, Default)]
pub struct RankCache {
	entries: DashMap<String, CachedUserRecord>,
}
impl RankCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(&self, user_id: impl Into<String>, record: CachedUserRecord) {
		self.entries.insert(user_id.into(), record);
	}

	pub fn get(&self, user_id: &str) -> Option<CachedUserRecord> {
		self.entries.get(user_id).map(|entry| entry.value().clone())
	}

	pub fn delete(&self, user_id: &str) -> bool {
		self.entries.remove(user_id).is_some()
	}

	/// Replaces the score of an existing entry, leaving its other fields alone, or inserts one.
	pub fn upsert_score(&self, score: ScoreRecord) {
		match self.entries.entry(score.user_id().to_string()) {
			Entry::Occupied(mut entry) => entry.get_mut().user_score = score,
			Entry::Vacant(entry) => {
				entry.insert(CachedUserRecord::new(score));
			},
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
