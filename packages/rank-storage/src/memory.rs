//! In-process backends for tests and local runs. Clones share the same underlying state.

use std::{
	collections::{BTreeMap, HashMap, HashSet},
	sync::{Arc, RwLock},
};

use time::OffsetDateTime;

use crate::{
	BoxFuture, Result, RankFeed, ScoreStore,
	cursor::feed_order,
	leaderboard::{self, ListedRecord},
	models::{LeaderboardPage, PageRequest, StorageObject, StorageRead, StorageWrite},
	objects,
};

type ObjectKey = (String, String, String);

#[derive(Clone, Default)]
pub struct MemoryScoreStore {
	objects: Arc<RwLock<BTreeMap<ObjectKey, StorageObject>>>,
}
impl MemoryScoreStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.objects.read().unwrap_or_else(|err| err.into_inner()).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
impl ScoreStore for MemoryScoreStore {
	fn read<'a>(&'a self, reads: &'a [StorageRead]) -> BoxFuture<'a, Result<Vec<StorageObject>>> {
		let objects = self.objects.read().unwrap_or_else(|err| err.into_inner());
		let mut found = Vec::new();
		let mut served = HashSet::new();

		for read in reads {
			let key = (read.collection.clone(), read.key.clone(), read.user_id.clone());

			if let Some(object) = objects.get(&key)
				&& served.insert(key)
			{
				found.push(object.clone());
			}
		}

		Box::pin(async move { Ok(found) })
	}

	fn write<'a>(&'a self, writes: &'a [StorageWrite]) -> BoxFuture<'a, Result<()>> {
		let result = objects::validate_writes(writes).map(|()| {
			let now = OffsetDateTime::now_utc();
			let mut objects = self.objects.write().unwrap_or_else(|err| err.into_inner());

			for write in writes {
				let key = (write.collection.clone(), write.key.clone(), write.user_id.clone());
				let create_time = objects.get(&key).map(|object| object.create_time).unwrap_or(now);

				objects.insert(
					key,
					StorageObject {
						collection: write.collection.clone(),
						key: write.key.clone(),
						user_id: write.user_id.clone(),
						value: write.value.clone(),
						permission_read: write.permission_read,
						permission_write: write.permission_write,
						create_time,
						update_time: now,
					},
				);
			}
		});

		Box::pin(async move { result })
	}
}

#[derive(Clone, Debug)]
struct FeedEntry {
	owner_id: String,
	username: Option<String>,
	score: i64,
	subscore: i64,
}

/// Ordered leaderboards held in memory, listed with the same cursor format as Postgres.
#[derive(Clone, Default)]
pub struct MemoryRankFeed {
	boards: Arc<RwLock<HashMap<(String, i64), Vec<FeedEntry>>>>,
}
impl MemoryRankFeed {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces an owner's non-expiring record.
	pub fn submit(&self, leaderboard_id: &str, owner_id: &str, score: i64, subscore: i64) {
		self.submit_with_expiry(leaderboard_id, owner_id, None, score, subscore, 0);
	}

	pub fn submit_with_expiry(
		&self,
		leaderboard_id: &str,
		owner_id: &str,
		username: Option<&str>,
		score: i64,
		subscore: i64,
		expiry: i64,
	) {
		let mut boards = self.boards.write().unwrap_or_else(|err| err.into_inner());
		let entries = boards.entry((leaderboard_id.to_string(), expiry)).or_default();

		entries.retain(|entry| entry.owner_id != owner_id);
		entries.push(FeedEntry {
			owner_id: owner_id.to_string(),
			username: username.map(str::to_string),
			score,
			subscore,
		});
		entries.sort_by(|a, b| {
			feed_order(
				(a.score, a.subscore, a.owner_id.as_str()),
				(b.score, b.subscore, b.owner_id.as_str()),
			)
		});
	}

	pub fn remove(&self, leaderboard_id: &str, owner_id: &str) {
		let mut boards = self.boards.write().unwrap_or_else(|err| err.into_inner());

		for ((board, _), entries) in boards.iter_mut() {
			if board == leaderboard_id {
				entries.retain(|entry| entry.owner_id != owner_id);
			}
		}
	}

	fn list(&self, req: PageRequest<'_>) -> Result<LeaderboardPage> {
		leaderboard::validate_page_request(&req)?;

		let cursor = leaderboard::decode_request_cursor(&req)?;
		let boards = self.boards.read().unwrap_or_else(|err| err.into_inner());
		let rows = boards
			.get(&(req.leaderboard_id.to_string(), req.expiry))
			.map(|entries| {
				entries
					.iter()
					.filter(|entry| {
						req.owner_ids.map(|ids| ids.contains(&entry.owner_id)).unwrap_or(true)
					})
					.filter(|entry| {
						cursor
							.as_ref()
							.map(|cursor| {
								cursor.precedes(entry.score, entry.subscore, &entry.owner_id)
							})
							.unwrap_or(true)
					})
					.take(req.limit as usize + 1)
					.map(|entry| ListedRecord {
						owner_id: entry.owner_id.clone(),
						username: entry.username.clone(),
						score: entry.score,
						subscore: entry.subscore,
					})
					.collect()
			})
			.unwrap_or_default();

		leaderboard::paginate(req.leaderboard_id, rows, req.limit, cursor.as_ref())
	}
}
impl RankFeed for MemoryRankFeed {
	fn list_page<'a>(&'a self, req: PageRequest<'a>) -> BoxFuture<'a, Result<LeaderboardPage>> {
		let result = self.list(req);

		Box::pin(async move { result })
	}
}
