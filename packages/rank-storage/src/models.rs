use time::OffsetDateTime;

/// Owner of objects that belong to no player, such as the published leaderboard.
pub const SYSTEM_USER_ID: &str = "";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageRead {
	pub collection: String,
	pub key: String,
	pub user_id: String,
}
impl StorageRead {
	pub fn new(
		collection: impl Into<String>,
		key: impl Into<String>,
		user_id: impl Into<String>,
	) -> Self {
		Self { collection: collection.into(), key: key.into(), user_id: user_id.into() }
	}

	pub fn system(collection: impl Into<String>, key: impl Into<String>) -> Self {
		Self::new(collection, key, SYSTEM_USER_ID)
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageWrite {
	pub collection: String,
	pub key: String,
	pub user_id: String,
	pub value: String,
	pub permission_read: i16,
	pub permission_write: i16,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct StorageObject {
	pub collection: String,
	pub key: String,
	pub user_id: String,
	pub value: String,
	pub permission_read: i16,
	pub permission_write: i16,
	pub create_time: OffsetDateTime,
	pub update_time: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRecord {
	pub leaderboard_id: String,
	pub owner_id: String,
	pub username: Option<String>,
	pub score: i64,
	pub subscore: i64,
	/// 1-based position within the listing that produced this page.
	pub rank: i64,
}

#[derive(Clone, Debug, Default)]
pub struct LeaderboardPage {
	pub records: Vec<LeaderboardRecord>,
	pub next_cursor: Option<String>,
}

#[derive(Clone, Copy, Debug)]
pub struct PageRequest<'a> {
	pub leaderboard_id: &'a str,
	/// Restricts the listing to these owners when set.
	pub owner_ids: Option<&'a [String]>,
	pub limit: u32,
	pub cursor: Option<&'a str>,
	/// Expiry bucket to read; 0 selects records that never expire.
	pub expiry: i64,
}
