use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub aggregation: Aggregation,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Aggregation {
	/// Identifier of the externally maintained leaderboard that supplies power positions.
	#[serde(default = "default_feed_id")]
	pub feed_id: String,
	#[serde(default = "default_page_size")]
	pub page_size: u32,
	#[serde(default = "default_refresh_interval_seconds")]
	pub refresh_interval_seconds: u64,
	#[serde(default = "default_true")]
	pub run_on_start: bool,
	/// Load the last durable snapshot into the cache before serving point reads.
	#[serde(default = "default_true")]
	pub warm_cache_on_start: bool,
	pub resource: Resource,
	#[serde(default)]
	pub snapshot: Snapshot,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Resource {
	#[serde(default = "default_resource_collection")]
	pub collection: String,
	#[serde(default = "default_resource_key")]
	pub key: String,
	/// Field of the per-user resource blob that holds the existing score.
	pub score_field_id: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Snapshot {
	#[serde(default = "default_snapshot_collection")]
	pub collection: String,
	#[serde(default = "default_snapshot_key")]
	pub key: String,
	#[serde(default = "default_permission_read")]
	pub permission_read: i16,
	#[serde(default)]
	pub permission_write: i16,
}
impl Default for Snapshot {
	fn default() -> Self {
		Self {
			collection: default_snapshot_collection(),
			key: default_snapshot_key(),
			permission_read: default_permission_read(),
			permission_write: 0,
		}
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_feed_id() -> String {
	"global_attack_rank".to_string()
}

fn default_page_size() -> u32 {
	1_000
}

fn default_refresh_interval_seconds() -> u64 {
	300
}

fn default_true() -> bool {
	true
}

fn default_resource_collection() -> String {
	"player_data".to_string()
}

fn default_resource_key() -> String {
	"user_resource".to_string()
}

fn default_snapshot_collection() -> String {
	"leaderboards".to_string()
}

fn default_snapshot_key() -> String {
	"final_rankings".to_string()
}

fn default_permission_read() -> i16 {
	2
}
