use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use rank_service::{RankCache, RankService};
use rank_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<RankService>,
	/// Held for the whole of every aggregation pass started by this process.
	pub pass_lock: Arc<Mutex<()>>,
	pub refresh_interval: Duration,
	pub run_on_start: bool,
}
impl AppState {
	pub async fn new(config: rank_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let db = Arc::new(db);
		let service = RankService::new(
			config.aggregation,
			db.clone(),
			db,
			Arc::new(RankCache::new()),
		);

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: RankService) -> Self {
		let refresh_interval = Duration::from_secs(service.cfg.refresh_interval_seconds);
		let run_on_start = service.cfg.run_on_start;

		Self {
			service: Arc::new(service),
			pass_lock: Arc::new(Mutex::new(())),
			refresh_interval,
			run_on_start,
		}
	}
}
