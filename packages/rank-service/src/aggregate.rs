use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use rank_domain::{
	LeaderboardSnapshot, RankedEntry, ScoreRecord,
	ranking::{self, PowerScore},
	resource,
};
use rank_storage::{
	models::{PageRequest, SYSTEM_USER_ID, StorageWrite},
	objects,
};

use crate::{Error, RankService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PassReport {
	pub pages: usize,
	pub records: usize,
	#[serde(with = "time::serde::rfc3339")]
	pub published_at: OffsetDateTime,
}

struct Collected {
	pages: usize,
	records: Vec<ScoreRecord>,
}

impl RankService {
	/// A failure at any stage aborts the pass before anything is published. The durable snapshot
	/// and the cache then keep the previous pass's state.
	pub async fn precompute_leaderboard(&self) -> Result<PassReport> {
		tracing::info!(feed_id = %self.cfg.feed_id, "Precomputing final leaderboard.");

		let Collected { pages, mut records } = self.collect_scores().await?;

		ranking::sort_leaderboard(&mut records);

		let count = records.len();

		self.publish(LeaderboardSnapshot { final_rankings: records }).await?;

		let report = PassReport { pages, records: count, published_at: OffsetDateTime::now_utc() };

		tracing::info!(pages, records = count, "Final leaderboard published.");

		Ok(report)
	}

	async fn collect_scores(&self) -> Result<Collected> {
		let mut cursor: Option<String> = None;
		let mut seen: HashSet<String> = HashSet::new();
		let mut records = Vec::new();
		let mut pages = 0;

		loop {
			let page = self
				.feed
				.list_page(PageRequest {
					leaderboard_id: &self.cfg.feed_id,
					owner_ids: None,
					limit: self.cfg.page_size,
					cursor: cursor.as_deref(),
					expiry: 0,
				})
				.await
				.map_err(|err| {
					tracing::error!(
						error = %err,
						page = pages + 1,
						"Failed to fetch leaderboard page."
					);

					Error::feed(err)
				})?;

			pages += 1;

			if page.records.is_empty() {
				break;
			}

			let entries: Vec<RankedEntry> = page
				.records
				.into_iter()
				.map(|record| RankedEntry { owner_id: record.owner_id, rank: record.rank })
				.collect();
			let power: Vec<PowerScore> = ranking::power_scores(&entries)
				.into_iter()
				.filter(|entry| !seen.contains(&entry.user_id))
				.collect();
			let existing = self.fetch_existing_scores(&power).await?;
			let merged = ranking::merge_scores(&power, &existing);

			tracing::debug!(
				page = pages,
				entries = entries.len(),
				merged = merged.len(),
				"Merged leaderboard page."
			);

			seen.extend(merged.iter().map(|record| record.user_id().to_string()));
			records.extend(merged);

			match page.next_cursor {
				Some(next) if !next.is_empty() => cursor = Some(next),
				_ => break,
			}
		}

		Ok(Collected { pages, records })
	}

	async fn fetch_existing_scores(&self, power: &[PowerScore]) -> Result<HashMap<String, i64>> {
		let user_ids: Vec<String> = power.iter().map(|entry| entry.user_id.clone()).collect();
		let blobs = objects::read_user_values(
			self.store.as_ref(),
			&self.cfg.resource.collection,
			&self.cfg.resource.key,
			&user_ids,
		)
		.await
		.map_err(|err| {
			tracing::error!(
				error = %err,
				users = user_ids.len(),
				"Failed to read player resources."
			);

			Error::store(err)
		})?;
		let mut scores = HashMap::with_capacity(blobs.len());

		let field_id = self.cfg.resource.score_field_id;

		for (user_id, blob) in blobs {
			let score = match resource::parse_existing_score(&blob, field_id) {
				Ok(score) => score,
				Err(err) => {
					tracing::error!(error = %err, %user_id, "Failed to parse resource blob.");

					return Err(Error::MalformedResourceBlob { user_id, message: err.to_string() });
				},
			};

			scores.insert(user_id, score);
		}

		Ok(scores)
	}

	async fn publish(&self, snapshot: LeaderboardSnapshot) -> Result<()> {
		let snapshot_cfg = &self.cfg.snapshot;
		let write = StorageWrite {
			collection: snapshot_cfg.collection.clone(),
			key: snapshot_cfg.key.clone(),
			user_id: SYSTEM_USER_ID.to_string(),
			value: snapshot.encode()?,
			permission_read: snapshot_cfg.permission_read,
			permission_write: snapshot_cfg.permission_write,
		};

		self.store.write(std::slice::from_ref(&write)).await.map_err(|err| {
			tracing::error!(error = %err, "Failed to store leaderboard snapshot.");

			Error::store(err)
		})?;

		for record in snapshot.final_rankings {
			self.cache.upsert_score(record);
		}

		Ok(())
	}
}
