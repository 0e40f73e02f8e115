use std::{
	cmp::Ordering,
	collections::{HashMap, HashSet},
};

use crate::{RankedEntry, ScoreRecord};

/// Power score of one feed entry, scoped to the page it was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerScore {
	pub user_id: String,
	pub score: i64,
}

/// Assigns `N - index` to each entry of a page of `N` entries ordered best to worst.
///
/// Scores are page-local: the best entry of every page scores `N`, whatever its global rank. An
/// owner listed more than once keeps only its first, best-placed score.
pub fn power_scores(page: &[RankedEntry]) -> Vec<PowerScore> {
	let n = page.len() as i64;
	let mut seen = HashSet::with_capacity(page.len());
	let mut scores = Vec::with_capacity(page.len());

	for (index, entry) in page.iter().enumerate() {
		if !seen.insert(entry.owner_id.as_str()) {
			continue;
		}

		scores.push(PowerScore { user_id: entry.owner_id.clone(), score: n - index as i64 });
	}

	scores
}

/// Combines one page of power scores with the existing scores looked up for it. Users without an
/// existing score get 0.
pub fn merge_scores(power: &[PowerScore], existing: &HashMap<String, i64>) -> Vec<ScoreRecord> {
	power
		.iter()
		.map(|entry| {
			let existing_score = existing.get(&entry.user_id).copied().unwrap_or(0);

			ScoreRecord::new(entry.user_id.clone(), entry.score, existing_score)
		})
		.collect()
}

/// Orders records by total score, highest first, then by user id so ties are reproducible.
pub fn sort_leaderboard(records: &mut [ScoreRecord]) {
	records.sort_by(compare_standing);
}

pub fn compare_standing(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
	b.total_score().cmp(&a.total_score()).then_with(|| a.user_id().cmp(b.user_id()))
}
