use std::collections::HashMap;

use rank_domain::{
	CachedUserRecord, LeaderboardSnapshot, RankedEntry, ScoreRecord,
	ranking::{self, PowerScore},
	resource,
};

fn page(owners: &[&str]) -> Vec<RankedEntry> {
	owners
		.iter()
		.enumerate()
		.map(|(index, owner)| RankedEntry { owner_id: owner.to_string(), rank: index as i64 + 1 })
		.collect()
}

#[test]
fn power_scores_are_a_decreasing_permutation() {
	let owners: Vec<String> = (0..250).map(|i| format!("user-{i:03}")).collect();
	let refs: Vec<&str> = owners.iter().map(String::as_str).collect();
	let scores = ranking::power_scores(&page(&refs));
	let n = refs.len() as i64;
	let mut values: Vec<i64> = scores.iter().map(|entry| entry.score).collect();

	assert!(values.windows(2).all(|pair| pair[0] > pair[1]));

	values.sort_unstable();

	assert_eq!(values, (1..=n).collect::<Vec<_>>());
}

#[test]
fn merged_totals_equal_power_plus_existing() {
	let power = vec![
		PowerScore { user_id: "a".to_string(), score: 5 },
		PowerScore { user_id: "b".to_string(), score: 4 },
		PowerScore { user_id: "c".to_string(), score: 3 },
	];
	let existing = HashMap::from([("a".to_string(), 11), ("c".to_string(), -2)]);
	let records = ranking::merge_scores(&power, &existing);

	assert_eq!(records.len(), 3);

	for record in &records {
		assert_eq!(record.total_score(), record.power_score() + record.existing_score());
	}

	assert_eq!(records[1], ScoreRecord::new("b", 4, 0));
}

#[test]
fn worked_example_orders_a_c_b() {
	let power = ranking::power_scores(&page(&["A", "B", "C"]));
	let existing = HashMap::from([("A".to_string(), 10), ("C".to_string(), 5)]);
	let mut records = ranking::merge_scores(&power, &existing);

	ranking::sort_leaderboard(&mut records);

	assert_eq!(
		records,
		vec![ScoreRecord::new("A", 3, 10), ScoreRecord::new("C", 1, 5), ScoreRecord::new("B", 2, 0)]
	);
	assert_eq!(
		records.iter().map(ScoreRecord::total_score).collect::<Vec<_>>(),
		vec![13, 6, 2]
	);
}

#[test]
fn sorting_is_reproducible_regardless_of_input_order() {
	let base = vec![
		ScoreRecord::new("d", 1, 5),
		ScoreRecord::new("a", 2, 4),
		ScoreRecord::new("c", 6, 0),
		ScoreRecord::new("b", 3, 3),
		ScoreRecord::new("e", 9, 1),
	];
	let mut forward = base.clone();
	let mut backward: Vec<ScoreRecord> = base.into_iter().rev().collect();

	ranking::sort_leaderboard(&mut forward);
	ranking::sort_leaderboard(&mut backward);

	assert_eq!(forward, backward);
	assert!(forward.windows(2).all(|pair| pair[0].total_score() >= pair[1].total_score()));
	assert_eq!(
		forward.iter().map(ScoreRecord::user_id).collect::<Vec<_>>(),
		vec!["e", "a", "b", "c", "d"]
	);
}

#[test]
fn snapshot_uses_camel_case_wire_names() {
	let snapshot = LeaderboardSnapshot { final_rankings: vec![ScoreRecord::new("u1", 3, 10)] };
	let encoded = snapshot.encode().expect("Snapshot must encode.");

	assert_eq!(
		encoded,
		r#"{"finalRankings":[{"userId":"u1","powerScore":3,"existingScore":10,"totalScore":13}]}"#
	);
	assert_eq!(LeaderboardSnapshot::decode(&encoded).expect("Snapshot must decode."), snapshot);
}

#[test]
fn snapshot_decode_rejects_inconsistent_totals() {
	let raw =
		r#"{"finalRankings":[{"userId":"u1","powerScore":3,"existingScore":10,"totalScore":14}]}"#;
	let err = LeaderboardSnapshot::decode(raw).expect_err("Expected total mismatch.");

	assert!(err.to_string().contains("does not equal"), "Unexpected error: {err}");
}

#[test]
fn cached_record_mirrors_score_owner() {
	let record = CachedUserRecord::new(ScoreRecord::new("u9", 1, 2));

	assert_eq!(record.user_id, "u9");
	assert_eq!(
		serde_json::to_value(&record).expect("Record must encode."),
		serde_json::json!({
			"userId": "u9",
			"userScore": { "userId": "u9", "powerScore": 1, "existingScore": 2, "totalScore": 3 },
		})
	);
}

#[test]
fn empty_score_is_all_zero() {
	let record = ScoreRecord::empty("ghost");

	assert_eq!(record.user_id(), "ghost");
	assert_eq!(
		(record.power_score(), record.existing_score(), record.total_score()),
		(0, 0, 0)
	);
}

#[test]
fn resource_parse_defaults_missing_field_to_zero() {
	assert_eq!(resource::parse_existing_score(r#"{"3": 8}"#, 1).expect("Blob must parse."), 0);
	assert_eq!(resource::parse_existing_score(r#"{"1": 8}"#, 1).expect("Blob must parse."), 8);
}
