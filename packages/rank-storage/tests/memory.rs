use rank_storage::{
	Error, RankFeed, ScoreStore,
	memory::{MemoryRankFeed, MemoryScoreStore},
	models::{PageRequest, StorageRead, StorageWrite},
	objects,
};

const BOARD: &str = "global_attack_rank";

fn page_request<'a>(limit: u32, cursor: Option<&'a str>) -> PageRequest<'a> {
	PageRequest { leaderboard_id: BOARD, owner_ids: None, limit, cursor, expiry: 0 }
}

fn write(collection: &str, key: &str, user_id: &str, value: &str) -> StorageWrite {
	StorageWrite {
		collection: collection.to_string(),
		key: key.to_string(),
		user_id: user_id.to_string(),
		value: value.to_string(),
		permission_read: 1,
		permission_write: 1,
	}
}

fn seeded_feed(count: usize) -> MemoryRankFeed {
	let feed = MemoryRankFeed::new();

	for i in 0..count {
		feed.submit(BOARD, &format!("user-{i:02}"), (count - i) as i64 * 10, 0);
	}

	feed
}

#[tokio::test]
async fn feed_lists_in_score_order_across_pages() {
	let feed = seeded_feed(5);
	let first = feed.list_page(page_request(2, None)).await.expect("First page must list.");

	assert_eq!(
		first.records.iter().map(|record| record.owner_id.as_str()).collect::<Vec<_>>(),
		vec!["user-00", "user-01"]
	);
	assert_eq!(first.records.iter().map(|record| record.rank).collect::<Vec<_>>(), vec![1, 2]);

	let cursor = first.next_cursor.expect("More records remain.");
	let second =
		feed.list_page(page_request(2, Some(&cursor))).await.expect("Second page must list.");

	assert_eq!(second.records.iter().map(|record| record.rank).collect::<Vec<_>>(), vec![3, 4]);

	let cursor = second.next_cursor.expect("More records remain.");
	let third =
		feed.list_page(page_request(2, Some(&cursor))).await.expect("Third page must list.");

	assert_eq!(third.records.len(), 1);
	assert_eq!(third.records[0].owner_id, "user-04");
	assert_eq!(third.records[0].rank, 5);
	assert!(third.next_cursor.is_none());
}

#[tokio::test]
async fn exact_multiple_of_limit_has_no_trailing_cursor() {
	let feed = seeded_feed(4);
	let first = feed.list_page(page_request(2, None)).await.expect("First page must list.");
	let cursor = first.next_cursor.expect("More records remain.");
	let second =
		feed.list_page(page_request(2, Some(&cursor))).await.expect("Second page must list.");

	assert_eq!(second.records.len(), 2);
	assert!(second.next_cursor.is_none());
}

#[tokio::test]
async fn ties_order_by_subscore_then_owner() {
	let feed = MemoryRankFeed::new();

	feed.submit(BOARD, "carol", 10, 0);
	feed.submit(BOARD, "alice", 10, 0);
	feed.submit(BOARD, "bob", 10, 5);

	let page = feed.list_page(page_request(10, None)).await.expect("Page must list.");

	assert_eq!(
		page.records.iter().map(|record| record.owner_id.as_str()).collect::<Vec<_>>(),
		vec!["bob", "alice", "carol"]
	);
}

#[tokio::test]
async fn resubmitting_replaces_the_owner_record() {
	let feed = MemoryRankFeed::new();

	feed.submit(BOARD, "alice", 10, 0);
	feed.submit(BOARD, "bob", 20, 0);
	feed.submit(BOARD, "alice", 30, 0);

	let page = feed.list_page(page_request(10, None)).await.expect("Page must list.");

	assert_eq!(page.records.len(), 2);
	assert_eq!(page.records[0].owner_id, "alice");
	assert_eq!(page.records[0].score, 30);
}

#[tokio::test]
async fn empty_feed_lists_nothing() {
	let feed = MemoryRankFeed::new();
	let page = feed.list_page(page_request(10, None)).await.expect("Page must list.");

	assert!(page.records.is_empty());
	assert!(page.next_cursor.is_none());
}

#[tokio::test]
async fn owner_filter_restricts_listing() {
	let feed = seeded_feed(5);
	let owners = vec!["user-03".to_string(), "user-01".to_string()];
	let page = feed
		.list_page(PageRequest { owner_ids: Some(owners.as_slice()), ..page_request(10, None) })
		.await
		.expect("Page must list.");

	assert_eq!(
		page.records.iter().map(|record| record.owner_id.as_str()).collect::<Vec<_>>(),
		vec!["user-01", "user-03"]
	);
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
	let feed = seeded_feed(2);

	assert!(matches!(
		feed.list_page(page_request(0, None)).await,
		Err(Error::InvalidArgument(_))
	));
	assert!(matches!(
		feed.list_page(page_request(10, Some("not-a-cursor"))).await,
		Err(Error::InvalidCursor(_))
	));
}

#[tokio::test]
async fn blank_cursor_starts_from_the_top() {
	let feed = seeded_feed(3);
	let page = feed.list_page(page_request(10, Some(""))).await.expect("Page must list.");

	assert_eq!(page.records.len(), 3);
	assert_eq!(page.records[0].rank, 1);
}

#[tokio::test]
async fn store_reads_only_existing_objects() {
	let store = MemoryScoreStore::new();

	store
		.write(&[
			write("player_data", "user_resource", "alice", r#"{"1":10}"#),
			write("player_data", "user_resource", "bob", r#"{"1":3}"#),
			write("player_data", "profile", "carol", "{}"),
		])
		.await
		.expect("Writes must apply.");

	let values = objects::read_user_values(
		&store,
		"player_data",
		"user_resource",
		&["alice".to_string(), "carol".to_string(), "dave".to_string()],
	)
	.await
	.expect("Batch read must succeed.");

	assert_eq!(values.len(), 1);
	assert_eq!(values.get("alice").map(String::as_str), Some(r#"{"1":10}"#));
}

#[tokio::test]
async fn store_write_replaces_value_and_keeps_create_time() {
	let store = MemoryScoreStore::new();

	store.write(&[write("leaderboards", "final_rankings", "", "v1")]).await.expect("Write v1.");

	let first = objects::read_value(&store, StorageRead::system("leaderboards", "final_rankings"))
		.await
		.expect("Read must succeed.")
		.expect("Object must exist.");

	store.write(&[write("leaderboards", "final_rankings", "", "v2")]).await.expect("Write v2.");

	let second = objects::read_value(&store, StorageRead::system("leaderboards", "final_rankings"))
		.await
		.expect("Read must succeed.")
		.expect("Object must exist.");

	assert_eq!(second.value, "v2");
	assert_eq!(second.create_time, first.create_time);
	assert!(second.update_time >= first.update_time);
	assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn invalid_write_batch_applies_nothing() {
	let store = MemoryScoreStore::new();
	let result = store
		.write(&[write("player_data", "user_resource", "alice", "{}"), write("", "k", "bob", "{}")])
		.await;

	assert!(matches!(result, Err(Error::InvalidArgument(_))));
	assert!(store.is_empty());
}

#[tokio::test]
async fn missing_object_reads_as_none() {
	let store = MemoryScoreStore::new();
	let object = objects::read_value(&store, StorageRead::system("leaderboards", "final_rankings"))
		.await
		.expect("Read must succeed.");

	assert!(object.is_none());
}

#[tokio::test]
async fn expiring_records_live_in_their_own_bucket() {
	let feed = MemoryRankFeed::new();

	feed.submit(BOARD, "steady", 10, 0);
	feed.submit_with_expiry(BOARD, "weekly", Some("Weekly Winner"), 99, 0, 1_700_000_000);

	let page = feed.list_page(page_request(10, None)).await.unwrap();

	assert_eq!(page.records.len(), 1);
	assert_eq!(page.records[0].owner_id, "steady");

	let bucket = PageRequest { expiry: 1_700_000_000, ..page_request(10, None) };
	let page = feed.list_page(bucket).await.unwrap();

	assert_eq!(page.records[0].owner_id, "weekly");
	assert_eq!(page.records[0].username.as_deref(), Some("Weekly Winner"));
}

#[tokio::test]
async fn removed_owner_leaves_the_listing() {
	let feed = seeded_feed(3);

	feed.remove(BOARD, "user-01");

	let page = feed.list_page(page_request(10, None)).await.unwrap();

	assert_eq!(
		page.records.iter().map(|record| record.owner_id.as_str()).collect::<Vec<_>>(),
		vec!["user-00", "user-02"]
	);
	assert_eq!(page.records[1].rank, 2);
}
