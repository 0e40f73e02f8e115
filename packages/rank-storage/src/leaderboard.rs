use sqlx::PgPool;

use crate::{
	BoxFuture, Error, Result, RankFeed,
	cursor::FeedCursor,
	db::Db,
	models::{LeaderboardPage, LeaderboardRecord, PageRequest},
};

pub const MAX_PAGE_LIMIT: u32 = 10_000;

/// Row of a listing before ranks are assigned.
pub(crate) struct ListedRecord {
	pub owner_id: String,
	pub username: Option<String>,
	pub score: i64,
	pub subscore: i64,
}

pub(crate) fn validate_page_request(req: &PageRequest<'_>) -> Result<()> {
	if req.leaderboard_id.trim().is_empty() {
		return Err(Error::InvalidArgument("leaderboard_id must be non-empty.".to_string()));
	}
	if req.limit == 0 || req.limit > MAX_PAGE_LIMIT {
		return Err(Error::InvalidArgument(format!(
			"limit must be in the range 1-{MAX_PAGE_LIMIT}."
		)));
	}

	Ok(())
}

/// Decodes the request cursor. An absent or blank cursor starts from the top.
pub(crate) fn decode_request_cursor(req: &PageRequest<'_>) -> Result<Option<FeedCursor>> {
	req.cursor
		.filter(|raw| !raw.trim().is_empty())
		.map(|raw| FeedCursor::decode(raw, req.leaderboard_id))
		.transpose()
}

/// Turns up to `limit + 1` ordered rows into a page. The extra row only signals that another page
/// exists.
pub(crate) fn paginate(
	leaderboard_id: &str,
	mut rows: Vec<ListedRecord>,
	limit: u32,
	cursor: Option<&FeedCursor>,
) -> Result<LeaderboardPage> {
	let limit = limit as usize;
	let has_more = rows.len() > limit;

	rows.truncate(limit);

	let offset = cursor.map(|cursor| cursor.rank).unwrap_or(0);
	let records: Vec<LeaderboardRecord> = rows
		.into_iter()
		.enumerate()
		.map(|(index, row)| LeaderboardRecord {
			leaderboard_id: leaderboard_id.to_string(),
			owner_id: row.owner_id,
			username: row.username,
			score: row.score,
			subscore: row.subscore,
			rank: offset + index as i64 + 1,
		})
		.collect();
	let next_cursor = match records.last() {
		Some(last) if has_more => Some(
			FeedCursor {
				leaderboard_id: leaderboard_id.to_string(),
				score: last.score,
				subscore: last.subscore,
				owner_id: last.owner_id.clone(),
				rank: last.rank,
			}
			.encode()?,
		),
		_ => None,
	};

	Ok(LeaderboardPage { records, next_cursor })
}

impl RankFeed for Db {
	fn list_page<'a>(&'a self, req: PageRequest<'a>) -> BoxFuture<'a, Result<LeaderboardPage>> {
		Box::pin(list_records(&self.pool, req))
	}
}

impl Db {
	/// Inserts or replaces one owner's record on a leaderboard.
	pub async fn write_record(
		&self,
		leaderboard_id: &str,
		owner_id: &str,
		username: Option<&str>,
		score: i64,
		subscore: i64,
		expiry: i64,
	) -> Result<()> {
		if leaderboard_id.trim().is_empty() || owner_id.trim().is_empty() {
			return Err(Error::InvalidArgument(
				"leaderboard_id and owner_id must be non-empty.".to_string(),
			));
		}

		sqlx::query(
			"\
INSERT INTO leaderboard_record (leaderboard_id, owner_id, username, score, subscore, expiry_time)
VALUES ($1, $2, $3, $4, $5, $6)
ON CONFLICT (leaderboard_id, expiry_time, owner_id) DO UPDATE
SET
	username = EXCLUDED.username,
	score = EXCLUDED.score,
	subscore = EXCLUDED.subscore,
	update_time = now()",
		)
		.bind(leaderboard_id)
		.bind(owner_id)
		.bind(username)
		.bind(score)
		.bind(subscore)
		.bind(expiry)
		.execute(&self.pool)
		.await?;

		Ok(())
	}
}

async fn list_records(pool: &PgPool, req: PageRequest<'_>) -> Result<LeaderboardPage> {
	validate_page_request(&req)?;

	let cursor = decode_request_cursor(&req)?;
	let rows: Vec<(String, Option<String>, i64, i64)> = sqlx::query_as(
		"\
SELECT owner_id, username, score, subscore
FROM leaderboard_record
WHERE leaderboard_id = $1
	AND expiry_time = $2
	AND ($3::text[] IS NULL OR owner_id = ANY($3::text[]))
	AND (
		$4::bigint IS NULL
		OR score < $4::bigint
		OR (score = $4::bigint AND subscore < $5::bigint)
		OR (score = $4::bigint AND subscore = $5::bigint AND owner_id > $6::text)
	)
ORDER BY score DESC, subscore DESC, owner_id ASC
LIMIT $7",
	)
	.bind(req.leaderboard_id)
	.bind(req.expiry)
	.bind(req.owner_ids.map(|ids| ids.to_vec()))
	.bind(cursor.as_ref().map(|cursor| cursor.score))
	.bind(cursor.as_ref().map(|cursor| cursor.subscore))
	.bind(cursor.as_ref().map(|cursor| cursor.owner_id.clone()))
	.bind(i64::from(req.limit) + 1)
	.fetch_all(pool)
	.await?;
	let rows = rows
		.into_iter()
		.map(|(owner_id, username, score, subscore)| ListedRecord {
			owner_id,
			username,
			score,
			subscore,
		})
		.collect();

	paginate(req.leaderboard_id, rows, req.limit, cursor.as_ref())
}
