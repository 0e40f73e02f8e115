use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
	BoxFuture, Error, Result, ScoreStore,
	db::Db,
	models::{StorageObject, StorageRead, StorageWrite},
};

/// Reads a single object, `None` when it does not exist.
pub async fn read_value<S>(store: &S, read: StorageRead) -> Result<Option<StorageObject>>
where
	S: ScoreStore + ?Sized,
{
	let objects = store.read(std::slice::from_ref(&read)).await?;

	Ok(objects.into_iter().find(|object| {
		object.collection == read.collection
			&& object.key == read.key
			&& object.user_id == read.user_id
	}))
}

/// Batch read of one `(collection, key)` object per user, keyed by user id. Users without a
/// stored object are absent from the map.
pub async fn read_user_values<S>(
	store: &S,
	collection: &str,
	key: &str,
	user_ids: &[String],
) -> Result<HashMap<String, String>>
where
	S: ScoreStore + ?Sized,
{
	if user_ids.is_empty() {
		return Ok(HashMap::new());
	}

	let reads: Vec<StorageRead> = user_ids
		.iter()
		.map(|user_id| StorageRead::new(collection, key, user_id.as_str()))
		.collect();
	let objects = store.read(&reads).await?;

	Ok(objects
		.into_iter()
		.filter(|object| object.collection == collection && object.key == key)
		.map(|object| (object.user_id, object.value))
		.collect())
}

pub(crate) fn validate_writes(writes: &[StorageWrite]) -> Result<()> {
	for write in writes {
		if write.collection.is_empty() || write.key.is_empty() {
			return Err(Error::InvalidArgument(
				"Storage writes require a collection and a key.".to_string(),
			));
		}
	}

	Ok(())
}

impl ScoreStore for Db {
	fn read<'a>(&'a self, reads: &'a [StorageRead]) -> BoxFuture<'a, Result<Vec<StorageObject>>> {
		Box::pin(read_objects(&self.pool, reads))
	}

	fn write<'a>(&'a self, writes: &'a [StorageWrite]) -> BoxFuture<'a, Result<()>> {
		Box::pin(write_objects(&self.pool, writes))
	}
}

async fn read_objects(pool: &PgPool, reads: &[StorageRead]) -> Result<Vec<StorageObject>> {
	if reads.is_empty() {
		return Ok(Vec::new());
	}

	let mut collections = Vec::with_capacity(reads.len());
	let mut keys = Vec::with_capacity(reads.len());
	let mut user_ids = Vec::with_capacity(reads.len());

	for read in reads {
		collections.push(read.collection.clone());
		keys.push(read.key.clone());
		user_ids.push(read.user_id.clone());
	}

	let objects = sqlx::query_as::<_, StorageObject>(
		"\
SELECT collection, key, user_id, value, permission_read, permission_write, create_time, update_time
FROM storage
WHERE (collection, key, user_id) IN (
	SELECT * FROM UNNEST($1::text[], $2::text[], $3::text[])
)",
	)
	.bind(collections)
	.bind(keys)
	.bind(user_ids)
	.fetch_all(pool)
	.await?;

	Ok(objects)
}

async fn write_objects(pool: &PgPool, writes: &[StorageWrite]) -> Result<()> {
	validate_writes(writes)?;

	if writes.is_empty() {
		return Ok(());
	}

	let mut tx = pool.begin().await?;

	for write in writes {
		sqlx::query(
			"\
INSERT INTO storage (collection, key, user_id, value, permission_read, permission_write)
VALUES ($1, $2, $3, $4, $5, $6)
ON CONFLICT (collection, key, user_id) DO UPDATE
SET
	value = EXCLUDED.value,
	permission_read = EXCLUDED.permission_read,
	permission_write = EXCLUDED.permission_write,
	update_time = now()",
		)
		.bind(write.collection.as_str())
		.bind(write.key.as_str())
		.bind(write.user_id.as_str())
		.bind(write.value.as_str())
		.bind(write.permission_read)
		.bind(write.permission_write)
		.execute(&mut *tx)
		.await?;
	}

	tx.commit().await?;

	Ok(())
}
