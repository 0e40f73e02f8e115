pub mod cursor;
pub mod db;
pub mod leaderboard;
pub mod memory;
pub mod models;
pub mod objects;
pub mod schema;

mod error;

pub use error::Error;

use std::{future::Future, pin::Pin};

use crate::models::{LeaderboardPage, PageRequest, StorageObject, StorageRead, StorageWrite};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Durable key/value storage addressed by `(collection, key, user_id)`.
pub trait ScoreStore
where
	Self: Send + Sync,
{
	/// Returns the objects that exist among `reads`. Missing objects are simply absent.
	fn read<'a>(&'a self, reads: &'a [StorageRead]) -> BoxFuture<'a, Result<Vec<StorageObject>>>;

	/// Applies every write or none of them.
	fn write<'a>(&'a self, writes: &'a [StorageWrite]) -> BoxFuture<'a, Result<()>>;
}

/// Externally maintained, strictly ordered leaderboard read page by page.
pub trait RankFeed
where
	Self: Send + Sync,
{
	/// Lists one page. `next_cursor` is `None` once the listing is exhausted.
	fn list_page<'a>(&'a self, req: PageRequest<'a>) -> BoxFuture<'a, Result<LeaderboardPage>>;
}
