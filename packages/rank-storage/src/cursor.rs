use std::cmp::Ordering;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Keyset position of the last record served, plus how many records precede the next page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCursor {
	pub leaderboard_id: String,
	pub score: i64,
	pub subscore: i64,
	pub owner_id: String,
	pub rank: i64,
}
impl FeedCursor {
	pub fn encode(&self) -> Result<String> {
		let raw = serde_json::to_vec(self)
			.map_err(|err| Error::InvalidCursor(format!("Failed to encode cursor: {err}.")))?;

		Ok(URL_SAFE_NO_PAD.encode(raw))
	}

	/// Decodes a cursor issued for `leaderboard_id`. Cursors from other listings are rejected.
	pub fn decode(raw: &str, leaderboard_id: &str) -> Result<Self> {
		let bytes = URL_SAFE_NO_PAD
			.decode(raw.trim())
			.map_err(|err| Error::InvalidCursor(format!("Cursor is not valid base64: {err}.")))?;
		let cursor: Self = serde_json::from_slice(&bytes)
			.map_err(|err| Error::InvalidCursor(format!("Cursor payload is malformed: {err}.")))?;

		if cursor.leaderboard_id != leaderboard_id {
			return Err(Error::InvalidCursor(format!(
				"Cursor was issued for leaderboard {:?}, not {leaderboard_id:?}.",
				cursor.leaderboard_id
			)));
		}
		if cursor.rank < 0 {
			return Err(Error::InvalidCursor("Cursor rank must not be negative.".to_string()));
		}

		Ok(cursor)
	}

	/// Whether a record sorts strictly after the cursor position.
	pub fn precedes(&self, score: i64, subscore: i64, owner_id: &str) -> bool {
		feed_order((self.score, self.subscore, self.owner_id.as_str()), (score, subscore, owner_id))
			== Ordering::Less
	}
}

/// Feed order: score descending, then subscore descending, then owner id ascending.
pub fn feed_order(a: (i64, i64, &str), b: (i64, i64, &str)) -> Ordering {
	b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)).then_with(|| a.2.cmp(b.2))
}
