pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Rank feed unavailable: {message}")]
	FeedUnavailable { message: String },
	#[error("Score store unavailable: {message}")]
	StoreUnavailable { message: String },
	#[error("Malformed resource blob for user {user_id}: {message}")]
	MalformedResourceBlob { user_id: String, message: String },
	#[error("Malformed leaderboard snapshot: {message}")]
	MalformedSnapshot { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error(transparent)]
	Serialization(#[from] serde_json::Error),
}
impl Error {
	pub(crate) fn feed(err: rank_storage::Error) -> Self {
		Self::FeedUnavailable { message: err.to_string() }
	}

	pub(crate) fn store(err: rank_storage::Error) -> Self {
		Self::StoreUnavailable { message: err.to_string() }
	}
}
