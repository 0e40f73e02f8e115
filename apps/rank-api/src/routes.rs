use axum::{
	Json, Router,
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{delete, get, post},
};
use serde::Serialize;

use rank_service::{Error, PassReport, UserScoreRequest, UserScoreResponse};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/rank/user_score", post(user_score))
		.route("/v1/rank/leaderboard", get(leaderboard))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/refresh", post(refresh))
		.route("/v1/admin/cache/{user_id}", delete(evict))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn user_score(
	State(state): State<AppState>,
	Json(payload): Json<UserScoreRequest>,
) -> Result<Json<UserScoreResponse>, ApiError> {
	let response = state.service.get_user_score(payload).await?;

	Ok(Json(response))
}

async fn leaderboard(State(state): State<AppState>) -> Result<Response, ApiError> {
	match state.service.leaderboard().await? {
		Some(snapshot) => Ok(Json(snapshot).into_response()),
		None => Err(ApiError::new(
			StatusCode::NOT_FOUND,
			"not_found",
			"No leaderboard has been published yet.",
		)),
	}
}

async fn refresh(State(state): State<AppState>) -> Result<Json<PassReport>, ApiError> {
	let _guard = state.pass_lock.lock().await;
	let report = state.service.precompute_leaderboard().await?;

	Ok(Json(report))
}

async fn evict(State(state): State<AppState>, Path(user_id): Path<String>) -> StatusCode {
	if state.service.evict(&user_id) {
		tracing::info!(%user_id, "Evicted cached user score.");
	}

	StatusCode::NO_CONTENT
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		let (status, code) = match &err {
			Error::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
			Error::FeedUnavailable { .. } | Error::StoreUnavailable { .. } =>
				(StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
			Error::MalformedResourceBlob { .. } | Error::MalformedSnapshot { .. } =>
				(StatusCode::INTERNAL_SERVER_ERROR, "malformed_data"),
			Error::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
		};

		if status.is_server_error() {
			tracing::error!(error = %err, "Request failed.");
		}

		Self::new(status, code, err.to_string())
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
