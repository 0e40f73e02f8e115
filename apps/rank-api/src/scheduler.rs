use tokio::time::{self, MissedTickBehavior};

use crate::state::AppState;

/// Runs an aggregation pass every refresh interval for the life of the process.
pub async fn run_scheduler(state: AppState) {
	let mut ticker = time::interval(state.refresh_interval);

	ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

	// The first tick completes immediately.
	if !state.run_on_start {
		ticker.tick().await;
	}

	loop {
		ticker.tick().await;

		run_pass(&state).await;
	}
}

pub async fn run_pass(state: &AppState) {
	let _guard = state.pass_lock.lock().await;

	if let Err(err) = state.service.precompute_leaderboard().await {
		tracing::error!(error = %err, "Scheduled leaderboard pass failed.");
	}
}
