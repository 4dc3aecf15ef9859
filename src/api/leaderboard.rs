//! Leaderboard API endpoints.

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{LeaderboardEntry, LeaderboardMetric, User};
use crate::AppState;

/// Query parameters for the leaderboard.
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// Sort metric: "sent", "received" or "total". Defaults to "sent".
    #[serde(default)]
    pub sort: Option<String>,
}

/// One ranked row, with the user joined in.
///
/// `position` is the 1-based index under the requested sort; the stored
/// `rank` field keeps its creation-time value and the two can diverge.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub position: usize,
}

/// GET /api/leaderboard - Leaderboard sorted by the requested metric.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardQuery>,
) -> ApiResult<Vec<LeaderboardRow>> {
    let ledger = state.ledger.read().await;
    let revision_id = ledger.revision_id();

    let metric = match params.sort.as_deref() {
        None => LeaderboardMetric::default(),
        Some(s) => match LeaderboardMetric::from_str(s) {
            Some(metric) => metric,
            None => {
                return error(
                    AppError::Validation(format!(
                        "Unknown sort metric '{}' (expected sent, received or total)",
                        s
                    )),
                    revision_id,
                )
            }
        },
    };

    tracing::debug!(metric = metric.as_str(), "sorting leaderboard");

    let rows = ledger
        .sorted_leaderboard(metric)
        .into_iter()
        .enumerate()
        .map(|(index, entry)| LeaderboardRow {
            entry: entry.clone(),
            user: ledger.get_user(entry.user_id).cloned(),
            position: index + 1,
        })
        .collect();

    success(rows, revision_id)
}
