//! Snapshot API endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::{RevisionInfo, Snapshot};
use crate::AppState;

/// GET /api/snapshot - Get the full store snapshot.
pub async fn get_snapshot(State(state): State<AppState>) -> ApiResult<Snapshot> {
    let ledger = state.ledger.read().await;
    let snapshot = ledger.snapshot();
    success(snapshot, ledger.revision_id())
}

/// GET /api/snapshot/revision - Get the current revision info.
pub async fn get_revision(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    let ledger = state.ledger.read().await;
    let info = ledger.revision_info();
    success(info, ledger.revision_id())
}
