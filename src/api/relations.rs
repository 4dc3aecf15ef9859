//! Poke relation API endpoints.

use axum::extract::{Path, Query, State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{success, ApiResult};
use crate::models::{PokeRelation, User};
use crate::timefmt::time_ago;
use crate::AppState;

/// Query parameters for relation listing.
#[derive(Debug, Deserialize)]
pub struct RelationListQuery {
    /// Substring to match against the other user's display name or username.
    #[serde(default)]
    pub q: String,
}

/// A relation with the other user joined in and the turn state resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationView {
    #[serde(flatten)]
    pub relation: PokeRelation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_user: Option<User>,
    pub is_your_turn: bool,
    pub last_poke_ago: String,
}

/// GET /api/relations - List relations, optionally filtered by `q`.
pub async fn list_relations(
    State(state): State<AppState>,
    Query(params): Query<RelationListQuery>,
) -> ApiResult<Vec<RelationView>> {
    let ledger = state.ledger.read().await;
    let now = Utc::now();

    let relations = ledger
        .filter_relations(&params.q)
        .into_iter()
        .map(|relation| RelationView {
            relation: relation.clone(),
            other_user: ledger.get_user(relation.other_user_id).cloned(),
            is_your_turn: relation.is_your_turn(),
            last_poke_ago: time_ago(relation.last_poke_date, now),
        })
        .collect();

    success(relations, ledger.revision_id())
}

/// DELETE /api/relations/:id - Delete a relation and its poke history.
///
/// Removes the relation and every poke exchanged with that user in either
/// direction. Deleting an already-absent relation is a no-op, not an error.
pub async fn delete_relation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    let mut ledger = state.ledger.write().await;
    let removed = ledger.delete_poke_relation(id);
    if !removed {
        tracing::debug!(relation_id = %id, "delete of absent relation ignored");
    }
    success((), ledger.revision_id())
}

/// POST /api/relations/:id/anonymize - Remove a relation from view.
///
/// Unlike delete, the underlying poke history survives.
pub async fn anonymize_relation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    let mut ledger = state.ledger.write().await;
    let removed = ledger.anonymize_poke_relation(id);
    if !removed {
        tracing::debug!(relation_id = %id, "anonymize of absent relation ignored");
    }
    success((), ledger.revision_id())
}
