//! Poke API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Poke, SendPokeRequest, User};
use crate::notify::PokeEvent;
use crate::timefmt::time_ago;
use crate::AppState;

/// A poke addressed to the current user, with the sender joined in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPoke {
    #[serde(flatten)]
    pub poke: Poke,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_user: Option<User>,
    pub received_ago: String,
}

/// POST /api/pokes - Send a poke.
///
/// The sender defaults to the current user when the request omits it. Both
/// endpoints must exist; the reference client silently skips unknown ids,
/// but over HTTP an unknown id is a caller bug and gets a 404.
pub async fn send_poke(
    State(state): State<AppState>,
    Json(request): Json<SendPokeRequest>,
) -> ApiResult<Poke> {
    let mut ledger = state.ledger.write().await;
    let revision_id = ledger.revision_id();

    let from = request.from_user_id.unwrap_or_else(|| ledger.current_user_id());

    let Some(sender) = ledger.get_user(from) else {
        return error(
            AppError::NotFound(format!("User {} not found", from)),
            revision_id,
        );
    };
    let from_display_name = sender.display_name.clone();

    if ledger.get_user(request.to_user_id).is_none() {
        return error(
            AppError::NotFound(format!("User {} not found", request.to_user_id)),
            revision_id,
        );
    }

    let poke = ledger.send_poke(from, request.to_user_id);
    let new_revision = ledger.revision_id();
    drop(ledger);

    state.notifier.publish(PokeEvent {
        from_display_name,
        to_user_id: poke.to_user_id,
    });

    success(poke, new_revision)
}

/// GET /api/pokes/recent - Pokes sent to the current user, newest first.
pub async fn recent_pokes(State(state): State<AppState>) -> ApiResult<Vec<RecentPoke>> {
    let ledger = state.ledger.read().await;
    let now = Utc::now();

    let recent = ledger
        .recent_pokes()
        .into_iter()
        .map(|poke| RecentPoke {
            poke: poke.clone(),
            from_user: ledger.get_user(poke.from_user_id).cloned(),
            received_ago: time_ago(poke.timestamp, now),
        })
        .collect();

    success(recent, ledger.revision_id())
}

/// POST /api/pokes/:id/read - Mark a poke as read.
pub async fn mark_poke_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Poke> {
    let mut ledger = state.ledger.write().await;
    let revision_id = ledger.revision_id();

    let Some(poke) = ledger.get_poke(id).cloned() else {
        return error(
            AppError::NotFound(format!("Poke {} not found", id)),
            revision_id,
        );
    };

    // Already-read pokes stay read; the call is idempotent.
    let changed = ledger.mark_poke_read(id);
    let poke = if changed {
        Poke {
            is_read: true,
            ..poke
        }
    } else {
        poke
    };

    success(poke, ledger.revision_id())
}
