//! User API endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::User;
use crate::AppState;

/// Query parameters for user listing.
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    /// Substring to match against display name or username.
    #[serde(default)]
    pub q: String,
}

/// GET /api/users - List users, optionally filtered by `q`.
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UserListQuery>,
) -> ApiResult<Vec<User>> {
    let ledger = state.ledger.read().await;
    let users = ledger
        .filter_users(&params.q)
        .into_iter()
        .cloned()
        .collect();
    success(users, ledger.revision_id())
}

/// GET /api/users/:id - Get a single user.
pub async fn get_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<User> {
    let ledger = state.ledger.read().await;
    let revision_id = ledger.revision_id();

    match ledger.get_user(id) {
        Some(user) => success(user.clone(), revision_id),
        None => error(
            AppError::NotFound(format!("User {} not found", id)),
            revision_id,
        ),
    }
}
