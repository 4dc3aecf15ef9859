//! Device registration endpoint.
//!
//! The mobile client calls this fire-and-forget right after obtaining its
//! push token, so the route lives outside the authenticated `/api` tree and
//! the client never looks at the response body.

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use super::{error, success, ApiResult};
use crate::AppState;

/// Query parameters for device registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterQuery {
    pub device_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// False when the token was already known.
    pub registered: bool,
    pub devices: usize,
}

/// GET /register?deviceToken=<hex> - Register a push device token.
pub async fn register_device(
    State(state): State<AppState>,
    Query(params): Query<RegisterQuery>,
) -> ApiResult<RegisterResponse> {
    let revision_id = state.ledger.read().await.revision_id();

    match state.notifier.register_device(&params.device_token).await {
        Ok(registered) => {
            let devices = state.notifier.device_count().await;
            if registered {
                tracing::info!(devices, "registered push device");
            }
            success(
                RegisterResponse {
                    registered,
                    devices,
                },
                revision_id,
            )
        }
        Err(e) => error(e, revision_id),
    }
}
