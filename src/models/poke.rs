//! Poke event model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single directed poke from one user to another. Immutable once created,
/// except for the read flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poke {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

impl Poke {
    pub fn new(from_user_id: Uuid, to_user_id: Uuid, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_user_id,
            to_user_id,
            timestamp,
            is_read: false,
        }
    }

    /// Whether this poke's endpoints equal the unordered pair `{a, b}`.
    pub fn involves_pair(&self, a: Uuid, b: Uuid) -> bool {
        (self.from_user_id == a && self.to_user_id == b)
            || (self.from_user_id == b && self.to_user_id == a)
    }
}

/// Request body for sending a poke. The sender defaults to the current user
/// when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPokeRequest {
    #[serde(default)]
    pub from_user_id: Option<Uuid>,
    pub to_user_id: Uuid,
}
