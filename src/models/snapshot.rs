//! Full-store snapshot for client sync.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{LeaderboardEntry, Poke, PokeRelation, User};

/// Everything the client needs to render, in one payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub revision_id: i64,
    pub generated_at: DateTime<Utc>,
    pub current_user_id: Uuid,
    pub users: Vec<User>,
    pub pokes: Vec<Poke>,
    pub relations: Vec<PokeRelation>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Revision information for change detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: i64,
    pub generated_at: DateTime<Utc>,
}
