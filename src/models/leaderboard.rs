//! Leaderboard model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metric a leaderboard can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardMetric {
    #[default]
    Sent,
    Received,
    Total,
}

impl LeaderboardMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderboardMetric::Sent => "sent",
            LeaderboardMetric::Received => "received",
            LeaderboardMetric::Total => "total",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(LeaderboardMetric::Sent),
            "received" => Some(LeaderboardMetric::Received),
            "total" => Some(LeaderboardMetric::Total),
            _ => None,
        }
    }
}

/// A ranking snapshot for one user.
///
/// `rank` is assigned when the entry is created and is not recomputed when
/// the board is re-sorted under another metric; callers that need the rank
/// under the current sort must use the positional index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Pokes sent.
    pub total_pokes: i64,
    pub received_pokes: i64,
    pub rank: i32,
}

impl LeaderboardEntry {
    pub fn new(user_id: Uuid, total_pokes: i64, received_pokes: i64, rank: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            total_pokes,
            received_pokes,
            rank,
        }
    }

    /// The value this entry sorts by under the given metric.
    pub fn metric_value(&self, metric: LeaderboardMetric) -> i64 {
        match metric {
            LeaderboardMetric::Sent => self.total_pokes,
            LeaderboardMetric::Received => self.received_pokes,
            LeaderboardMetric::Total => self.total_pokes + self.received_pokes,
        }
    }
}
