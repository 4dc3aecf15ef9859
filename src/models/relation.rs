//! Poke relation model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The aggregated pairwise history between the current user and one other
/// user. At most one relation exists per distinct other user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokeRelation {
    pub id: Uuid,
    pub other_user_id: Uuid,
    /// Pokes exchanged in both directions.
    pub count: i64,
    pub last_poke_date: DateTime<Utc>,
    /// Id of the user who sent the most recent poke.
    pub last_poke_by: Uuid,
}

impl PokeRelation {
    pub fn new(
        other_user_id: Uuid,
        count: i64,
        last_poke_date: DateTime<Utc>,
        last_poke_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            other_user_id,
            count,
            last_poke_date,
            last_poke_by,
        }
    }

    /// It is your turn exactly when the other user poked last.
    pub fn is_your_turn(&self) -> bool {
        self.last_poke_by != self.other_user_id
    }
}
