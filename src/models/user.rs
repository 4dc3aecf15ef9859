//! User model matching the client User type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default profile image reference used by the mobile client.
pub const DEFAULT_PROFILE_IMAGE: &str = "person.circle.fill";

/// A Poky user. `poke_count` is cumulative and bumped whenever the user is
/// the sender or the receiver of a poke.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub profile_image: String,
    pub poke_count: i64,
    pub last_seen: DateTime<Utc>,
    pub is_online: bool,
}

impl User {
    pub fn new(username: &str, display_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            display_name: display_name.to_string(),
            profile_image: DEFAULT_PROFILE_IMAGE.to_string(),
            poke_count: 0,
            last_seen: Utc::now(),
            is_online: true,
        }
    }

    /// Case-insensitive substring match on display name or username.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.display_name.to_lowercase().contains(&query)
            || self.username.to_lowercase().contains(&query)
    }
}
