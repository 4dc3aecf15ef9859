//! Data models for the Poky backend.
//!
//! These models match the mobile client's Codable types exactly for seamless
//! interoperability.

mod leaderboard;
mod poke;
mod relation;
mod snapshot;
mod user;

pub use leaderboard::*;
pub use poke::*;
pub use relation::*;
pub use snapshot::*;
pub use user::*;
