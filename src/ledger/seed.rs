//! Demo dataset loaded at startup.
//!
//! Mirrors the dataset the mobile client ships with, so a freshly started
//! backend renders the same screens: eight friends, a handful of historical
//! pokes, six relations with mixed turn states and a pre-ranked leaderboard.

use chrono::{Duration, Utc};

use super::PokeLedger;
use crate::models::{LeaderboardEntry, Poke, PokeRelation, User};

/// Build a ledger populated with the demo dataset.
pub fn demo_ledger() -> PokeLedger {
    let now = Utc::now();

    let current = User::new("robin", "Robin Augereau");
    let me = current.id;
    let mut ledger = PokeLedger::new(current);

    let friends = [
        ("alice", "Alice Johnson"),
        ("bob", "Bob Smith"),
        ("charlie", "Charlie Brown"),
        ("diana", "Diana Prince"),
        ("eve", "Eve Wilson"),
        ("frank", "Frank Miller"),
        ("grace", "Grace Hopper"),
        ("henry", "Henry Ford"),
    ];
    let ids: Vec<_> = friends
        .iter()
        .map(|(username, display_name)| {
            let user = User::new(username, display_name);
            let id = user.id;
            ledger.users.push(user);
            id
        })
        .collect();

    let ago = |seconds: i64| now - Duration::seconds(seconds);

    ledger.pokes = vec![
        Poke::new(ids[0], me, ago(3600)),
        Poke::new(ids[1], me, ago(7200)),
        Poke::new(me, ids[2], ago(1800)),
        Poke::new(ids[3], me, ago(5400)),
        Poke::new(me, ids[4], ago(900)),
    ];

    ledger.relations = vec![
        PokeRelation::new(ids[0], 12, ago(1800), me),
        PokeRelation::new(ids[1], 8, ago(3600), ids[1]),
        PokeRelation::new(ids[2], 15, ago(900), me),
        PokeRelation::new(ids[3], 6, ago(7200), ids[3]),
        PokeRelation::new(ids[4], 23, ago(450), me),
        PokeRelation::new(ids[5], 4, ago(10800), ids[5]),
    ];

    ledger.leaderboard = vec![
        LeaderboardEntry::new(ids[0], 156, 89, 1),
        LeaderboardEntry::new(me, 142, 98, 2),
        LeaderboardEntry::new(ids[1], 134, 76, 3),
        LeaderboardEntry::new(ids[3], 128, 82, 4),
        LeaderboardEntry::new(ids[2], 115, 67, 5),
        LeaderboardEntry::new(ids[4], 98, 54, 6),
        LeaderboardEntry::new(ids[5], 87, 45, 7),
        LeaderboardEntry::new(ids[6], 76, 38, 8),
    ];

    ledger
}
