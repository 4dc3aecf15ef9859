//! The poke ledger: single owner of all application state.
//!
//! The ledger holds the canonical lists of users, pokes, relations and
//! leaderboard entries in memory. Nothing is persisted; the process starts
//! from the seed dataset and all state is gone on exit. Handlers reach the
//! ledger through `Arc<RwLock<..>>` in `AppState`, so one mutation runs at a
//! time.

pub mod seed;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    LeaderboardEntry, LeaderboardMetric, Poke, PokeRelation, RevisionInfo, Snapshot, User,
};

/// In-memory store for all Poky data.
pub struct PokeLedger {
    revision_id: i64,
    generated_at: DateTime<Utc>,
    current_user_id: Uuid,
    users: Vec<User>,
    pokes: Vec<Poke>,
    relations: Vec<PokeRelation>,
    leaderboard: Vec<LeaderboardEntry>,
}

impl PokeLedger {
    /// Create a ledger with a single current user and nothing else.
    pub fn new(current_user: User) -> Self {
        let current_user_id = current_user.id;
        Self {
            revision_id: 0,
            generated_at: Utc::now(),
            current_user_id,
            users: vec![current_user],
            pokes: Vec::new(),
            relations: Vec::new(),
            leaderboard: Vec::new(),
        }
    }

    pub fn revision_id(&self) -> i64 {
        self.revision_id
    }

    pub fn revision_info(&self) -> RevisionInfo {
        RevisionInfo {
            revision_id: self.revision_id,
            generated_at: self.generated_at,
        }
    }

    fn bump_revision(&mut self) -> i64 {
        self.revision_id += 1;
        self.generated_at = Utc::now();
        self.revision_id
    }

    pub fn current_user_id(&self) -> Uuid {
        self.current_user_id
    }

    pub fn current_user(&self) -> &User {
        // The constructor and the seed both put the current user in the list.
        self.users
            .iter()
            .find(|u| u.id == self.current_user_id)
            .expect("current user is always present in the user list")
    }

    // ==================== USERS ====================

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get_user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Users matching a case-insensitive substring of display name or
    /// username. An empty query returns the full list in insertion order.
    pub fn filter_users(&self, query: &str) -> Vec<&User> {
        if query.is_empty() {
            self.users.iter().collect()
        } else {
            self.users.iter().filter(|u| u.matches_query(query)).collect()
        }
    }

    // ==================== POKES ====================

    pub fn pokes(&self) -> &[Poke] {
        &self.pokes
    }

    /// Record a poke from one user to another.
    ///
    /// Appends the immutable event and bumps `poke_count` on both endpoints.
    /// An endpoint id that matches no user is skipped, not an error; sending
    /// to yourself bumps the same counter twice. Relations and the
    /// leaderboard are left untouched.
    pub fn send_poke(&mut self, from: Uuid, to: Uuid) -> Poke {
        let poke = Poke::new(from, to, Utc::now());
        self.pokes.push(poke.clone());

        for endpoint in [from, to] {
            match self.users.iter_mut().find(|u| u.id == endpoint) {
                Some(user) => user.poke_count += 1,
                None => {
                    tracing::warn!(user_id = %endpoint, "poke endpoint not found, count not updated")
                }
            }
        }

        self.bump_revision();
        poke
    }

    pub fn get_poke(&self, id: Uuid) -> Option<&Poke> {
        self.pokes.iter().find(|p| p.id == id)
    }

    /// Flip a poke's read flag. Unknown ids are a no-op; returns whether
    /// anything changed.
    pub fn mark_poke_read(&mut self, id: Uuid) -> bool {
        match self.pokes.iter_mut().find(|p| p.id == id && !p.is_read) {
            Some(poke) => {
                poke.is_read = true;
                self.bump_revision();
                true
            }
            None => false,
        }
    }

    /// Pokes addressed to the current user, most recent first.
    pub fn recent_pokes(&self) -> Vec<&Poke> {
        let mut recent: Vec<&Poke> = self
            .pokes
            .iter()
            .filter(|p| p.to_user_id == self.current_user_id)
            .collect();
        recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent
    }

    // ==================== RELATIONS ====================

    pub fn relations(&self) -> &[PokeRelation] {
        &self.relations
    }

    pub fn get_relation(&self, id: Uuid) -> Option<&PokeRelation> {
        self.relations.iter().find(|r| r.id == id)
    }

    /// Relations whose other user matches the query; same contract as
    /// `filter_users`.
    pub fn filter_relations(&self, query: &str) -> Vec<&PokeRelation> {
        if query.is_empty() {
            self.relations.iter().collect()
        } else {
            self.relations
                .iter()
                .filter(|r| {
                    self.get_user(r.other_user_id)
                        .is_some_and(|u| u.matches_query(query))
                })
                .collect()
        }
    }

    /// Remove a relation and the full bidirectional poke history with that
    /// user. Unknown ids are a no-op; returns whether a relation was removed.
    pub fn delete_poke_relation(&mut self, id: Uuid) -> bool {
        let Some(index) = self.relations.iter().position(|r| r.id == id) else {
            return false;
        };
        let relation = self.relations.remove(index);

        let me = self.current_user_id;
        self.pokes
            .retain(|p| !p.involves_pair(me, relation.other_user_id));

        self.bump_revision();
        true
    }

    /// Remove a relation from the visible list without touching poke history.
    ///
    /// This is deliberately weaker than `delete_poke_relation`: the exchange
    /// history survives, only the relation record disappears.
    pub fn anonymize_poke_relation(&mut self, id: Uuid) -> bool {
        let Some(index) = self.relations.iter().position(|r| r.id == id) else {
            return false;
        };
        self.relations.remove(index);
        self.bump_revision();
        true
    }

    // ==================== LEADERBOARD ====================

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    /// Leaderboard entries, stable-sorted descending by the chosen metric.
    /// Entries with equal values keep their original relative order; the
    /// stored `rank` field is not recomputed.
    pub fn sorted_leaderboard(&self, metric: LeaderboardMetric) -> Vec<&LeaderboardEntry> {
        let mut entries: Vec<&LeaderboardEntry> = self.leaderboard.iter().collect();
        entries.sort_by(|a, b| b.metric_value(metric).cmp(&a.metric_value(metric)));
        entries
    }

    // ==================== SNAPSHOT ====================

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision_id: self.revision_id,
            generated_at: self.generated_at,
            current_user_id: self.current_user_id,
            users: self.users.clone(),
            pokes: self.pokes.clone(),
            relations: self.relations.clone(),
            leaderboard: self.leaderboard.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ledger_with_users(names: &[&str]) -> PokeLedger {
        let mut ledger = PokeLedger::new(User::new("me", "Current User"));
        for name in names {
            let user = User::new(name, &format!("{} Display", name));
            ledger.users.push(user);
        }
        ledger
    }

    fn user_id(ledger: &PokeLedger, username: &str) -> Uuid {
        ledger
            .users()
            .iter()
            .find(|u| u.username == username)
            .unwrap()
            .id
    }

    #[test]
    fn test_send_poke_counts_both_endpoints() {
        let mut ledger = ledger_with_users(&["alice", "bob"]);
        let alice = user_id(&ledger, "alice");
        let bob = user_id(&ledger, "bob");

        ledger.send_poke(alice, bob);
        ledger.send_poke(alice, bob);
        ledger.send_poke(bob, alice);

        assert_eq!(ledger.get_user(alice).unwrap().poke_count, 3);
        assert_eq!(ledger.get_user(bob).unwrap().poke_count, 3);
        assert_eq!(ledger.pokes().len(), 3);
    }

    #[test]
    fn test_send_poke_to_self_counts_twice() {
        let mut ledger = ledger_with_users(&["alice"]);
        let alice = user_id(&ledger, "alice");

        ledger.send_poke(alice, alice);

        assert_eq!(ledger.get_user(alice).unwrap().poke_count, 2);
    }

    #[test]
    fn test_send_poke_unknown_user_is_skipped() {
        let mut ledger = ledger_with_users(&["alice"]);
        let alice = user_id(&ledger, "alice");
        let ghost = Uuid::new_v4();

        ledger.send_poke(ghost, alice);

        // The event is still recorded, only the counter update is skipped.
        assert_eq!(ledger.pokes().len(), 1);
        assert_eq!(ledger.get_user(alice).unwrap().poke_count, 1);
    }

    #[test]
    fn test_delete_relation_cascades_pair_history() {
        let mut ledger = ledger_with_users(&["u1", "u2"]);
        let me = ledger.current_user_id();
        let u1 = user_id(&ledger, "u1");
        let u2 = user_id(&ledger, "u2");

        ledger.send_poke(u1, me);
        ledger.send_poke(me, u2);
        ledger.send_poke(u1, me);

        let relation = PokeRelation::new(u1, 2, Utc::now(), u1);
        let relation_id = relation.id;
        ledger.relations.push(relation);

        assert!(ledger.delete_poke_relation(relation_id));

        assert!(ledger.relations().is_empty());
        assert_eq!(ledger.pokes().len(), 1);
        assert_eq!(ledger.pokes()[0].from_user_id, me);
        assert_eq!(ledger.pokes()[0].to_user_id, u2);
    }

    #[test]
    fn test_delete_relation_is_idempotent() {
        let mut ledger = ledger_with_users(&[]);
        assert!(!ledger.delete_poke_relation(Uuid::new_v4()));
        assert_eq!(ledger.revision_id(), 0);
    }

    #[test]
    fn test_anonymize_keeps_poke_history() {
        let mut ledger = ledger_with_users(&["u1"]);
        let me = ledger.current_user_id();
        let u1 = user_id(&ledger, "u1");

        ledger.send_poke(u1, me);

        let relation = PokeRelation::new(u1, 1, Utc::now(), u1);
        let relation_id = relation.id;
        ledger.relations.push(relation);

        assert!(ledger.anonymize_poke_relation(relation_id));
        assert!(!ledger.anonymize_poke_relation(relation_id));

        assert!(ledger.relations().is_empty());
        assert_eq!(ledger.pokes().len(), 1);
    }

    #[test]
    fn test_filter_users_empty_query_returns_all_in_order() {
        let ledger = ledger_with_users(&["alice", "bob", "charlie"]);

        let all = ledger.filter_users("");
        assert_eq!(all.len(), 4);
        assert_eq!(all[1].username, "alice");
        assert_eq!(all[3].username, "charlie");
    }

    #[test]
    fn test_filter_users_is_case_insensitive_substring() {
        let ledger = ledger_with_users(&["alice", "bob"]);

        let hits = ledger.filter_users("ALI");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].username, "alice");

        assert!(ledger.filter_users("zzz").is_empty());
    }

    #[test]
    fn test_filter_relations_matches_other_user() {
        let mut ledger = ledger_with_users(&["alice", "bob"]);
        let alice = user_id(&ledger, "alice");
        let bob = user_id(&ledger, "bob");
        ledger
            .relations
            .push(PokeRelation::new(alice, 3, Utc::now(), alice));
        ledger
            .relations
            .push(PokeRelation::new(bob, 1, Utc::now(), bob));

        assert_eq!(ledger.filter_relations("").len(), 2);
        let hits = ledger.filter_relations("bob");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].other_user_id, bob);
    }

    #[test]
    fn test_is_your_turn_inverts_last_sender() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();

        let they_sent_last = PokeRelation::new(other, 5, Utc::now(), other);
        assert!(!they_sent_last.is_your_turn());

        let i_sent_last = PokeRelation::new(other, 5, Utc::now(), me);
        assert!(i_sent_last.is_your_turn());
    }

    #[test]
    fn test_leaderboard_sort_by_each_metric() {
        let mut ledger = ledger_with_users(&[]);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        ledger.leaderboard.push(LeaderboardEntry::new(a, 10, 50, 1));
        ledger.leaderboard.push(LeaderboardEntry::new(b, 20, 5, 2));

        let by_sent = ledger.sorted_leaderboard(LeaderboardMetric::Sent);
        assert_eq!(by_sent[0].user_id, b);

        let by_received = ledger.sorted_leaderboard(LeaderboardMetric::Received);
        assert_eq!(by_received[0].user_id, a);

        let by_total = ledger.sorted_leaderboard(LeaderboardMetric::Total);
        assert_eq!(by_total[0].user_id, a);
    }

    #[test]
    fn test_leaderboard_total_sort_is_stable_on_ties() {
        let mut ledger = ledger_with_users(&[]);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let third = Uuid::new_v4();
        // first and third tie on sent+received; first was inserted earlier.
        ledger
            .leaderboard
            .push(LeaderboardEntry::new(first, 30, 10, 1));
        ledger
            .leaderboard
            .push(LeaderboardEntry::new(second, 50, 20, 2));
        ledger
            .leaderboard
            .push(LeaderboardEntry::new(third, 10, 30, 3));

        let sorted = ledger.sorted_leaderboard(LeaderboardMetric::Total);
        assert_eq!(sorted[0].user_id, second);
        assert_eq!(sorted[1].user_id, first);
        assert_eq!(sorted[2].user_id, third);
    }

    #[test]
    fn test_sorting_does_not_rewrite_stored_rank() {
        let mut ledger = ledger_with_users(&[]);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        ledger.leaderboard.push(LeaderboardEntry::new(a, 1, 0, 1));
        ledger.leaderboard.push(LeaderboardEntry::new(b, 99, 0, 2));

        let sorted = ledger.sorted_leaderboard(LeaderboardMetric::Sent);
        // b leads the sorted view but keeps its creation-time rank.
        assert_eq!(sorted[0].user_id, b);
        assert_eq!(sorted[0].rank, 2);
    }

    #[test]
    fn test_recent_pokes_newest_first_to_current_user() {
        let mut ledger = ledger_with_users(&["alice", "bob"]);
        let me = ledger.current_user_id();
        let alice = user_id(&ledger, "alice");
        let bob = user_id(&ledger, "bob");

        let now = Utc::now();
        ledger
            .pokes
            .push(Poke::new(alice, me, now - Duration::hours(2)));
        ledger.pokes.push(Poke::new(me, alice, now));
        ledger
            .pokes
            .push(Poke::new(bob, me, now - Duration::minutes(5)));

        let recent = ledger.recent_pokes();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].from_user_id, bob);
        assert_eq!(recent[1].from_user_id, alice);
    }

    #[test]
    fn test_mark_poke_read_once() {
        let mut ledger = ledger_with_users(&["alice"]);
        let me = ledger.current_user_id();
        let alice = user_id(&ledger, "alice");
        let poke = ledger.send_poke(alice, me);

        assert!(ledger.mark_poke_read(poke.id));
        assert!(!ledger.mark_poke_read(poke.id));
        assert!(!ledger.mark_poke_read(Uuid::new_v4()));
        assert!(ledger.get_poke(poke.id).unwrap().is_read);
    }

    #[test]
    fn test_revision_increments_once_per_mutation() {
        let mut ledger = ledger_with_users(&["alice"]);
        let me = ledger.current_user_id();
        let alice = user_id(&ledger, "alice");

        assert_eq!(ledger.revision_id(), 0);
        ledger.send_poke(me, alice);
        assert_eq!(ledger.revision_id(), 1);
        ledger.send_poke(alice, me);
        assert_eq!(ledger.revision_id(), 2);
        // Pure reads never bump.
        let _ = ledger.snapshot();
        let _ = ledger.filter_users("a");
        assert_eq!(ledger.revision_id(), 2);
    }
}
