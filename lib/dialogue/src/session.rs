//! Session bookkeeping for in-flight dialogues.
//!
//! One user has at most one session. The store is bounded: idle sessions
//! are swept out after a timeout, and when the map is full starting a new
//! dialogue displaces the least recently active one. Every eviction is
//! returned to the caller as an [`EvictedSession`] so the affected user
//! can be told their dialogue ended.

use crate::error::SessionError;
use crate::state::Dialogue;
use chrono::{DateTime, Duration, Utc};
use station_roster_core::ChatUserId;
use std::collections::HashMap;
use std::sync::Mutex;

/// One user's in-flight dialogue with activity timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub dialogue: Dialogue,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl SessionEntry {
    #[must_use]
    pub fn new(dialogue: Dialogue, now: DateTime<Utc>) -> Self {
        Self {
            dialogue,
            created_at: now,
            last_active_at: now,
        }
    }

    /// Replaces the dialogue state and refreshes the activity timestamp.
    #[must_use]
    pub fn advanced(self, dialogue: Dialogue, now: DateTime<Utc>) -> Self {
        Self {
            dialogue,
            created_at: self.created_at,
            last_active_at: now,
        }
    }
}

/// Why a session was evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionReason {
    /// Idle longer than the configured timeout.
    Idle,
    /// Displaced by a new session while the store was at capacity.
    Displaced,
}

/// A session the store removed without the owner finishing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvictedSession {
    pub user: ChatUserId,
    pub entry: SessionEntry,
    pub reason: EvictionReason,
}

/// Bounded map from user to in-flight session.
#[derive(Debug)]
pub struct SessionStore {
    entries: Mutex<HashMap<ChatUserId, SessionEntry>>,
    capacity: usize,
    idle_timeout: Duration,
}

impl SessionStore {
    /// Creates a store holding at most `capacity` sessions, each expiring
    /// after `idle_timeout` without activity.
    #[must_use]
    pub fn new(capacity: usize, idle_timeout: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            idle_timeout,
        }
    }

    /// Starts a new dialogue for a user.
    ///
    /// Fails if the user already has one. At capacity, the least recently
    /// active other session is displaced and returned so the dispatcher can
    /// notify its owner.
    pub fn begin(
        &self,
        user: ChatUserId,
        dialogue: Dialogue,
        now: DateTime<Utc>,
    ) -> Result<Option<EvictedSession>, SessionError> {
        let mut entries = self.entries.lock().unwrap();
        if let Some(existing) = entries.get(&user) {
            return Err(SessionError::AlreadyActive {
                kind: existing.dialogue.kind(),
            });
        }

        let displaced = if entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_active_at)
                .map(|(user, _)| *user);
            oldest.and_then(|victim| {
                entries.remove(&victim).map(|entry| EvictedSession {
                    user: victim,
                    entry,
                    reason: EvictionReason::Displaced,
                })
            })
        } else {
            None
        };

        entries.insert(user, SessionEntry::new(dialogue, now));
        Ok(displaced)
    }

    /// Removes and returns a user's session for exclusive step processing.
    ///
    /// The dispatcher puts the entry back (advanced or restored) before it
    /// handles the next event, so a session is never visible mid-step.
    pub fn take(&self, user: ChatUserId) -> Option<SessionEntry> {
        self.entries.lock().unwrap().remove(&user)
    }

    /// Puts a session back, overwriting nothing (the slot is empty between
    /// `take` and `put` because events are handled one at a time).
    pub fn put(&self, user: ChatUserId, entry: SessionEntry) {
        self.entries.lock().unwrap().insert(user, entry);
    }

    /// Discards a user's session, returning it if there was one.
    pub fn cancel(&self, user: ChatUserId) -> Option<SessionEntry> {
        self.entries.lock().unwrap().remove(&user)
    }

    /// Whether a user has an in-flight dialogue.
    #[must_use]
    pub fn contains(&self, user: ChatUserId) -> bool {
        self.entries.lock().unwrap().contains_key(&user)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Removes every session idle for at least the configured timeout.
    pub fn sweep_idle(&self, now: DateTime<Utc>) -> Vec<EvictedSession> {
        let mut entries = self.entries.lock().unwrap();
        let expired: Vec<ChatUserId> = entries
            .iter()
            .filter(|(_, entry)| now - entry.last_active_at >= self.idle_timeout)
            .map(|(user, _)| *user)
            .collect();

        expired
            .into_iter()
            .filter_map(|user| {
                entries.remove(&user).map(|entry| EvictedSession {
                    user,
                    entry,
                    reason: EvictionReason::Idle,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AssignHeadState, BrowseState, RemoveHeadState};

    fn browse() -> Dialogue {
        Dialogue::BrowseWorkers(BrowseState { roster: vec![] })
    }

    #[test]
    fn begin_rejects_a_second_dialogue() {
        let store = SessionStore::new(10, Duration::minutes(15));
        let user = ChatUserId::new(1);
        let now = Utc::now();

        store.begin(user, browse(), now).expect("first begin");
        let err = store
            .begin(user, Dialogue::AssignHead(AssignHeadState::AskHeadId), now)
            .expect_err("second begin should fail");
        assert_eq!(
            err,
            SessionError::AlreadyActive {
                kind: "browse_workers"
            }
        );
    }

    #[test]
    fn take_then_put_preserves_created_at() {
        let store = SessionStore::new(10, Duration::minutes(15));
        let user = ChatUserId::new(1);
        let started = Utc::now();

        store.begin(user, browse(), started).expect("begin");
        let entry = store.take(user).expect("take");
        assert!(!store.contains(user));

        let later = started + Duration::seconds(30);
        store.put(user, entry.advanced(browse(), later));

        let entry = store.take(user).expect("take again");
        assert_eq!(entry.created_at, started);
        assert_eq!(entry.last_active_at, later);
    }

    #[test]
    fn sweep_evicts_only_idle_sessions() {
        let store = SessionStore::new(10, Duration::minutes(15));
        let idle = ChatUserId::new(1);
        let active = ChatUserId::new(2);
        let start = Utc::now();

        store.begin(idle, browse(), start).expect("begin");
        store
            .begin(active, browse(), start + Duration::minutes(10))
            .expect("begin");

        let evicted = store.sweep_idle(start + Duration::minutes(16));

        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].user, idle);
        assert_eq!(evicted[0].reason, EvictionReason::Idle);
        assert!(store.contains(active));
    }

    #[test]
    fn at_capacity_the_least_recently_active_is_displaced() {
        let store = SessionStore::new(2, Duration::minutes(15));
        let start = Utc::now();
        let oldest = ChatUserId::new(1);

        store.begin(oldest, browse(), start).expect("begin");
        store
            .begin(ChatUserId::new(2), browse(), start + Duration::seconds(5))
            .expect("begin");

        let displaced = store
            .begin(
                ChatUserId::new(3),
                Dialogue::RemoveHead(RemoveHeadState::AskHeadId),
                start + Duration::seconds(10),
            )
            .expect("begin at capacity")
            .expect("someone displaced");

        assert_eq!(displaced.user, oldest);
        assert_eq!(displaced.reason, EvictionReason::Displaced);
        assert_eq!(store.len(), 2);
        assert!(store.contains(ChatUserId::new(3)));
    }

    #[test]
    fn activity_protects_against_displacement() {
        let store = SessionStore::new(2, Duration::minutes(15));
        let start = Utc::now();
        let first = ChatUserId::new(1);
        let second = ChatUserId::new(2);

        store.begin(first, browse(), start).expect("begin");
        store
            .begin(second, browse(), start + Duration::seconds(5))
            .expect("begin");

        // First user acts again, becoming the most recently active.
        let entry = store.take(first).expect("take");
        store.put(first, entry.advanced(browse(), start + Duration::seconds(20)));

        let displaced = store
            .begin(ChatUserId::new(3), browse(), start + Duration::seconds(30))
            .expect("begin")
            .expect("someone displaced");
        assert_eq!(displaced.user, second);
    }

    #[test]
    fn cancel_returns_the_discarded_session() {
        let store = SessionStore::new(10, Duration::minutes(15));
        let user = ChatUserId::new(1);

        assert!(store.cancel(user).is_none());
        store.begin(user, browse(), Utc::now()).expect("begin");
        assert!(store.cancel(user).is_some());
        assert!(store.is_empty());
    }
}
