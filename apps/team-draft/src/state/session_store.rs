//! Per-requester memory of the last roster and what has been produced for it.
//!
//! Entries live for the process lifetime only. A new roster from the same
//! requester replaces the entry wholesale.

use std::collections::HashSet;
use std::fmt;

use dashmap::DashMap;

use crate::domain::{Composition, CompositionSignature, Roster, RosterMode};

/// Whoever submits rosters: a chat, a user, a channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequesterId(String);

impl RequesterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RequesterId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RequesterId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RequesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub roster: Roster,
    pub composition: Composition,
    pub last_signature: CompositionSignature,
    /// Every signature produced for this roster, including the last one.
    pub seen: HashSet<CompositionSignature>,
    /// Chosen once per roster and kept across reshuffles.
    pub next_duty: Option<String>,
    pub shuffles: u32,
}

impl SessionEntry {
    pub fn mode(&self) -> RosterMode {
        self.roster.mode()
    }
}

/// Concurrent map of sessions keyed by requester.
///
/// Requests from different requesters never contend beyond a shard lock.
/// Requests from the same requester are expected to arrive one at a time.
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: DashMap<RequesterId, SessionEntry>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Start a fresh session for a new roster. Returns its signature.
    pub fn put(
        &self,
        requester: RequesterId,
        roster: Roster,
        composition: Composition,
        next_duty: Option<String>,
    ) -> CompositionSignature {
        let signature = composition.signature();
        let entry = SessionEntry {
            roster,
            composition,
            last_signature: signature.clone(),
            seen: HashSet::from([signature.clone()]),
            next_duty,
            shuffles: 0,
        };
        self.entries.insert(requester, entry);
        signature
    }

    /// Record a reshuffle result. Returns `None` when the requester has no
    /// session, otherwise how many signatures the session has now seen.
    pub fn record_shuffle(
        &self,
        requester: &RequesterId,
        composition: Composition,
    ) -> Option<usize> {
        let mut entry = self.entries.get_mut(requester)?;
        let signature = composition.signature();
        entry.seen.insert(signature.clone());
        entry.last_signature = signature;
        entry.composition = composition;
        entry.shuffles += 1;
        Some(entry.seen.len())
    }

    pub fn get(&self, requester: &RequesterId) -> Option<SessionEntry> {
        self.entries.get(requester).map(|e| e.value().clone())
    }

    pub fn remove(&self, requester: &RequesterId) -> Option<SessionEntry> {
        self.entries.remove(requester).map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
