// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local session store.
//!
//! A session exists from successful sign-in until sign-out or expiry. The
//! browser only ever holds the opaque session id.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::random::random_hex;

/// Session ids are 128 random bits.
const SESSION_ID_BYTES: usize = 16;

/// The signed-in user, as known to this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Provider-issued ID token, needed for account lookups
    pub id_token: String,
    /// Provider user id; partition key for all to-do data
    pub uid: String,
    pub email: String,
}

#[derive(Clone)]
struct Entry {
    session: Session,
    created: Instant,
}

/// Sessions keyed by session id.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Entry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Store a session and return its new id.
    ///
    /// Expired sessions are swept first, so entries whose cookie never comes
    /// back do not accumulate.
    pub fn insert(&self, session: Session) -> anyhow::Result<String> {
        self.purge_expired();

        let session_id = random_hex(SESSION_ID_BYTES)?;
        self.sessions.insert(
            session_id.clone(),
            Entry {
                session,
                created: Instant::now(),
            },
        );
        Ok(session_id)
    }

    /// Look up a live session. Expired entries are dropped.
    pub fn get(&self, session_id: &str) -> Option<Session> {
        {
            // The read guard must be released before `remove` on the same shard.
            let entry = self.sessions.get(session_id)?;
            if entry.created.elapsed() < self.ttl {
                return Some(entry.session.clone());
            }
        }

        tracing::debug!("Dropping expired session");
        self.sessions.remove(session_id);
        None
    }

    /// Forget a session. Unknown ids are ignored.
    pub fn remove(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    /// Drop every expired session.
    fn purge_expired(&self) {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| entry.created.elapsed() < self.ttl);
        let purged = before.saturating_sub(self.sessions.len());
        if purged > 0 {
            tracing::debug!(purged, remaining = self.sessions.len(), "Purged expired sessions");
        }
    }
}
