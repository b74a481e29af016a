//! Chat session state
//!
//! Append-only message log for one conversation. The responder stays
//! stateless; the session is the explicit state the caller threads through.
//! `SessionRegistry` keeps the live sessions of a server within fixed bounds.

use crate::models::{ChatMessage, Sender};
use crate::responder::ResponseSelector;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// Conversation log with monotonically assigned message ids
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "StoredSession")]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    #[serde(skip)]
    next_id: u64,
}

/// Serialized form; the id counter is rebuilt from the messages.
#[derive(Deserialize)]
struct StoredSession {
    messages: Vec<ChatMessage>,
}

impl From<StoredSession> for ChatSession {
    fn from(stored: StoredSession) -> Self {
        let next_id = stored.messages.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        Self {
            messages: stored.messages,
            next_id,
        }
    }
}

/// Ids of the two messages created by one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    pub user_message_id: u64,
    pub reply_message_id: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    /// Session that opens with an assistant greeting.
    pub fn with_welcome(text: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.push(Sender::Assistant, text.into());
        session
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> u64 {
        self.push(Sender::User, text.into())
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) -> u64 {
        self.push(Sender::Assistant, text.into())
    }

    /// Append the utterance and the selected reply.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn submit(&mut self, utterance: &str, selector: &ResponseSelector) -> Option<Exchange> {
        if utterance.trim().is_empty() {
            return None;
        }

        let user_message_id = self.push_user(utterance);
        let reply = selector.select(utterance).to_string();
        let reply_message_id = self.push_assistant(reply);

        Some(Exchange {
            user_message_id,
            reply_message_id,
        })
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    fn push(&mut self, sender: Sender, text: String) -> u64 {
        // Default-constructed sessions start at 0; ids are 1-based.
        let id = self.next_id.max(1);
        self.next_id = id + 1;

        debug!(message_id = id, sender = %sender, "Chat message appended");

        self.messages.push(ChatMessage {
            id,
            text,
            sender,
            timestamp: Utc::now(),
        });
        id
    }
}

/// Presentation delay before showing an assistant reply.
///
/// Purely cosmetic: it is applied after the reply text has been selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplyDelay(Duration);

impl ReplyDelay {
    pub fn new(delay: Duration) -> Self {
        Self(delay)
    }

    pub fn none() -> Self {
        Self(Duration::ZERO)
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    pub async fn wait(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// Bounds on the chat sessions a server keeps in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Sessions idle for longer than this are dropped
    pub idle_ttl: Duration,
    /// Beyond this count the least recently used session is dropped
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(30 * 60),
            max_sessions: 1_000,
        }
    }
}

struct TrackedSession {
    session: ChatSession,
    last_active: Instant,
}

/// Live chat sessions keyed by chat id
pub struct SessionRegistry {
    limits: SessionLimits,
    sessions: HashMap<Uuid, TrackedSession>,
}

impl SessionRegistry {
    pub fn new(limits: SessionLimits) -> Self {
        Self {
            limits,
            sessions: HashMap::new(),
        }
    }

    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: &Uuid) -> Option<&ChatSession> {
        self.sessions.get(id).map(|tracked| &tracked.session)
    }

    /// Session for `id`, created with `init` when absent, marked active at `now`.
    ///
    /// Expired sessions are dropped first; when a new session would exceed
    /// `max_sessions`, the least recently active ones make room.
    pub fn session_mut(
        &mut self,
        id: Uuid,
        now: Instant,
        init: impl FnOnce() -> ChatSession,
    ) -> &mut ChatSession {
        self.prune(now);

        if !self.sessions.contains_key(&id) {
            while self.sessions.len() >= self.limits.max_sessions.max(1) {
                self.evict_least_recent();
            }
        }

        let tracked = self.sessions.entry(id).or_insert_with(|| TrackedSession {
            session: init(),
            last_active: now,
        });
        tracked.last_active = now;
        &mut tracked.session
    }

    /// Drop sessions idle past the TTL. Returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let ttl = self.limits.idle_ttl;
        let before = self.sessions.len();
        self.sessions
            .retain(|_, tracked| now.saturating_duration_since(tracked.last_active) <= ttl);

        let removed = before - self.sessions.len();
        if removed > 0 {
            debug!(removed, remaining = self.sessions.len(), "Expired chat sessions dropped");
        }
        removed
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|(_, tracked)| tracked.last_active)
            .map(|(id, _)| *id);

        if let Some(id) = oldest {
            self.sessions.remove(&id);
            debug!(chat_id = %id, "Chat session evicted at capacity");
        }
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(SessionLimits::default())
    }
}
