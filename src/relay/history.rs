//! In-memory conversation history
//!
//! Histories live for the lifetime of the process and are never persisted
//! or truncated. Each session key owns an independent append-only log; the
//! lock is held for individual appends and snapshots only, never across a
//! network call. Two concurrent requests on the same session can therefore
//! still interleave their appends with each other's upstream round-trips;
//! callers that need strict turn ordering must serialize their own requests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::conversation::Message;

#[derive(Default)]
pub struct HistoryStore {
    sessions: Mutex<HashMap<String, Vec<Message>>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the caller's messages to a session and return the full
    /// history as of this append, in one atomic step.
    pub fn extend(&self, session: &str, messages: &[Message]) -> Vec<Message> {
        let mut sessions = self.lock();
        let history = sessions.entry(session.to_string()).or_default();
        history.extend_from_slice(messages);
        history.clone()
    }

    /// Append a single message (the assistant reply) to a session.
    pub fn push(&self, session: &str, message: Message) {
        self.lock()
            .entry(session.to_string())
            .or_default()
            .push(message);
    }

    pub fn snapshot(&self, session: &str) -> Vec<Message> {
        self.lock().get(session).cloned().unwrap_or_default()
    }

    pub fn len(&self, session: &str) -> usize {
        self.lock().get(session).map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self, session: &str) -> bool {
        self.len(session) == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Message>>> {
        self.sessions.lock().expect("history lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn extend_returns_cumulative_snapshot() {
        let store = HistoryStore::new();
        let first = store.extend("s1", &[Message::user("one")]);
        assert_eq!(first.len(), 1);

        store.push("s1", Message::assistant("reply"));
        let second = store.extend("s1", &[Message::user("two")]);
        assert_eq!(second.len(), 3);
        assert_eq!(store.len("s1"), 3);
    }

    #[test]
    fn sessions_are_isolated() {
        let store = HistoryStore::new();
        store.extend("alice", &[Message::user("hi from alice")]);
        store.extend("bob", &[Message::user("hi from bob")]);

        assert_eq!(store.len("alice"), 1);
        assert_eq!(store.len("bob"), 1);
        assert_eq!(
            store.snapshot("alice")[0].content.as_text(),
            "hi from alice"
        );
    }

    #[test]
    fn unknown_session_is_empty() {
        let store = HistoryStore::new();
        assert!(store.is_empty("nope"));
        assert!(store.snapshot("nope").is_empty());
    }

    #[tokio::test]
    async fn concurrent_appends_lose_nothing() {
        let store = Arc::new(HistoryStore::new());
        let mut handles = Vec::new();

        for i in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.extend("shared", &[Message::user(&format!("msg {}", i))]);
                store.push("shared", Message::assistant("ok"));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len("shared"), 64);
    }
}
