//! Relay pipeline
//!
//! The server-side half of the conversation: session histories and the
//! engine that shuttles them to the upstream provider.

mod engine;
mod history;

pub use engine::{RelayEngine, RelayError, DEFAULT_SESSION};
pub use history::HistoryStore;
