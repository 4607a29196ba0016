//! Relay engine
//!
//! One linear pipeline per request: append the caller's messages, send the
//! whole session history upstream, append the reply, return it. No retries
//! and no rollback: a failed upstream call leaves the caller's messages in
//! history with no paired reply, and a client retry will append them again.

use crate::config::Config;
use crate::conversation::Message;
use crate::providers::{OpenAICompatProvider, ProviderError, UpstreamConfig};

use super::history::HistoryStore;

/// Session used for requests that do not name one.
pub const DEFAULT_SESSION: &str = "default";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

pub struct RelayEngine {
    history: HistoryStore,
    provider: OpenAICompatProvider,
    default_model: String,
}

impl RelayEngine {
    pub fn new(config: &Config) -> Self {
        let provider = OpenAICompatProvider::new(UpstreamConfig {
            base_url: config.upstream_base_url.clone(),
            api_key: config.api_key.clone(),
            max_tokens: config.max_tokens,
            timeout_secs: config.upstream_timeout_secs,
        });

        Self {
            history: HistoryStore::new(),
            provider,
            default_model: config.default_model.clone(),
        }
    }

    /// Run one request through the pipeline and return the assistant reply.
    pub async fn relay(
        &self,
        session: &str,
        model: Option<&str>,
        messages: Vec<Message>,
    ) -> Result<Message, RelayError> {
        // Append and snapshot atomically: the upstream call sees the history
        // exactly as of this request's own append.
        let context = self.history.extend(session, &messages);

        let model = match model {
            Some(m) if !m.is_empty() => m,
            _ => self.default_model.as_str(),
        };

        let reply = self.provider.chat(&context, model).await?;

        self.history.push(session, reply.clone());

        tracing::debug!(
            session,
            history_len = self.history.len(session),
            reply_chars = reply.content.as_text().len(),
            "relay turn complete"
        );

        Ok(reply)
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }
}
