//! Upstream provider integration

mod openai_compat;

use thiserror::Error;

pub use openai_compat::{OpenAICompatProvider, UpstreamConfig};

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure: the upstream was never reached or the
    /// connection died mid-request.
    #[error("upstream request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The upstream answered with a non-success status. Status and body are
    /// carried verbatim for pass-through to the caller.
    #[error("upstream returned HTTP {status}")]
    Upstream { status: u16, body: String },

    /// The upstream returned 2xx but the body did not parse as a chat
    /// completion.
    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),

    /// A well-formed completion with an empty choices list.
    #[error("no completion returned: {0}")]
    NoCompletion(String),
}
