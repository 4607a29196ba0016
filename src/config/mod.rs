//! Application configuration

use std::env;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Bearer credential for the upstream. Optional so keyless local
    /// servers (vLLM, LM Studio) work out of the box.
    pub api_key: Option<String>,
    pub upstream_base_url: String,
    pub default_model: String,
    pub max_tokens: Option<u32>,
    pub upstream_timeout_secs: u64,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            api_key: env::var("OPENAI_API_KEY").ok(),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            default_model: env::var("DEFAULT_MODEL").unwrap_or_else(|_| "gpt-4o".into()),
            max_tokens: env::var("MAX_TOKENS").ok().and_then(|v| v.parse().ok()),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_else(|_| default_origins()),
        })
    }
}

fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".into(),
        "http://localhost:5173".into(),
        "http://127.0.0.1:3000".into(),
        "http://127.0.0.1:5173".into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_origins_are_local_dev_hosts() {
        let origins = default_origins();
        assert!(origins.iter().all(|o| o.starts_with("http://")));
        assert!(origins.contains(&"http://localhost:5173".to_string()));
    }
}
