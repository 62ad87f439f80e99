use std::sync::Arc;

use crate::{ratelimit::RateLimiter, result::Result, transport::decode_lines, FetchLines};
use async_trait::async_trait;
use reqwest::{header::USER_AGENT, Client as ReqwestClient};

/// HTTP [`FetchLines`] implementation for JBBS.
///
/// Every request first takes a token from the client's [`RateLimiter`].
/// Clones share both the connection pool and the limiter.
#[derive(Debug, Clone)]
pub struct Client {
    http: ReqwestClient,
    limiter: Arc<RateLimiter>,
}

impl Client {
    /// Creates a client with its own limiter at the default 3 requests per minute.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new() -> Client {
        Self::with_limiter(Arc::new(RateLimiter::default()))
    }

    /// Creates a client that draws from `limiter`.
    ///
    /// Hand the same limiter to every client that should count against one budget.
    pub fn with_limiter(limiter: Arc<RateLimiter>) -> Client {
        Client {
            http: ReqwestClient::new(),
            limiter,
        }
    }

    /// Returns the limiter gating this client, e.g. to [`RateLimiter::set_rate`] it.
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }
}

#[async_trait]
impl FetchLines for Client {
    async fn fetch_lines(&self, url: &str) -> Result<Vec<String>> {
        self.limiter.acquire().await;

        log::info!("GET {url}");
        let response = self
            .http
            .get(url)
            .header(USER_AGENT, "JbbsReader/0.1")
            .send()
            .await?;

        // JBBS reports problems through the body, not the status
        if !response.status().is_success() {
            log::warn!("response status for {url}: {}", response.status());
        }

        let body = response.bytes().await?;
        Ok(decode_lines(&body))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
