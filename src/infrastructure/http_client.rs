//! HTTP client for fetching the updates page
//!
//! Thin wrapper over reqwest with the headers the source site needs and
//! bounded retry for transient failures. The Accept-Language header is
//! pinned to en-US regardless of the requested locale so the rendered
//! update dates always use English month names, which is what the date
//! parser expects.

use std::time::Duration;

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use tokio::time::sleep;
use tracing::warn;

use crate::domain::services::ExtractionError;
use crate::infrastructure::config::HttpConfig;

/// HTTP client with retry for transient fetch failures.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Builds a client from the configured timeout, user agent and retry
    /// policy.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Fetches a page body, retrying transient failures up to the configured
    /// attempt count.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ExtractionError> {
        let mut attempt = 0;
        loop {
            match self.try_fetch(url).await {
                Ok(body) => return Ok(body),
                Err(err) if attempt < self.config.max_retries && err.is_retryable() => {
                    attempt += 1;
                    warn!(url, attempt, error = %err, "fetch failed, retrying");
                    sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<String, ExtractionError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| Self::request_error(url, &err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|err| Self::request_error(url, &err))
    }

    fn request_error(url: &str, err: &reqwest::Error) -> ExtractionError {
        if err.is_timeout() {
            ExtractionError::Timeout {
                url: url.to_string(),
            }
        } else {
            ExtractionError::Network {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}
