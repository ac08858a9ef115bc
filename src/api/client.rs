//! CRPT Document Submission Client
//!
//! HTTP client for the document-creation endpoint. Every submission runs
//! under the crate's sliding-window rate limiter; serialization happens
//! inside the guarded operation, so any attempt consumes a slot whether it
//! fails in serialization, in transport, or at the endpoint.

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use super::document::GoodsIntroductionDocument;
use super::error::ApiError;
use crate::config::Config;
use crate::rate_limit::RateLimiter;

/// Production endpoint for creating goods-introduction documents
pub const DEFAULT_API_URL: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";

/// Response from the document-creation endpoint
#[derive(Debug, Clone)]
pub struct DocumentResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

/// Rate-limited client for the CRPT documents endpoint
#[derive(Debug, Clone)]
pub struct CrptClient {
    http: reqwest::Client,
    url: String,
    limiter: RateLimiter,
}

impl CrptClient {
    /// Create a client for the production endpoint.
    pub fn new(limiter: RateLimiter) -> Self {
        Self::with_url(DEFAULT_API_URL, limiter)
    }

    /// Create a client for a specific endpoint URL.
    pub fn with_url(url: impl Into<String>, limiter: RateLimiter) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            limiter,
        }
    }

    /// Build a client, its HTTP transport and its limiter from
    /// configuration.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let limiter = RateLimiter::from_config(&config.rate_limit)?;
        let http = reqwest::Client::builder()
            .timeout(config.api.timeout())
            .build()?;
        Ok(Self {
            http,
            url: config.api.url.clone(),
            limiter,
        })
    }

    /// The limiter guarding this client's submissions.
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Submit a goods-introduction document.
    ///
    /// Blocks while the endpoint's request limit is exhausted. Once
    /// admitted, the document is serialized and POSTed as JSON; the slot is
    /// consumed regardless of how the attempt ends.
    ///
    /// # Errors
    ///
    /// [`ApiError::RateLimit`] if the limiter is shut down while waiting,
    /// [`ApiError::Serialization`] for an unserializable document,
    /// [`ApiError::Http`] for transport failures, and [`ApiError::Status`]
    /// when the endpoint answers with a non-success status.
    pub async fn create_introduce_goods_document(
        &self,
        document: &GoodsIntroductionDocument,
    ) -> Result<DocumentResponse, ApiError> {
        let http = &self.http;
        let url = self.url.as_str();

        self.limiter
            .run_guarded(move || async move {
                let body = serde_json::to_string(document)?;

                let response = http
                    .post(url)
                    .header(CONTENT_TYPE, "application/json")
                    .body(body)
                    .send()
                    .await?;

                let status = response.status();
                let body = response.text().await?;

                if !status.is_success() {
                    warn!(status = status.as_u16(), "document submission rejected");
                    return Err(ApiError::Status {
                        code: status.as_u16(),
                        body,
                    });
                }

                debug!(status = status.as_u16(), "document submission accepted");
                Ok(DocumentResponse {
                    status: status.as_u16(),
                    body,
                })
            })
            .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_defaults() {
        let config = Config::default();
        let client = CrptClient::from_config(&config).unwrap();
        assert_eq!(client.url, DEFAULT_API_URL);
        assert_eq!(client.limiter().limit(), config.rate_limit.limit);
    }

    #[test]
    fn test_from_config_rejects_invalid_limiter() {
        let mut config = Config::default();
        config.rate_limit.limit = 0;
        assert!(matches!(
            CrptClient::from_config(&config),
            Err(ApiError::RateLimit(_))
        ));
    }
}
