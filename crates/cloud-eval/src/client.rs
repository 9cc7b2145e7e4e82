//! HTTP client for the Lichess cloud-eval endpoint.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::FetcherConfig;
use crate::response::CloudEval;

/// Outcome of a single request to the evaluation service, other than success.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The position is not in the cloud database.
    #[error("Position not in cloud database")]
    NotFound,
    /// The service asked us to slow down.
    #[error("Rate limited by evaluation service")]
    RateLimited,
    /// No response within the request timeout.
    #[error("Request timed out")]
    Timeout,
    /// Unexpected HTTP status.
    #[error("Cloud eval API error: {0}")]
    Http(u16),
    /// Connection or transport failure.
    #[error("Request error: {0}")]
    Request(String),
    /// The response body was not a valid evaluation.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// Source of cloud evaluations.
///
/// Implemented by [`LichessClient`]; tests substitute scripted fakes.
pub trait EvalService: Send + Sync {
    /// Requests the evaluation of `fen` with up to `multi_pv` principal variations.
    fn cloud_eval(
        &self,
        fen: &str,
        multi_pv: u8,
    ) -> impl Future<Output = Result<CloudEval, ServiceError>> + Send;
}

/// Client for `GET {base_url}/api/cloud-eval`.
#[derive(Debug, Clone)]
pub struct LichessClient {
    client: Client,
    base_url: String,
}

impl LichessClient {
    /// Creates a client against `base_url` (e.g., `https://lichess.org`).
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Request`] if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Request(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the fetcher settings.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Request`] if the HTTP client cannot be built.
    pub fn from_config(config: &FetcherConfig) -> Result<Self, ServiceError> {
        Self::new(
            config.base_url.as_str(),
            &config.user_agent,
            config.request_timeout(),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/api/cloud-eval", self.base_url)
    }
}

fn transport_error(e: &reqwest::Error) -> ServiceError {
    if e.is_timeout() {
        ServiceError::Timeout
    } else {
        ServiceError::Request(e.to_string())
    }
}

impl EvalService for LichessClient {
    async fn cloud_eval(&self, fen: &str, multi_pv: u8) -> Result<CloudEval, ServiceError> {
        let params = [("fen", fen.to_string()), ("multiPv", multi_pv.to_string())];

        let resp = self
            .client
            .get(self.endpoint())
            .query(&params)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        match resp.status() {
            StatusCode::NOT_FOUND => return Err(ServiceError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => return Err(ServiceError::RateLimited),
            status if !status.is_success() => return Err(ServiceError::Http(status.as_u16())),
            _ => {}
        }

        resp.json::<CloudEval>().await.map_err(|e| {
            if e.is_timeout() {
                ServiceError::Timeout
            } else {
                ServiceError::Decode(e.to_string())
            }
        })
    }
}
