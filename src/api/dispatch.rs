use std::time::Duration;

use log::debug;
use reqwest::{Method, Response, StatusCode};

use super::constants::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use super::error::ApiError;
use super::token::TokenManager;

/// Executes single authenticated HTTP calls against the cloud API.
///
/// Every call carries the current IAM token as a bearer header. A 401 answer
/// triggers exactly one token refresh followed by exactly one retry; whatever
/// the retry returns is handed back as-is, so a systemically invalid secret
/// can never loop. Transport failures are not retried here at all; the
/// monitor's next poll cycle is the retry mechanism.
pub struct RequestDispatcher {
    http: reqwest::Client,
    tokens: TokenManager,
}

impl RequestDispatcher {
    pub fn new(oauth_token: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");
        let tokens = TokenManager::new(http.clone(), oauth_token);

        Self { http, tokens }
    }

    /// Point the token manager at a different token-issuance endpoint
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.tokens = self.tokens.with_token_url(token_url);
        self
    }

    /// Acquire a fresh IAM token immediately, surfacing auth failures early
    pub async fn authenticate(&mut self) -> Result<(), ApiError> {
        self.tokens.refresh().await?;
        Ok(())
    }

    /// Issue one authenticated call, with at most one refresh-and-retry on 401
    pub async fn execute(
        &mut self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Response, ApiError> {
        let token = self.tokens.bearer_token().await?;
        let response = self.send(method.clone(), url, query, &token).await?;

        if response.status() != StatusCode::UNAUTHORIZED || !self.tokens.has_secret() {
            return Ok(response);
        }

        debug!("Got 401 from {}, refreshing IAM token and retrying once", url);
        let token = self.tokens.refresh().await?;
        self.send(method, url, query, &token).await
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        token: &str,
    ) -> Result<Response, ApiError> {
        let response = self
            .http
            .request(method, url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;
        Ok(response)
    }
}
