use log::{debug, info};

use super::constants::IAM_TOKEN_URL;
use super::error::ApiError;

/// Owns the long-lived OAuth token and the cached short-lived IAM token.
///
/// The manager does not track the IAM token's remaining lifetime; staleness is
/// discovered reactively when a call comes back 401 and the dispatcher asks
/// for a refresh.
pub struct TokenManager {
    http: reqwest::Client,
    oauth_token: String,
    iam_token: Option<String>,
    token_url: String,
}

impl TokenManager {
    pub fn new(http: reqwest::Client, oauth_token: String) -> Self {
        Self {
            http,
            oauth_token,
            iam_token: None,
            token_url: IAM_TOKEN_URL.to_string(),
        }
    }

    /// Point the manager at a different token-issuance endpoint
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Whether a long-lived secret is configured at all
    pub fn has_secret(&self) -> bool {
        !self.oauth_token.trim().is_empty()
    }

    /// Exchange the OAuth token for a fresh IAM token, replacing the cached
    /// one. The old token is discarded wholesale.
    pub async fn refresh(&mut self) -> Result<String, ApiError> {
        if !self.has_secret() {
            return Err(ApiError::Auth("OAuth token is not configured".to_string()));
        }

        debug!("Exchanging OAuth token for a fresh IAM token");
        let response = self
            .http
            .post(&self.token_url)
            .json(&serde_json::json!({ "yandexPassportOauthToken": self.oauth_token }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Auth(format!(
                "token exchange rejected: HTTP {}",
                status
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let token = body
            .get("iamToken")
            .and_then(|value| value.as_str())
            .ok_or_else(|| {
                ApiError::Payload("token exchange response has no iamToken".to_string())
            })?
            .to_string();

        info!("Obtained a fresh IAM token");
        self.iam_token = Some(token.clone());
        Ok(token)
    }

    /// Return the cached IAM token, refreshing lazily if none is cached yet
    pub async fn bearer_token(&mut self) -> Result<String, ApiError> {
        match &self.iam_token {
            Some(token) => Ok(token.clone()),
            None => self.refresh().await,
        }
    }
}
