use log::{info, warn};
use reqwest::Method;

use super::constants::{
    self, COMPUTE_BASE_URL, RESOURCE_MANAGER_BASE_URL,
};
use super::dispatch::RequestDispatcher;
use super::error::ApiError;
use super::models::{Cloud, CloudList, Folder, FolderList, Instance, InstanceList, InstanceSummary};

/// Typed facade over the request dispatcher: one method per endpoint,
/// returning parsed results or an `ApiError`.
pub struct CloudApiClient {
    dispatcher: RequestDispatcher,
    compute_url: String,
    resource_manager_url: String,
}

impl CloudApiClient {
    pub fn new(oauth_token: String) -> Self {
        Self {
            dispatcher: RequestDispatcher::new(oauth_token),
            compute_url: COMPUTE_BASE_URL.to_string(),
            resource_manager_url: RESOURCE_MANAGER_BASE_URL.to_string(),
        }
    }

    /// Build a client against non-default endpoints (mock servers in tests)
    pub fn with_base_urls(
        oauth_token: String,
        token_url: impl Into<String>,
        compute_url: impl Into<String>,
        resource_manager_url: impl Into<String>,
    ) -> Self {
        Self {
            dispatcher: RequestDispatcher::new(oauth_token).with_token_url(token_url),
            compute_url: compute_url.into(),
            resource_manager_url: resource_manager_url.into(),
        }
    }

    /// Acquire an IAM token up front so a bad secret fails before the loop
    /// starts (also used by the setup wizard to validate the entered token)
    pub async fn authenticate(&mut self) -> Result<(), ApiError> {
        self.dispatcher.authenticate().await
    }

    /// Fetch the instance's current name and status
    pub async fn get_instance(&mut self, instance_id: &str) -> Result<Instance, ApiError> {
        let url = constants::instance_endpoint(&self.compute_url, instance_id);
        let response = self.dispatcher.execute(Method::GET, &url, &[]).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Api { status });
        }
        Ok(response.json().await?)
    }

    /// Ask the provider to start the instance. `Ok(true)` only for HTTP
    /// 200/202; any other status is a non-fatal `Ok(false)` so a rejected
    /// start never aborts monitoring.
    pub async fn start_instance(&mut self, instance_id: &str) -> Result<bool, ApiError> {
        let url = constants::instance_start_endpoint(&self.compute_url, instance_id);
        let response = self.dispatcher.execute(Method::POST, &url, &[]).await?;

        let status = response.status();
        if status == reqwest::StatusCode::OK || status == reqwest::StatusCode::ACCEPTED {
            // The body carries the id of the async start operation
            if let Ok(body) = response.json::<serde_json::Value>().await {
                if let Some(operation_id) = body.get("id").and_then(|value| value.as_str()) {
                    info!("Start operation accepted: {}", operation_id);
                }
            }
            Ok(true)
        } else {
            warn!("Start command rejected: HTTP {}", status);
            Ok(false)
        }
    }

    /// List the clouds visible to this account, in provider order
    pub async fn list_clouds(&mut self) -> Result<Vec<Cloud>, ApiError> {
        let url = format!("{}/clouds", self.resource_manager_url);
        let response = self.dispatcher.execute(Method::GET, &url, &[]).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Api { status });
        }
        let list: CloudList = response.json().await?;
        Ok(list.clouds)
    }

    /// List the folders of a cloud, in provider order
    pub async fn list_folders(&mut self, cloud_id: &str) -> Result<Vec<Folder>, ApiError> {
        let url = format!("{}/folders", self.resource_manager_url);
        let response = self
            .dispatcher
            .execute(Method::GET, &url, &[("cloudId", cloud_id)])
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Api { status });
        }
        let list: FolderList = response.json().await?;
        Ok(list.folders)
    }

    /// List the compute instances of a folder, in provider order
    pub async fn list_instances(
        &mut self,
        folder_id: &str,
    ) -> Result<Vec<InstanceSummary>, ApiError> {
        let url = format!("{}/instances", self.compute_url);
        let response = self
            .dispatcher
            .execute(Method::GET, &url, &[("folderId", folder_id)])
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Api { status });
        }
        let list: InstanceList = response.json().await?;
        Ok(list.instances)
    }
}
