//! Endpoint constants for the Yandex Cloud REST API

/// IAM token issuance endpoint (OAuth token -> IAM token exchange)
pub const IAM_TOKEN_URL: &str = "https://iam.api.cloud.yandex.net/iam/v1/tokens";

/// Compute service base URL
pub const COMPUTE_BASE_URL: &str = "https://compute.api.cloud.yandex.net/compute/v1";

/// Resource Manager service base URL (clouds and folders)
pub const RESOURCE_MANAGER_BASE_URL: &str =
    "https://resource-manager.api.cloud.yandex.net/resource-manager/v1";

/// Per-request timeout applied to every API call
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("yc-autostart/", env!("CARGO_PKG_VERSION"));

/// Build the instance endpoint URL
pub fn instance_endpoint(compute_url: &str, instance_id: &str) -> String {
    format!("{}/instances/{}", compute_url, instance_id)
}

/// Build the instance start action URL
pub fn instance_start_endpoint(compute_url: &str, instance_id: &str) -> String {
    format!("{}/instances/{}:start", compute_url, instance_id)
}
