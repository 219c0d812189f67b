//! Yandex Cloud REST API client.
//!
//! Exchanges the configured OAuth token for short-lived IAM tokens, dispatches
//! authenticated requests with a single refresh-and-retry on 401, and exposes
//! the handful of typed compute / resource-manager operations the tool needs.

pub mod client;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod token;

pub use client::CloudApiClient;
pub use dispatch::RequestDispatcher;
pub use error::ApiError;
pub use models::{Cloud, Folder, Instance, InstanceStatus, InstanceSummary};
pub use token::TokenManager;
