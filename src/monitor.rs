//! The poll -> decide -> act control loop.
//!
//! Each cycle is decided independently from the latest observation alone; the
//! monitor keeps no memory of previous cycles, so a restart needs no
//! reconciliation. A start command is issued on every cycle the instance is
//! observed STOPPED: the call is idempotent on the provider side and repeating
//! it compensates for a start that silently failed.

use std::time::Duration;

use async_trait::async_trait;
use log::{error, info, warn};
use tokio::sync::watch;

use crate::api::{ApiError, CloudApiClient, Instance, InstanceStatus};

/// The two compute operations the monitor needs, as a seam so tests can
/// script status sequences without a server.
#[async_trait]
pub trait ComputeApi {
    async fn get_instance(&mut self, instance_id: &str) -> Result<Instance, ApiError>;
    async fn start_instance(&mut self, instance_id: &str) -> Result<bool, ApiError>;
}

#[async_trait]
impl ComputeApi for CloudApiClient {
    async fn get_instance(&mut self, instance_id: &str) -> Result<Instance, ApiError> {
        CloudApiClient::get_instance(self, instance_id).await
    }

    async fn start_instance(&mut self, instance_id: &str) -> Result<bool, ApiError> {
        CloudApiClient::start_instance(self, instance_id).await
    }
}

pub struct InstanceMonitor<C> {
    client: C,
    instance_id: String,
    interval: Duration,
}

impl<C: ComputeApi> InstanceMonitor<C> {
    pub fn new(client: C, instance_id: String, interval_secs: u64) -> Self {
        Self {
            client,
            instance_id,
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// Poll until the shutdown channel fires. The first poll happens
    /// immediately; an in-flight cycle always runs to completion, only the
    /// inter-cycle sleep is interruptible.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Monitoring instance {} every {}s",
            self.instance_id,
            self.interval.as_secs()
        );

        loop {
            self.poll_once().await;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.changed() => {
                    info!("Shutdown requested, stopping monitor");
                    break;
                }
            }
        }
    }

    /// One cycle: fetch status, classify, maybe start. Every error is logged
    /// and swallowed here so a failed poll can never take the process down.
    pub async fn poll_once(&mut self) {
        match self.client.get_instance(&self.instance_id).await {
            Ok(instance) => self.decide(&instance).await,
            Err(e) => error!("Status poll failed: {}", e),
        }
    }

    async fn decide(&mut self, instance: &Instance) {
        match InstanceStatus::classify(&instance.status) {
            InstanceStatus::Running => {
                info!("Instance '{}' is RUNNING", instance.name);
            }
            InstanceStatus::Stopped => {
                warn!(
                    "Instance '{}' is STOPPED, sending start command",
                    instance.name
                );
                match self.client.start_instance(&self.instance_id).await {
                    Ok(true) => info!("Start command sent successfully"),
                    Ok(false) => warn!("Start command was rejected, retrying next cycle"),
                    Err(e) => error!("Start request failed: {}", e),
                }
            }
            InstanceStatus::Transitional => {
                info!(
                    "Instance '{}' is {}, waiting",
                    instance.name, instance.status
                );
            }
        }
    }
}
