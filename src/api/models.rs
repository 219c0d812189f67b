use serde::Deserialize;

/// Observed power state of an instance, reduced to the three buckets the
/// monitor acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceStatus {
    Running,
    Stopped,
    /// Any other provider status (provisioning, starting, stopping, error, ...)
    Transitional,
}

impl InstanceStatus {
    /// Classify the provider's free-form status string. Total and
    /// case-sensitive: only exact `RUNNING` / `STOPPED` are actionable.
    pub fn classify(raw: &str) -> Self {
        match raw {
            "RUNNING" => InstanceStatus::Running,
            "STOPPED" => InstanceStatus::Stopped,
            _ => InstanceStatus::Transitional,
        }
    }
}

/// A compute instance as returned by the get-instance endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cloud {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingPolicy {
    #[serde(default)]
    pub preemptible: bool,
}

/// A compute instance as returned by the list-instances endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub scheduling_policy: SchedulingPolicy,
}

// List envelopes; a missing list deserializes to an empty vec, never null.

#[derive(Debug, Default, Deserialize)]
pub struct CloudList {
    #[serde(default)]
    pub clouds: Vec<Cloud>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FolderList {
    #[serde(default)]
    pub folders: Vec<Folder>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InstanceList {
    #[serde(default)]
    pub instances: Vec<InstanceSummary>,
}
