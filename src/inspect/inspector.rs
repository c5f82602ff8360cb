//! Single process-group inspection: fetch one group's flow, record its name
//! and immediate child-group ids, and time the remote call.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::NiFiRestClient;
use crate::types::{ProcessGroupFlowDto, ProcessGroupFlowEntity};

/// Terminal-once status of a node inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InspectionStatus {
    /// Enqueued, not yet inspected.
    Pending,
    Succeeded,
    Failed(String),
}

impl InspectionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, InspectionStatus::Pending)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, InspectionStatus::Succeeded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, InspectionStatus::Failed(_))
    }
}

/// The result of inspecting one process group.
///
/// The parent link is an id resolved through the owning
/// [`InspectionTree`](crate::inspect::InspectionTree), never an owning
/// reference. Once a worker has produced an inspection it is read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowInspection {
    pub group_id: String,
    /// Distance from the crawl root; root = 0.
    pub depth: usize,
    pub parent_group_id: Option<String>,
    /// Display name from the flow breadcrumb; empty until fetched.
    #[serde(default)]
    pub group_name: String,
    /// Immediate child group ids in remote iteration order; populated only
    /// on success.
    #[serde(default)]
    pub child_group_ids: Vec<String>,
    /// Wall-clock duration of the flow GET alone.
    pub elapsed_millis: u64,
    /// Which worker produced this inspection. Diagnostic only.
    #[serde(default)]
    pub worker_tag: String,
    pub status: InspectionStatus,
    /// The raw flow body, retained on success so callers can build richer
    /// caches without a second fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<ProcessGroupFlowDto>,
}

impl FlowInspection {
    /// A fresh pending node, as entered into the tree at enqueue time.
    pub fn pending(group_id: impl Into<String>, depth: usize, parent_group_id: Option<String>) -> Self {
        Self {
            group_id: group_id.into(),
            depth,
            parent_group_id,
            group_name: String::new(),
            child_group_ids: Vec::new(),
            elapsed_millis: 0,
            worker_tag: String::new(),
            status: InspectionStatus::Pending,
            flow: None,
        }
    }
}

/// Inspects exactly one process group; scoped to one (group, depth, parent)
/// triple and consumed by [`inspect`](FlowInspector::inspect).
pub struct FlowInspector<C> {
    group_id: String,
    depth: usize,
    parent_group_id: Option<String>,
    client: Arc<C>,
}

impl<C: NiFiRestClient> FlowInspector<C> {
    pub fn new(
        group_id: impl Into<String>,
        depth: usize,
        parent_group_id: Option<String>,
        client: Arc<C>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            depth,
            parent_group_id,
            client,
        }
    }

    /// Inspects the process group. Always returns a terminal inspection:
    /// remote failures become `Failed(reason)`, and an absent flow body is a
    /// benign empty group, not an error.
    pub async fn inspect(self) -> FlowInspection {
        let mut inspection =
            FlowInspection::pending(self.group_id.clone(), self.depth, self.parent_group_id);
        inspection.worker_tag = std::thread::current()
            .name()
            .unwrap_or("unnamed-worker")
            .to_string();

        let path = format!("/flow/process-groups/{}", self.group_id);
        debug!(group_id = %self.group_id, depth = self.depth, "inspecting process group");

        let start = Instant::now();
        let result = self.client.get(&path).await;
        inspection.elapsed_millis = start.elapsed().as_millis() as u64;

        match result {
            Ok(Some(value)) => match serde_json::from_value::<ProcessGroupFlowEntity>(value) {
                Ok(entity) => {
                    inspection.group_name = entity.group_name().unwrap_or_default().to_string();
                    inspection.child_group_ids = entity.child_group_ids();
                    inspection.flow = entity.process_group_flow;
                    inspection.status = InspectionStatus::Succeeded;
                }
                Err(e) => {
                    warn!(group_id = %self.group_id, error = %e, "malformed flow response");
                    inspection.status =
                        InspectionStatus::Failed(format!("malformed flow response: {}", e));
                }
            },
            // No flow body for this group: treat as an empty group.
            Ok(None) => {
                inspection.status = InspectionStatus::Succeeded;
            }
            Err(e) => {
                warn!(group_id = %self.group_id, error = %e, "failed to inspect process group");
                inspection.status = InspectionStatus::Failed(e.to_string());
            }
        }

        inspection
    }
}
