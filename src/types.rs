//! NiFi v1 REST API payload types
//!
//! Only the fields this crate reads are mapped; everything else a NiFi
//! instance returns is ignored on deserialization. Processor configuration
//! is carried as raw JSON and passed through untouched.
//!
//! Reference: https://nifi.apache.org/docs/nifi-docs/rest-api/

use serde::{Deserialize, Serialize};

/// Optimistic-concurrency revision stamp attached to every NiFi component.
///
/// Opaque to this crate: a write must echo the stamp from the most recent
/// read of the same component, or NiFi rejects it.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RevisionDto {
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(rename = "clientId", default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// A processor's component payload (revision metadata stripped).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProcessorDto {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub processor_type: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    /// Processor configuration, passed through as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

/// Envelope returned by `GET /processors/{id}`: component + revision.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProcessorEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<RevisionDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ProcessorDto>,
}

/// Top-level response of the flow resource for one process group.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessGroupFlowEntity {
    #[serde(rename = "processGroupFlow", default)]
    pub process_group_flow: Option<ProcessGroupFlowDto>,
}

/// The flow contents of a single process group.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessGroupFlowDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub breadcrumb: Option<FlowBreadcrumbEntity>,
    #[serde(default)]
    pub flow: Option<FlowDto>,
}

/// Breadcrumb wrapper; NiFi nests the actual breadcrumb one level down.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FlowBreadcrumbEntity {
    #[serde(default)]
    pub breadcrumb: Option<FlowBreadcrumbDto>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FlowBreadcrumbDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// The listing of components directly inside a process group. Only the
/// nested child groups matter here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FlowDto {
    #[serde(rename = "processGroups", default)]
    pub process_groups: Vec<ProcessGroupEntity>,
}

/// A child process group as it appears in a flow listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessGroupEntity {
    pub id: String,
}

impl ProcessGroupFlowEntity {
    /// The group's display name from the breadcrumb, if present.
    pub fn group_name(&self) -> Option<&str> {
        self.process_group_flow
            .as_ref()?
            .breadcrumb
            .as_ref()?
            .breadcrumb
            .as_ref()?
            .name
            .as_deref()
    }

    /// Ids of the immediate child process groups, in remote iteration order.
    pub fn child_group_ids(&self) -> Vec<String> {
        self.process_group_flow
            .as_ref()
            .and_then(|pgf| pgf.flow.as_ref())
            .map(|flow| flow.process_groups.iter().map(|pg| pg.id.clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flow_response() {
        let raw = serde_json::json!({
            "processGroupFlow": {
                "id": "root",
                "breadcrumb": { "breadcrumb": { "id": "root", "name": "NiFi Flow" } },
                "flow": {
                    "processGroups": [
                        { "id": "pg-1", "status": { "name": "ignored" } },
                        { "id": "pg-2" }
                    ],
                    "processors": []
                }
            }
        });

        let entity: ProcessGroupFlowEntity = serde_json::from_value(raw).unwrap();
        assert_eq!(entity.group_name(), Some("NiFi Flow"));
        assert_eq!(entity.child_group_ids(), vec!["pg-1", "pg-2"]);
    }

    #[test]
    fn tolerates_missing_flow_sections() {
        let entity: ProcessGroupFlowEntity =
            serde_json::from_value(serde_json::json!({ "processGroupFlow": {} })).unwrap();
        assert_eq!(entity.group_name(), None);
        assert!(entity.child_group_ids().is_empty());
    }

    #[test]
    fn processor_entity_round_trips_revision() {
        let raw = serde_json::json!({
            "revision": { "version": 4, "clientId": "abc" },
            "component": { "id": "p-1", "name": "FetchFile", "type": "org.apache.nifi.FetchFile" }
        });
        let entity: ProcessorEntity = serde_json::from_value(raw).unwrap();
        assert_eq!(entity.revision.as_ref().and_then(|r| r.version), Some(4));
        assert_eq!(entity.component.as_ref().map(|c| c.id.as_str()), Some("p-1"));
    }
}
