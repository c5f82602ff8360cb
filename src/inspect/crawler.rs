//! Level-synchronized concurrent crawl of the NiFi process-group hierarchy.
//!
//! The crawler is the sole writer of the tree and the frontier; workers only
//! return inspection values. A child's existence is known only once its
//! parent's inspection completes, so each depth level is fully resolved
//! before the next one is dispatched.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::client::NiFiRestClient;
use crate::config::NiFiConfig;
use crate::inspect::inspector::{FlowInspection, FlowInspector, InspectionStatus};

/// The assembled snapshot of one crawl run: every reached process group,
/// keyed by group id, with parent/child links stored as ids and resolved
/// through the tree.
#[derive(Debug, Clone)]
pub struct InspectionTree {
    root_id: String,
    nodes: HashMap<String, FlowInspection>,
}

impl InspectionTree {
    fn new(root_id: impl Into<String>) -> Self {
        Self {
            root_id: root_id.into(),
            nodes: HashMap::new(),
        }
    }

    fn insert(&mut self, node: FlowInspection) {
        self.nodes.insert(node.group_id.clone(), node);
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn root(&self) -> Option<&FlowInspection> {
        self.nodes.get(&self.root_id)
    }

    pub fn get(&self, group_id: &str) -> Option<&FlowInspection> {
        self.nodes.get(group_id)
    }

    pub fn contains(&self, group_id: &str) -> bool {
        self.nodes.contains_key(group_id)
    }

    /// Resolve a node's parent through the tree.
    pub fn parent_of(&self, group_id: &str) -> Option<&FlowInspection> {
        let parent_id = self.nodes.get(group_id)?.parent_group_id.as_deref()?;
        self.nodes.get(parent_id)
    }

    /// A node's children in the order the remote listed them. Children whose
    /// inspection never ran (pruned under a failed branch) are absent.
    pub fn children_of(&self, group_id: &str) -> Vec<&FlowInspection> {
        self.nodes
            .get(group_id)
            .map(|node| {
                node.child_group_ids
                    .iter()
                    .filter_map(|id| self.nodes.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn nodes_at_depth(&self, depth: usize) -> Vec<&FlowInspection> {
        self.nodes.values().filter(|n| n.depth == depth).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlowInspection> {
        self.nodes.values()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &FlowInspection> {
        self.nodes.values().filter(|n| n.status.is_succeeded())
    }

    pub fn failed(&self) -> impl Iterator<Item = &FlowInspection> {
        self.nodes.values().filter(|n| n.status.is_failed())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.values().map(|n| n.depth).max().unwrap_or(0)
    }
}

/// Drives the breadth-first crawl over a bounded worker pool.
pub struct FlowCrawler<C> {
    client: Arc<C>,
    max_workers: usize,
    inspect_timeout: Duration,
}

impl<C: NiFiRestClient + 'static> FlowCrawler<C> {
    pub fn new(client: Arc<C>, config: &NiFiConfig) -> Self {
        Self {
            client,
            max_workers: config.max_concurrent_inspections.max(1),
            inspect_timeout: config.inspect_timeout,
        }
    }

    /// Crawl the hierarchy rooted at `root_group_id` and return the full
    /// reachable snapshot.
    ///
    /// Never fails as a whole: a node whose inspection errors or times out is
    /// recorded as `Failed` with its subtree pruned, while sibling and
    /// unrelated branches proceed. Each node is inspected at most once per
    /// crawl; a group id reachable through more than one path keeps its first
    /// placement.
    pub async fn crawl(&self, root_group_id: &str) -> InspectionTree {
        let started = Instant::now();
        let limiter = Arc::new(Semaphore::new(self.max_workers));

        let mut tree = InspectionTree::new(root_group_id);
        tree.insert(FlowInspection::pending(root_group_id, 0, None));

        // (group id, depth, parent id) triples awaiting inspection at the
        // current level. Identity and links are fixed here, at enqueue time.
        let mut frontier: Vec<(String, usize, Option<String>)> =
            vec![(root_group_id.to_string(), 0, None)];
        let mut levels = 0usize;

        while !frontier.is_empty() {
            levels += 1;

            let mut handles = Vec::with_capacity(frontier.len());
            for (group_id, depth, parent_id) in frontier.drain(..) {
                let client = Arc::clone(&self.client);
                let limiter = Arc::clone(&limiter);
                let deadline = self.inspect_timeout;
                let task_group_id = group_id.clone();
                let task_parent_id = parent_id.clone();

                let handle = tokio::spawn(async move {
                    let _permit = limiter
                        .acquire_owned()
                        .await
                        .expect("inspection limiter closed");

                    let inspector = FlowInspector::new(
                        task_group_id.clone(),
                        depth,
                        task_parent_id.clone(),
                        client,
                    );
                    match timeout(deadline, inspector.inspect()).await {
                        Ok(inspection) => inspection,
                        Err(_) => {
                            warn!(group_id = %task_group_id, ?deadline, "inspection timed out");
                            let mut node =
                                FlowInspection::pending(task_group_id, depth, task_parent_id);
                            node.elapsed_millis = deadline.as_millis() as u64;
                            node.status = InspectionStatus::Failed(format!(
                                "inspection timed out after {:?}",
                                deadline
                            ));
                            node
                        }
                    }
                });
                handles.push((group_id, depth, parent_id, handle));
            }

            // Barrier: the whole level must be terminal before the next
            // frontier can be computed.
            let results = join_all(handles.into_iter().map(
                |(group_id, depth, parent_id, handle)| async move {
                    match handle.await {
                        Ok(inspection) => inspection,
                        Err(e) => {
                            warn!(group_id = %group_id, error = %e, "inspection task aborted");
                            let mut node = FlowInspection::pending(group_id, depth, parent_id);
                            node.status =
                                InspectionStatus::Failed(format!("inspection task aborted: {}", e));
                            node
                        }
                    }
                },
            ))
            .await;

            for inspection in results {
                if inspection.status.is_succeeded() {
                    for child_id in &inspection.child_group_ids {
                        if tree.contains(child_id) {
                            warn!(
                                group_id = %child_id,
                                parent = %inspection.group_id,
                                "group already present in tree; skipping duplicate"
                            );
                            continue;
                        }
                        tree.insert(FlowInspection::pending(
                            child_id.clone(),
                            inspection.depth + 1,
                            Some(inspection.group_id.clone()),
                        ));
                        frontier.push((
                            child_id.clone(),
                            inspection.depth + 1,
                            Some(inspection.group_id.clone()),
                        ));
                    }
                }
                // Failed nodes are recorded as-is; their subtree is pruned.
                tree.insert(inspection);
            }
        }

        info!(
            root_group_id = %tree.root_id,
            nodes = tree.len(),
            failed = tree.failed().count(),
            levels,
            elapsed_millis = started.elapsed().as_millis() as u64,
            "flow crawl complete"
        );
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, depth: usize, parent: Option<&str>, children: &[&str]) -> FlowInspection {
        let mut n = FlowInspection::pending(id, depth, parent.map(String::from));
        n.child_group_ids = children.iter().map(|c| c.to_string()).collect();
        n.status = InspectionStatus::Succeeded;
        n
    }

    fn sample_tree() -> InspectionTree {
        let mut tree = InspectionTree::new("root");
        tree.insert(node("root", 0, None, &["a", "b"]));
        tree.insert(node("a", 1, Some("root"), &[]));
        tree.insert(node("b", 1, Some("root"), &["c"]));
        tree.insert(node("c", 2, Some("b"), &[]));
        tree
    }

    #[test]
    fn parent_resolution_through_tree() {
        let tree = sample_tree();
        assert_eq!(tree.parent_of("c").map(|n| n.group_id.as_str()), Some("b"));
        assert!(tree.parent_of("root").is_none());
    }

    #[test]
    fn children_keep_remote_order() {
        let tree = sample_tree();
        let kids: Vec<_> = tree
            .children_of("root")
            .into_iter()
            .map(|n| n.group_id.clone())
            .collect();
        assert_eq!(kids, vec!["a", "b"]);
    }

    #[test]
    fn depth_accessors() {
        let tree = sample_tree();
        assert_eq!(tree.nodes_at_depth(1).len(), 2);
        assert_eq!(tree.max_depth(), 2);
        assert_eq!(tree.len(), 4);
        assert!(!tree.is_empty());
    }
}
