//! Processor-level operations against the NiFi REST API: fetch-by-id and
//! revision-guarded update.

use std::sync::Arc;

use tracing::debug;

use crate::client::NiFiRestClient;
use crate::error::{NiFiComponentKind, NiFiError, Result};
use crate::types::{ProcessorDto, ProcessorEntity};

/// Base path for processor requests
const BASE_PATH: &str = "/processors/";

/// Typed accessor for NiFi processors, generic over the REST transport.
pub struct ProcessorsRestClient<C> {
    client: Arc<C>,
    base_path: String,
}

impl<C: NiFiRestClient> ProcessorsRestClient<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self::with_base_path(client, BASE_PATH)
    }

    /// Accessor with a non-default component path segment, for NiFi
    /// deployments or component kinds addressed under a different prefix.
    pub fn with_base_path(client: Arc<C>, base_path: impl Into<String>) -> Self {
        Self {
            client,
            base_path: base_path.into(),
        }
    }

    /// Fetch a processor's component payload by id.
    ///
    /// The process-group id is accepted for interface symmetry with the rest
    /// of the NiFi API surface; processors are addressable by their own id.
    pub async fn find_by_id(
        &self,
        _process_group_id: &str,
        processor_id: &str,
    ) -> Result<Option<ProcessorDto>> {
        Ok(self
            .find_entity_by_id(processor_id)
            .await?
            .and_then(|entity| entity.component))
    }

    /// Update a processor under optimistic concurrency control.
    ///
    /// Re-reads the current entity, pairs the caller's component with the
    /// revision stamp from that fresh read (never a cached one), and PUTs the
    /// result. NiFi answers 404 both when the processor is missing and when
    /// the revision moved between our read and our write; either way this
    /// fails with [`NiFiError::ComponentNotFound`] and the caller is expected
    /// to re-fetch and retry. No write is attempted when the initial read
    /// already comes back empty.
    pub async fn update(&self, processor: ProcessorDto) -> Result<ProcessorDto> {
        let id = processor.id.clone();

        let current = self
            .find_entity_by_id(&id)
            .await?
            .ok_or_else(|| NiFiError::component_not_found(&id, NiFiComponentKind::Processor))?;

        let entity = ProcessorEntity {
            revision: current.revision,
            component: Some(processor),
        };
        debug!(processor_id = %id, revision = ?entity.revision, "updating processor");

        let updated = self
            .client
            .put(&format!("{}{}", self.base_path, id), serde_json::to_value(&entity)?)
            .await?;

        updated
            .map(serde_json::from_value::<ProcessorEntity>)
            .transpose()?
            .and_then(|entity| entity.component)
            .ok_or_else(|| NiFiError::component_not_found(&id, NiFiComponentKind::Processor))
    }

    /// Gets a processor entity (component + revision), `None` on 404.
    async fn find_entity_by_id(&self, id: &str) -> Result<Option<ProcessorEntity>> {
        match self.client.get(&format!("{}{}", self.base_path, id)).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}
