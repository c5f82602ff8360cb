//! In-memory cache refresher for a NiFi flow hierarchy.
//!
//! This crate provides:
//! - A typed REST boundary ([`client::NiFiRestClient`]) with a reqwest-backed
//!   production implementation
//! - Processor operations with revision-guarded updates
//!   ([`processors::ProcessorsRestClient`])
//! - A concurrent, level-synchronized crawl of the process-group hierarchy
//!   ([`inspect::FlowCrawler`]) producing an [`inspect::InspectionTree`]
//!
//! A crawl always returns a tree, even when branches fail: node-level
//! failures are recorded in place and their subtrees pruned. Processor
//! updates never reuse a cached revision stamp; each update re-reads the
//! component and writes with the stamp from that read.

pub mod client;
pub mod config;
pub mod error;
pub mod inspect;
pub mod processors;
pub mod types;

pub use client::{HttpNiFiClient, NiFiRestClient};
pub use config::NiFiConfig;
pub use error::{NiFiComponentKind, NiFiError, Result};
pub use inspect::{FlowCrawler, FlowInspection, FlowInspector, InspectionStatus, InspectionTree};
pub use processors::ProcessorsRestClient;
pub use types::{ProcessorDto, ProcessorEntity, RevisionDto};
