//! Process-group inspection: the single-group inspector and the
//! level-synchronized crawler that assembles a full hierarchy snapshot.

pub mod crawler;
pub mod inspector;

pub use crawler::{FlowCrawler, InspectionTree};
pub use inspector::{FlowInspection, FlowInspector, InspectionStatus};
