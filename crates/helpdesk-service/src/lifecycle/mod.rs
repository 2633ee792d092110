//! Ticket lifecycle transitions and archival.

pub mod manager;
pub mod snapshot;

pub use manager::{ArchiveSweepSummary, LifecycleManager, OpenTicketRequest};
