//! # helpdesk-service
//!
//! Business logic for the ticket lifecycle. Services receive their
//! dependencies at construction time as `Arc` references: the
//! [`TicketStore`](helpdesk_database::TicketStore) and a
//! [`Clock`](helpdesk_core::traits::Clock).

pub mod context;
pub mod lifecycle;
pub mod priority;

pub use context::RequestContext;
pub use lifecycle::{ArchiveSweepSummary, LifecycleManager, OpenTicketRequest};
pub use priority::PriorityResolver;
