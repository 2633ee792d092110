//! # helpdesk-database
//!
//! The [`TicketStore`] storage interface consumed by the lifecycle manager,
//! its PostgreSQL implementation built on per-entity repositories, an
//! in-memory implementation for single-node use and tests, connection
//! management, and migrations.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{ArchiveCommit, MemoryTicketStore, PgTicketStore, TicketStore};
