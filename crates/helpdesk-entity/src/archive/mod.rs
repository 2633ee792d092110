//! Archived snapshots of tickets and their email threads.
//!
//! Snapshots are denormalized copies written once at archival time and
//! never mutated. `original_id` fields are lookup-only references; the live
//! row they name may no longer exist.

pub mod email;
pub mod thread;
pub mod ticket;

pub use email::{ArchivedEmail, ArchivedEmailAttachment};
pub use thread::{ArchivedEmailThread, NewArchivedEmailThread};
pub use ticket::{ArchiveSnapshot, ArchivedTicket, NewArchivedTicket};
