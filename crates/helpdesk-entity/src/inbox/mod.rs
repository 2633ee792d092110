//! Shared mailbox entities, their providers and members, and the
//! per-mailbox status workflow.

pub mod group;
pub mod member;
pub mod provider;
pub mod status;

pub use group::SharedInboxGroup;
pub use member::SigUserAllocation;
pub use provider::{MailProvider, MailProviderCredential};
pub use status::{StatusWorkflow, TicketStatus, TicketStatusAllocation};
