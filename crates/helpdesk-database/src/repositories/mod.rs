//! PostgreSQL repositories for the helpdesk entities.

pub mod archive;
pub mod customer;
pub mod email;
pub mod inbox;
pub mod ticket;
pub mod user;

pub use archive::ArchiveRepository;
pub use customer::CustomerRepository;
pub use email::EmailRepository;
pub use inbox::InboxRepository;
pub use ticket::TicketRepository;
pub use user::UserRepository;
