//! Email thread, message, and attachment entities.

pub mod attachment;
pub mod message;
pub mod thread;

pub use attachment::EmailAttachment;
pub use message::Email;
pub use thread::{EmailThread, ThreadBundle};
