//! Ticket domain entities.

pub mod model;
pub mod row;
pub mod state;

pub use model::{CreateTicket, Ticket};
pub use row::TicketRow;
pub use state::{TicketState, TicketStateKind};
