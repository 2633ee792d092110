//! Customer and priority entities.

pub mod model;
pub mod priority;

pub use model::Customer;
pub use priority::{PriorityLevel, PriorityLevelRule};
