//! Shared value types used across the helpdesk crates.

pub mod id;

pub use id::*;
