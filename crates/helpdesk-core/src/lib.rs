//! # helpdesk-core
//!
//! Core crate for the helpdesk. Contains the configuration schema,
//! typed identifiers, the clock abstraction, and the unified error system.
//!
//! This crate has **no** internal dependencies on other helpdesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
