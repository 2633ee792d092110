//! Password hashing and stored-credential checks.

pub mod hasher;
pub mod predicate;

pub use hasher::PasswordHasher;
pub use predicate::{check_password, verify_credential};
