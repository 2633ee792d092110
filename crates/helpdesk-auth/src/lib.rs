//! # helpdesk-auth
//!
//! Credential checks used by the external login flow.
//!
//! ## Modules
//!
//! - `password`: stored-credential predicates and Argon2id hashing
//! - `otp`: one-time code verification against an injected clock

pub mod otp;
pub mod password;

pub use otp::OtpVerifier;
pub use password::{PasswordHasher, check_password, verify_credential};
