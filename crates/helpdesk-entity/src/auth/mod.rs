//! Session token and one-time code entities.

pub mod otp;
pub mod token;

pub use otp::OtpCode;
pub use token::AuthToken;
