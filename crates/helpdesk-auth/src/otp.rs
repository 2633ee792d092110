//! One-time code verification.

use std::sync::Arc;

use tracing::debug;

use helpdesk_core::traits::Clock;
use helpdesk_entity::auth::OtpCode;

/// Checks submitted one-time codes against the injected clock.
#[derive(Clone)]
pub struct OtpVerifier {
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for OtpVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpVerifier").finish_non_exhaustive()
    }
}

impl OtpVerifier {
    /// Creates a verifier reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Whether `otp` is still within its validity window.
    pub fn is_valid(&self, otp: &OtpCode) -> bool {
        let valid = otp.is_valid(self.clock.now());
        if !valid {
            debug!(user_id = %otp.user_id, "One-time code expired");
        }
        valid
    }
}
