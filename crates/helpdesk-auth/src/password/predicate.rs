//! Stored-credential predicates.

use tracing::warn;

use helpdesk_entity::user::User;

use super::hasher::PasswordHasher;

/// Compares `candidate` with the user's stored credential byte for byte.
///
/// Returns `false` when no credential is stored, whatever the candidate.
pub fn check_password(user: &User, candidate: &str) -> bool {
    match user.password.as_deref() {
        Some(stored) => stored.as_bytes() == candidate.as_bytes(),
        None => false,
    }
}

/// Verifies `candidate` against the user's stored credential.
///
/// Argon2 PHC strings are verified with [`PasswordHasher`]. Any other stored
/// value is treated as a legacy credential and compared with
/// [`check_password`]; a warning is logged so the account can be rehashed.
pub fn verify_credential(user: &User, candidate: &str) -> bool {
    let Some(stored) = user.password.as_deref() else {
        return false;
    };

    if !PasswordHasher::is_hashed(stored) {
        warn!(user_id = %user.id, "User has a legacy unhashed credential");
        return check_password(user, candidate);
    }

    match PasswordHasher::new().verify_password(candidate, stored) {
        Ok(matched) => matched,
        Err(e) => {
            warn!(user_id = %user.id, error = %e, "Credential verification failed");
            false
        }
    }
}
