//! Integration tests for credential predicates.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use helpdesk_auth::{OtpVerifier, PasswordHasher, check_password, verify_credential};
use helpdesk_core::traits::ManualClock;
use helpdesk_core::types::{RoleId, UserId};
use helpdesk_entity::auth::{AuthToken, OtpCode};
use helpdesk_entity::user::User;

fn user(password: Option<String>) -> User {
    User {
        id: UserId(3),
        first_name: "Mina".to_string(),
        last_name: "Sato".to_string(),
        employee_id: 1203,
        role_id: RoleId(2),
        password,
        email: "mina.sato@harbour.gov".to_string(),
        phone_number: "+81 3 0000 0000".to_string(),
        country: "JP".to_string(),
        require_password_reset: false,
    }
}

#[test]
fn test_check_password_contract() {
    let unset = user(None);
    for candidate in ["secret", "Secret", ""] {
        assert!(!check_password(&unset, candidate));
    }

    let set = user(Some("secret".to_string()));
    assert!(check_password(&set, "secret"));
    assert!(!check_password(&set, "Secret"));
}

#[test]
fn test_hashed_and_legacy_credentials() {
    let hasher = PasswordHasher::new();
    let hashed = user(Some(hasher.hash_password("tide-table-42").unwrap()));
    assert!(verify_credential(&hashed, "tide-table-42"));
    assert!(!verify_credential(&hashed, "Tide-table-42"));

    let legacy = user(Some("tide-table-42".to_string()));
    assert!(verify_credential(&legacy, "tide-table-42"));
    assert!(!verify_credential(&user(None), "tide-table-42"));
}

#[test]
fn test_otp_validity_boundaries() {
    let now = Utc.with_ymd_and_hms(2026, 7, 14, 16, 45, 0).unwrap();
    let code = |expires_at| OtpCode {
        id: 1,
        user_id: UserId(3),
        code: "551902".to_string(),
        expires_at,
        created_at: now - Duration::minutes(5),
    };

    assert!(!code(now).is_valid(now));
    assert!(code(now + Duration::seconds(1)).is_valid(now));
    assert!(!code(now - Duration::seconds(1)).is_valid(now));

    let clock = ManualClock::new(now);
    let verifier = OtpVerifier::new(Arc::new(clock.clone()));
    let otp = code(now + Duration::seconds(1));
    assert!(verifier.is_valid(&otp));
    clock.set(now + Duration::seconds(1));
    assert!(!verifier.is_valid(&otp));
}

#[test]
fn test_auth_token_expiry() {
    let now = Utc.with_ymd_and_hms(2026, 7, 14, 16, 45, 0).unwrap();
    let token = AuthToken {
        id: 9,
        user_id: UserId(3),
        token: "b7c1e0".to_string(),
        expires_at: now + Duration::hours(8),
        created_at: now,
    };

    assert!(!token.is_expired(now));
    assert!(token.is_expired(now + Duration::hours(8)));
}
