//! Unit tests for JWT functionality.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::Claims;
use crate::jwt::{JwtConfig, JwtError, JwtService};

fn create_test_service() -> JwtService {
    JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        access_token_expires_secs: 900,
    })
}

#[test]
fn test_claims_new_sets_correct_fields() {
    let user_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(1);

    let claims = Claims::new(user_id, expires_at);

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.user_id(), user_id);
    assert!(claims.iat <= Utc::now().timestamp());
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[test]
fn test_generate_and_validate_token() {
    let service = create_test_service();
    let user_id = Uuid::new_v4();

    let token = service.generate_access_token(user_id).unwrap();
    assert!(!token.is_empty());

    let claims = service.validate_token(&token).unwrap();
    assert_eq!(claims.user_id(), user_id);
}

#[test]
fn test_invalid_token() {
    let service = create_test_service();
    let result = service.validate_token("invalid.token.here");
    assert!(matches!(result, Err(JwtError::DecodingError(_))));
}

#[test]
fn test_token_signed_with_other_secret_rejected() {
    let other = JwtService::new(JwtConfig {
        secret: "another-secret".to_string(),
        access_token_expires_secs: 900,
    });
    let token = other.generate_access_token(Uuid::new_v4()).unwrap();

    assert!(create_test_service().validate_token(&token).is_err());
}

#[test]
fn test_expired_token() {
    let service = JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        // Well past the default 60 second leeway.
        access_token_expires_secs: -600,
    });
    let token = service.generate_access_token(Uuid::new_v4()).unwrap();

    assert!(matches!(service.validate_token(&token), Err(JwtError::Expired)));
}

#[test]
fn test_access_token_expires_in() {
    assert_eq!(create_test_service().access_token_expires_in(), 900);
}

#[test]
fn test_sub_minute_lifetime_is_kept() {
    let service = JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        access_token_expires_secs: 90,
    });
    assert_eq!(service.access_token_expires_in(), 90);

    let token = service.generate_access_token(Uuid::new_v4()).unwrap();
    let claims = service.validate_token(&token).unwrap();
    let lifetime = claims.exp - Utc::now().timestamp();
    assert!((85..=90).contains(&lifetime), "lifetime was {lifetime}");
}

#[test]
fn test_out_of_range_lifetime_is_an_error() {
    let service = JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        access_token_expires_secs: i64::MAX,
    });
    assert!(matches!(
        service.generate_access_token(Uuid::new_v4()),
        Err(JwtError::EncodingError(_))
    ));
}
