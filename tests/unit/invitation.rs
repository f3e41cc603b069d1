use teamboard_backend::error::AppError;
use teamboard_backend::utils::{generate_invitation_token, hash_token};
use teamboard_backend::validation::invitation::normalize_invite_email;

#[test]
fn validate_invite_email_rules() {
    assert_eq!(
        normalize_invite_email("  Bob@Example.COM ").unwrap(),
        "bob@example.com"
    );
    assert!(normalize_invite_email("").is_err());
    assert!(normalize_invite_email("no-at.com").is_err());
    assert!(normalize_invite_email("bob@localhost").is_err());
    assert!(matches!(
        normalize_invite_email("@x.com"),
        Err(AppError::Validation { .. })
    ));
}

#[test]
fn stored_hash_never_equals_raw_token() {
    let token = generate_invitation_token();
    let digest = hash_token(&token);
    assert_ne!(digest, token);
    assert_eq!(digest.len(), 64);
    assert_eq!(digest, hash_token(&token));
}
