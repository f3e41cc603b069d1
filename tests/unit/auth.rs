use axum::extract::FromRequestParts;
use axum::http::Request;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::sync::Arc;
use teamboard_backend::AppState;
use teamboard_backend::config::Config;
use teamboard_backend::error::AppError;
use teamboard_backend::live::LivePublisher;
use teamboard_backend::middleware::auth::{Identity, MaybeUser};

const TEST_JWT_SECRET: &str = "integration-test-secret";

fn test_state() -> Arc<AppState> {
    let config: Config = envy::from_iter(vec![
        (
            "DATABASE_URL".to_string(),
            "postgres://localhost/unused".to_string(),
        ),
        ("JWT_SECRET".to_string(), TEST_JWT_SECRET.to_string()),
    ])
    .unwrap();
    // never connects; these tests stop before touching the database
    let pool = Pool::builder()
        .build_unchecked(ConnectionManager::<PgConnection>::new(&config.database_url));
    Arc::new(AppState::new(pool, LivePublisher::disabled(), config))
}

fn create_test_jwt(secret: &str, exp_offset: i64) -> String {
    let exp = (chrono::Utc::now().timestamp() + exp_offset) as u64;
    let claims = serde_json::json!({
        "sub": "auth0|carol",
        "email": "Carol@Example.com",
        "name": "Carol",
        "exp": exp,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn parts(authorization: Option<&str>) -> axum::http::request::Parts {
    let mut builder = Request::builder().uri("/users/me");
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    builder.body(()).unwrap().into_parts().0
}

#[test]
fn identity_requires_bearer_header() {
    let state = test_state();
    let result = tokio_test::block_on(Identity::from_request_parts(&mut parts(None), &state));
    assert!(matches!(result, Err(AppError::Unauthenticated)));
}

#[test]
fn identity_yields_verified_claims() {
    let state = test_state();
    let header = format!("Bearer {}", create_test_jwt(TEST_JWT_SECRET, 3600));
    let Identity(claims) =
        tokio_test::block_on(Identity::from_request_parts(&mut parts(Some(&header)), &state))
            .unwrap();
    assert_eq!(claims.sub, "auth0|carol");
    assert_eq!(claims.name.as_deref(), Some("Carol"));
}

#[test]
fn anonymous_reader_resolves_to_none() {
    let state = test_state();

    let MaybeUser(user) =
        tokio_test::block_on(MaybeUser::from_request_parts(&mut parts(None), &state)).unwrap();
    assert!(user.is_none());
}

#[test]
fn unusable_token_on_read_path_is_anonymous() {
    let state = test_state();

    let forged = format!("Bearer {}", create_test_jwt("someone-else", 3600));
    let MaybeUser(user) =
        tokio_test::block_on(MaybeUser::from_request_parts(&mut parts(Some(&forged)), &state))
            .unwrap();
    assert!(user.is_none());

    let expired = format!("Bearer {}", create_test_jwt(TEST_JWT_SECRET, -3600));
    let MaybeUser(user) =
        tokio_test::block_on(MaybeUser::from_request_parts(&mut parts(Some(&expired)), &state))
            .unwrap();
    assert!(user.is_none());

    let MaybeUser(user) = tokio_test::block_on(MaybeUser::from_request_parts(
        &mut parts(Some("Basic dXNlcjpwYXNz")),
        &state,
    ))
    .unwrap();
    assert!(user.is_none());
}

#[test]
fn forged_token_is_still_rejected_by_identity() {
    let state = test_state();
    let forged = format!("Bearer {}", create_test_jwt("someone-else", 3600));
    let result =
        tokio_test::block_on(Identity::from_request_parts(&mut parts(Some(&forged)), &state));
    assert!(matches!(result, Err(AppError::Jwt(_))));
}
