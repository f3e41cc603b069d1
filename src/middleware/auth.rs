use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, TypedHeader},
    headers::{Authorization, authorization::Bearer},
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use crate::config::AuthConfig;
use crate::db::models::user::User;
use crate::db::repositories::UsersRepo;
use crate::db::run_blocking;
use crate::error::{AppError, AppResult};
use crate::services::users_service::IdentityProfile;

/// Claims issued by the external identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    pub exp: u64,
    #[serde(default)]
    pub iat: Option<u64>,
}

impl Claims {
    pub fn profile(&self) -> IdentityProfile {
        IdentityProfile {
            subject: self.sub.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            avatar_url: self.picture.clone(),
        }
    }
}

pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        let mut required = vec!["exp"];
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
            required.push("iss");
        }
        match &config.audience {
            Some(audience) => {
                validation.set_audience(&[audience]);
                required.push("aud");
            }
            None => validation.validate_aud = false,
        }
        validation.set_required_spec_claims(&required);

        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}

async fn bearer_claims<S>(parts: &mut Parts, state: &S) -> AppResult<Claims>
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Unauthenticated)?;

    let app_state = Arc::<AppState>::from_ref(state);
    app_state.verifier.verify(bearer.token())
}

async fn resolve_user(state: &AppState, claims: Claims) -> AppResult<Option<User>> {
    let user = run_blocking(&state.db, move |conn| {
        Ok(UsersRepo::find_by_subject(conn, &claims.sub)?)
    })
    .await?;
    Ok(user)
}

/// A verified bearer token; the caller may not have a local user row yet.
pub struct Identity(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state).await?;
        Ok(Identity(claims))
    }
}

/// The synced local user behind a verified bearer token.
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state).await?;
        let app_state = Arc::<AppState>::from_ref(state);
        let user = resolve_user(&app_state, claims)
            .await?
            .ok_or(AppError::Unauthenticated)?;
        Ok(CurrentUser(user))
    }
}

/// Caller on a path that also serves anonymous readers. A missing, malformed,
/// expired or forged token reads as anonymous.
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(MaybeUser(None));
        }
        let claims = match bearer_claims(parts, state).await {
            Ok(claims) => claims,
            Err(AppError::Unauthenticated | AppError::Jwt(_)) => {
                tracing::debug!("Unusable bearer token, treating caller as anonymous");
                return Ok(MaybeUser(None));
            }
            Err(other) => return Err(other),
        };
        let app_state = Arc::<AppState>::from_ref(state);
        let user = resolve_user(&app_state, claims).await?;
        Ok(MaybeUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn config(issuer: Option<&str>) -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            issuer: issuer.map(str::to_string),
            audience: None,
        }
    }

    fn token(secret: &str, iss: Option<&str>, exp_offset: i64) -> String {
        let exp = (chrono::Utc::now().timestamp() + exp_offset) as u64;
        let mut claims = serde_json::json!({
            "sub": "auth0|alice",
            "email": "alice@x.com",
            "name": "Alice",
            "exp": exp,
        });
        if let Some(iss) = iss {
            claims["iss"] = serde_json::Value::String(iss.to_string());
        }
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn accepts_valid_token() {
        let verifier = TokenVerifier::new(&config(None));
        let claims = verifier.verify(&token("test-secret", None, 3600)).unwrap();
        assert_eq!(claims.sub, "auth0|alice");
        assert_eq!(claims.profile().email.as_deref(), Some("alice@x.com"));
        assert!(claims.picture.is_none());
    }

    #[test]
    fn rejects_wrong_secret_and_expired() {
        let verifier = TokenVerifier::new(&config(None));
        assert!(matches!(
            verifier.verify(&token("other-secret", None, 3600)),
            Err(AppError::Jwt(_))
        ));
        assert!(matches!(
            verifier.verify(&token("test-secret", None, -3600)),
            Err(AppError::Jwt(_))
        ));
    }

    #[test]
    fn enforces_issuer_when_configured() {
        let verifier = TokenVerifier::new(&config(Some("https://id.example.com/")));
        assert!(verifier.verify(&token("test-secret", None, 3600)).is_err());
        assert!(
            verifier
                .verify(&token("test-secret", Some("https://id.example.com/"), 3600))
                .is_ok()
        );
    }
}
