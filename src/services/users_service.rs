use diesel::prelude::*;

use crate::{
    db::models::user::{NewUser, User},
    db::repositories::UsersRepo,
    error::{AppError, AppResult},
    validation::invitation::normalize_invite_email,
};

/// Profile fields asserted by the identity provider for one subject.
#[derive(Debug, Clone)]
pub struct IdentityProfile {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

pub struct UsersService;

impl UsersService {
    /// Upserts the local mirror of the caller's identity.
    pub fn sync(conn: &mut PgConnection, profile: &IdentityProfile) -> AppResult<User> {
        let new_user = Self::to_new_user(profile)?;
        let user = UsersRepo::upsert_by_subject(conn, &new_user)?;
        tracing::debug!(user_id = %user.id, "Identity synced");
        Ok(user)
    }

    fn to_new_user(profile: &IdentityProfile) -> AppResult<NewUser> {
        let email = profile
            .email
            .as_deref()
            .ok_or_else(|| AppError::validation("Identity token carries no email"))?;
        let email = normalize_invite_email(email)?;

        let name = profile
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

        Ok(NewUser {
            subject: profile.subject.clone(),
            email,
            name,
            avatar_url: profile.avatar_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(email: Option<&str>, name: Option<&str>) -> IdentityProfile {
        IdentityProfile {
            subject: "auth0|abc".to_string(),
            email: email.map(str::to_string),
            name: name.map(str::to_string),
            avatar_url: None,
        }
    }

    #[test]
    fn name_falls_back_to_email_local_part() {
        let user = UsersService::to_new_user(&profile(Some(" Bob@X.com "), Some("  "))).unwrap();
        assert_eq!(user.email, "bob@x.com");
        assert_eq!(user.name, "bob");
    }

    #[test]
    fn email_is_required() {
        assert!(matches!(
            UsersService::to_new_user(&profile(None, Some("Bob"))),
            Err(AppError::Validation { .. })
        ));
    }
}
