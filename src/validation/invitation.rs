use crate::error::AppError;

const MAX_EMAIL_LEN: usize = 255;

/// Trims and lowercases an invitee address; rejects obviously malformed input.
pub fn normalize_invite_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(AppError::validation("Email is too long"));
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AppError::validation("Invalid email format"));
    };
    if local.is_empty()
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(email)
}
