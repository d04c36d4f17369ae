//! Field-level validation for entity records
//! Ensures data integrity before entities reach the core structures

use anyhow::{anyhow, Result};
use chrono::Utc;

use crate::constants::{
    earliest_release_date, MAX_DESCRIPTION_LENGTH, MAX_EMAIL_LENGTH, MAX_LOGIN_LENGTH,
};
use crate::types::{Film, User};

/// Validate a user's email
pub fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(anyhow!("email cannot be empty"));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(anyhow!(
            "email too long: {} chars (max: {})",
            email.len(),
            MAX_EMAIL_LENGTH
        ));
    }

    // Cheap structural check; full RFC parsing belongs to the web layer
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(anyhow!("email must contain a local part and a domain"));
    }

    Ok(())
}

/// Validate a user's login handle
pub fn validate_login(login: &str) -> Result<()> {
    if login.is_empty() {
        return Err(anyhow!("login cannot be empty"));
    }

    if login.len() > MAX_LOGIN_LENGTH {
        return Err(anyhow!(
            "login too long: {} chars (max: {})",
            login.len(),
            MAX_LOGIN_LENGTH
        ));
    }

    if login.chars().any(char::is_whitespace) {
        return Err(anyhow!("login cannot contain whitespace"));
    }

    Ok(())
}

/// Validate all user fields and apply defaults
///
/// A blank display name falls back to the login, so every stored user has
/// something presentable to render.
pub fn validate_user(user: &mut User) -> Result<()> {
    validate_email(&user.email)?;
    validate_login(&user.login)?;

    if let Some(birthday) = user.birthday {
        if birthday > Utc::now().date_naive() {
            return Err(anyhow!("birthday cannot be in the future"));
        }
    }

    if user.name.trim().is_empty() {
        user.name = user.login.clone();
    }

    Ok(())
}

/// Validate all film fields
pub fn validate_film(film: &Film) -> Result<()> {
    if film.name.trim().is_empty() {
        return Err(anyhow!("film name cannot be empty"));
    }

    if film.description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(anyhow!(
            "description too long: {} chars (max: {})",
            film.description.len(),
            MAX_DESCRIPTION_LENGTH
        ));
    }

    if let Some(release_date) = film.release_date {
        if release_date < earliest_release_date() {
            return Err(anyhow!(
                "release date {} predates the first film screening ({})",
                release_date,
                earliest_release_date()
            ));
        }
    }

    if film.duration_minutes == Some(0) {
        return Err(anyhow!("duration must be positive"));
    }

    Ok(())
}
