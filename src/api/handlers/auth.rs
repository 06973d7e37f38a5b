use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{SigninRequest, SignupRequest, SocialAuthRequest},
    responses::{AuthResponse, LogoutResponse, UserProfile},
};
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::domain::models::{
    activity::{ACTION_FAILED_LOGIN, ACTION_LOGIN, ACTION_LOGOUT, ACTION_SIGNUP, UNKNOWN_USER},
    auth::SocialProvider,
    user::User,
};
use crate::domain::services::{activity::track, auth_service::{hash_password, verify_password}};
use crate::error::AppError;
use chrono::Utc;
use regex::Regex;
use serde_json::json;
use std::sync::{Arc, LazyLock};
use tracing::info;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

const MIN_PASSWORD_LEN: usize = 6;

fn required_credentials(email: Option<String>, password: Option<String>) -> Result<(String, String), AppError> {
    match (email.filter(|e| !e.is_empty()), password.filter(|p| !p.is_empty())) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(AppError::Validation("Email and password are required".into())),
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (email, password) = required_credentials(payload.email, payload.password)?;

    if !EMAIL_PATTERN.is_match(&email) {
        return Err(AppError::Validation("Invalid email format".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation("Password must be at least 6 characters long".into()));
    }
    if state.user_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User already exists with this email".into()));
    }

    let first_name = payload.first_name.unwrap_or_default();
    let last_name = payload.last_name.unwrap_or_default();
    let user = User::new(email, hash_password(&password)?, first_name, last_name);
    // The repository re-checks email uniqueness for concurrent sign-ups.
    let user = state.user_repo.create(&user).await?;

    track(state.activity_repo.as_ref(), &user.id, ACTION_SIGNUP, json!({
        "method": "email_password",
        "firstName": user.first_name,
        "lastName": user.last_name,
    })).await;

    let token = state.auth_service.issue(&user.id).await?;

    info!("New user registered: {} ({})", user.email, user.id);

    Ok(Json(AuthResponse {
        user: UserProfile::from(&user),
        token,
        message: "Account created successfully! Welcome to EventHub.".to_string(),
    }))
}

pub async fn signin(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<SigninRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (email, password) = required_credentials(payload.email, payload.password)?;

    let Some(user) = state.user_repo.find_by_email(&email).await? else {
        track(state.activity_repo.as_ref(), UNKNOWN_USER, ACTION_FAILED_LOGIN, json!({
            "email": email,
            "reason": "user_not_found",
        })).await;
        return Err(invalid_credentials());
    };

    if !verify_password(&password, &user.password_hash) {
        track(state.activity_repo.as_ref(), &user.id, ACTION_FAILED_LOGIN, json!({
            "email": email,
            "reason": "invalid_password",
        })).await;
        return Err(invalid_credentials());
    }

    let user = state.user_repo.record_login(&user.id, Utc::now()).await?;

    track(state.activity_repo.as_ref(), &user.id, ACTION_LOGIN, json!({
        "method": "email_password",
        "loginCount": user.login_count,
    })).await;

    let token = state.auth_service.issue(&user.id).await?;

    info!("User signed in: {} ({}) - Login #{}", user.email, user.id, user.login_count);

    Ok(Json(AuthResponse {
        message: format!("Welcome back, {}!", user.display_name()),
        user: UserProfile::from(&user),
        token,
    }))
}

/// Simulated OAuth: each provider maps to a fixed profile.
pub async fn social_login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<SocialAuthRequest>,
) -> Result<impl IntoResponse, AppError> {
    let provider: SocialProvider = payload.provider.as_deref()
        .and_then(|p| p.parse().ok())
        .ok_or(AppError::Validation("Valid provider (google, facebook, github) is required".into()))?;

    let profile = provider.profile();
    let method = format!("social_{}", provider.as_str());
    let now = Utc::now();

    let (user, is_new_user) = match state.user_repo.find_by_email(profile.email).await? {
        Some(existing) => {
            let user = state.user_repo.record_login(&existing.id, now).await?;
            track(state.activity_repo.as_ref(), &user.id, ACTION_LOGIN, json!({
                "method": method,
                "loginCount": user.login_count,
            })).await;
            info!("Social user signed in via {}: {} ({}) - Login #{}", provider.as_str(), user.email, user.id, user.login_count);
            (user, false)
        }
        None => {
            let user = state.user_repo.create(&User {
                id: profile.id.to_string(),
                email: profile.email.to_string(),
                password_hash: String::new(),
                first_name: profile.first_name.to_string(),
                last_name: profile.last_name.to_string(),
                is_admin: false,
                created_at: now,
                last_login: Some(now),
                login_count: 1,
                is_email_verified: true,
                auth_provider: provider.as_str().to_string(),
            }).await?;
            track(state.activity_repo.as_ref(), &user.id, ACTION_SIGNUP, json!({
                "method": method,
                "firstName": user.first_name,
                "lastName": user.last_name,
            })).await;
            info!("New social user registered via {}: {} ({})", provider.as_str(), user.email, user.id);
            (user, true)
        }
    };

    let token = state.auth_service.issue(&user.id).await?;

    let message = if is_new_user {
        format!("Welcome to EventHub, {}! Your account has been created via {}.", user.first_name, provider.as_str())
    } else {
        format!("Welcome back, {}!", user.first_name)
    };

    Ok(Json(AuthResponse {
        user: UserProfile::from(&user),
        token,
        message,
    }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    AuthUser { user, session_id }: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    state.auth_service.revoke(&session_id).await?;

    track(state.activity_repo.as_ref(), &user.id, ACTION_LOGOUT, json!({
        "sessionId": session_id,
    })).await;

    info!("User signed out: {} ({})", user.email, user.id);

    Ok(Json(LogoutResponse {
        success: true,
        message: "Signed out successfully",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern_requires_local_part_and_dotted_domain() {
        assert!(EMAIL_PATTERN.is_match("a@x.com"));
        assert!(!EMAIL_PATTERN.is_match("a@x"));
        assert!(!EMAIL_PATTERN.is_match("a b@x.com"));
        assert!(!EMAIL_PATTERN.is_match("@x.com"));
    }

    #[test]
    fn blank_credentials_are_rejected() {
        assert!(required_credentials(Some("a@x.com".into()), Some(String::new())).is_err());
        assert!(required_credentials(None, Some("secret1".into())).is_err());
        assert!(required_credentials(Some("a@x.com".into()), Some("secret1".into())).is_ok());
    }
}
