use std::sync::Arc;
use crate::domain::{
    models::{auth::{Claims, VerifiedToken}, session::UserSession},
    ports::SessionRepository,
};
use crate::error::AppError;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error, info};

/// Issues HS256 bearer tokens bound to a server-side session record.
pub struct AuthService {
    sessions: Arc<dyn SessionRepository>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(sessions: Arc<dyn SessionRepository>, secret: &str, token_ttl: Duration) -> Self {
        Self {
            sessions,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl,
        }
    }

    pub async fn issue(&self, user_id: &str) -> Result<String, AppError> {
        let session = self.sessions.create(&UserSession::new(user_id.to_string())).await?;

        let issued_at = session.created_at;
        let claims = Claims {
            sub: user_id.to_string(),
            sid: session.session_id.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.token_ttl).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;

        debug!(session_id = %session.session_id, "Issued token for user {}", user_id);
        Ok(token)
    }

    /// Every failure maps to the same `Invalid token` rejection; the cause is only logged.
    pub async fn verify(&self, token: &str) -> Result<VerifiedToken, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                AppError::invalid_token()
            })?
            .claims;

        let session = self.sessions.find_by_id(&claims.sid).await?
            .ok_or_else(|| {
                debug!("Token rejected: session {} not found", claims.sid);
                AppError::invalid_token()
            })?;

        if !session.is_active || session.user_id != claims.sub {
            debug!("Token rejected: session {} inactive or mismatched", claims.sid);
            return Err(AppError::invalid_token());
        }

        self.sessions.touch(&session.session_id, Utc::now()).await?;

        Ok(VerifiedToken {
            user_id: claims.sub,
            session_id: claims.sid,
        })
    }

    pub async fn revoke(&self, session_id: &str) -> Result<bool, AppError> {
        let revoked = self.sessions.deactivate(session_id).await?;
        if revoked {
            info!("Session revoked: {}", session_id);
        }
        Ok(revoked)
    }

    /// Drops sessions whose token has certainly expired.
    pub async fn sweep_expired_sessions(&self) -> Result<u64, AppError> {
        let cutoff = Utc::now() - self.token_ttl;
        self.sessions.purge_issued_before(cutoff).await
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalWithMsg(format!("Password hashing failed: {}", e)))
}

/// Social accounts carry an empty hash and never match.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    if password_hash.is_empty() {
        return false;
    }
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(e) => {
            error!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::{memory_session_repo::MemorySessionRepo, memory_store::MemoryStore};

    fn service(ttl: Duration) -> (AuthService, Arc<MemorySessionRepo>) {
        let repo = Arc::new(MemorySessionRepo::new(MemoryStore::new()));
        (AuthService::new(repo.clone(), "unit-test-secret", ttl), repo)
    }

    #[tokio::test]
    async fn issued_token_verifies_and_touches_session() {
        let (auth, repo) = service(Duration::hours(24));
        let token = auth.issue("user-1").await.unwrap();

        let verified = auth.verify(&token).await.unwrap();
        assert_eq!(verified.user_id, "user-1");

        let session = repo.find_by_id(&verified.session_id).await.unwrap().unwrap();
        assert!(session.is_active);
        assert!(session.last_activity >= session.created_at);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let (auth, _) = service(Duration::minutes(-5));
        let token = auth.issue("user-1").await.unwrap();

        let err = auth.verify(&token).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(ref msg) if msg == "Invalid token"));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let (auth, repo) = service(Duration::hours(1));
        let forger = AuthService::new(repo, "someone-elses-secret", Duration::hours(1));
        let forged = forger.issue("admin-user-123").await.unwrap();

        assert!(auth.verify(&forged).await.is_err());
        assert!(auth.verify("not-a-token").await.is_err());
    }

    #[tokio::test]
    async fn revoked_session_no_longer_verifies() {
        let (auth, _) = service(Duration::hours(1));
        let token = auth.issue("user-1").await.unwrap();
        let verified = auth.verify(&token).await.unwrap();

        assert!(auth.revoke(&verified.session_id).await.unwrap());
        assert!(!auth.revoke(&verified.session_id).await.unwrap());
        assert!(auth.verify(&token).await.is_err());
    }

    #[tokio::test]
    async fn sweep_removes_only_expired_sessions() {
        let (auth, repo) = service(Duration::hours(1));
        let mut stale = UserSession::new("old-user".into());
        stale.created_at = Utc::now() - Duration::hours(2);
        repo.create(&stale).await.unwrap();

        let mut logged_out = UserSession::new("gone-user".into());
        logged_out.created_at = Utc::now() - Duration::hours(3);
        logged_out.is_active = false;
        repo.create(&logged_out).await.unwrap();

        let token = auth.issue("fresh-user").await.unwrap();

        assert_eq!(auth.sweep_expired_sessions().await.unwrap(), 2);
        assert!(repo.find_by_id(&stale.session_id).await.unwrap().is_none());
        assert!(repo.find_by_id(&logged_out.session_id).await.unwrap().is_none());
        assert_eq!(repo.count_active().await.unwrap(), 1);
        assert!(auth.verify(&token).await.is_ok());
    }

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &hash));
        assert!(!verify_password("other2", &hash));
        assert!(!verify_password("anything", ""));
    }
}
