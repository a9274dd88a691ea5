//! Authentication and capability checks

use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use chrono::{Duration, Utc};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{Capability, UserClaims},
    repository::{users::UsersRepository, CapabilityChecker},
};

/// Whether `user_id` holds `capability`. A failing check counts as a denial.
pub async fn is_granted(checker: &dyn CapabilityChecker, user_id: i32, capability: Capability) -> bool {
    match checker.has_capability(user_id, capability).await {
        Ok(granted) => granted,
        Err(e) => {
            tracing::warn!(
                user_id,
                capability = %capability,
                "Capability check failed, denying: {}",
                e
            );
            false
        }
    }
}

/// Check a plaintext password against an argon2 PHC string
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[derive(Clone)]
pub struct AuthService {
    users: UsersRepository,
    permissions: Arc<dyn CapabilityChecker>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(users: UsersRepository, permissions: Arc<dyn CapabilityChecker>, config: AuthConfig) -> Self {
        Self {
            users,
            permissions,
            config,
        }
    }

    /// Verify credentials and issue a bearer token
    pub async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        let user = self
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            tracing::info!(username, "Rejected login");
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let now = Utc::now();
        let claims = UserClaims {
            sub: user.username,
            user_id: user.id,
            exp: (now + Duration::hours(self.config.jwt_expiration_hours as i64)).timestamp(),
            iat: now.timestamp(),
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Fail with `Authorization` unless the user holds `capability`
    pub async fn require(&self, user_id: i32, capability: Capability) -> AppResult<()> {
        if is_granted(self.permissions.as_ref(), user_id, capability).await {
            Ok(())
        } else {
            Err(AppError::Authorization(format!("Capability {} required", capability)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCapabilityChecker;
    use argon2::password_hash::{PasswordHasher, SaltString};

    #[test]
    fn test_verify_password() {
        let salt = SaltString::from_b64("c29tZXNhbHQ").unwrap();
        let hash = Argon2::default()
            .hash_password(b"hunter2", &salt)
            .unwrap()
            .to_string();

        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
        assert!(verify_password("hunter2", "not a hash").is_err());
    }

    #[tokio::test]
    async fn test_is_granted() {
        let mut checker = MockCapabilityChecker::new();
        checker
            .expect_has_capability()
            .returning(|user_id, capability| match user_id {
                1 => Ok(capability == Capability::EditCatalog),
                _ => Err(AppError::Internal("unreachable permission store".to_string())),
            });

        assert!(is_granted(&checker, 1, Capability::EditCatalog).await);
        assert!(!is_granted(&checker, 1, Capability::MarkReturned).await);
        assert!(!is_granted(&checker, 2, Capability::EditCatalog).await);
    }
}
