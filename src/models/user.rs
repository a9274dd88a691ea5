//! User model, capabilities and JWT claims

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Named permission grant checked before a privileged action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Manage loans: list every borrowed copy, renew due dates
    MarkReturned,
    /// Create, update and delete catalog records
    EditCatalog,
}

impl Capability {
    /// Codename stored in the `user_permissions` table
    pub fn codename(&self) -> &'static str {
        match self {
            Capability::MarkReturned => "catalog.can_mark_returned",
            Capability::EditCatalog => "catalog.can_edit_catalog",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::MarkReturned => "mark-returned",
            Capability::EditCatalog => "edit-catalog",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User account from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Hashed password (argon2)
    pub password_hash: String,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}
