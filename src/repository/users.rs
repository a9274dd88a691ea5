//! Users and permissions repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::user::{Capability, User},
};

use super::CapabilityChecker;

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn has_permission(&self, user_id: i32, codename: &str) -> AppResult<bool> {
        let granted: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM user_permissions WHERE user_id = $1 AND codename = $2)",
        )
        .bind(user_id)
        .bind(codename)
        .fetch_one(&self.pool)
        .await?;
        Ok(granted)
    }
}

#[async_trait]
impl CapabilityChecker for UsersRepository {
    async fn has_capability(&self, user_id: i32, capability: Capability) -> AppResult<bool> {
        self.has_permission(user_id, capability.codename()).await
    }
}
