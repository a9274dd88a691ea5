//! Redis-backed session data

use redis::{AsyncCommands, Client};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

fn visits_key(session_id: &Uuid) -> String {
    format!("session:{}:visits", session_id)
}

#[derive(Clone)]
pub struct RedisService {
    client: Client,
    session_ttl_seconds: u64,
}

impl RedisService {
    /// Create a new Redis service and check the server answers
    pub async fn new(url: &str, session_ttl_seconds: u64) -> AppResult<Self> {
        let service = Self::open(url, session_ttl_seconds)?;
        service.ping().await?;
        Ok(service)
    }

    /// Create the client without connecting
    pub fn open(url: &str, session_ttl_seconds: u64) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Session(format!("Failed to create Redis client: {}", e)))?;

        Ok(Self {
            client,
            session_ttl_seconds,
        })
    }

    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.get_connection().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Session(format!("Redis connection test failed: {}", e)))?;
        Ok(())
    }

    /// Count a visit for the session and return how many visits it had before this one
    pub async fn record_visit(&self, session_id: &Uuid) -> AppResult<i64> {
        let mut conn = self.get_connection().await?;

        let key = visits_key(session_id);
        let visits: i64 = conn
            .incr(&key, 1)
            .await
            .map_err(|e| AppError::Session(format!("Failed to count visit in Redis: {}", e)))?;
        conn.expire::<_, ()>(&key, self.session_ttl_seconds as i64)
            .await
            .map_err(|e| AppError::Session(format!("Failed to refresh session in Redis: {}", e)))?;

        Ok(visits - 1)
    }

    /// Get a Redis connection
    pub async fn get_connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Session(format!("Failed to get Redis connection: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visits_key() {
        assert_eq!(
            visits_key(&Uuid::nil()),
            "session:00000000-0000-0000-0000-000000000000:visits"
        );
    }
}
