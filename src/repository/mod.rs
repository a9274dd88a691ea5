//! Repository layer for database operations

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod users;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{book_instance::BookInstance, user::Capability},
};

/// Fetch and store book copies. Saving persists the renewal state of a
/// copy (its due-back date); status and borrower are owned by other workflows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookCopyStore: Send + Sync {
    async fn get_book_copy(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn save_book_copy(&self, copy: &BookInstance) -> AppResult<()>;
}

/// Answers whether a user holds a capability
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CapabilityChecker: Send + Sync {
    async fn has_capability(&self, user_id: i32, capability: Capability) -> AppResult<bool>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub book_instances: book_instances::BookInstancesRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            book_instances: book_instances::BookInstancesRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
