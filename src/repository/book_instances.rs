//! Book instances (copies) repository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{BookInstance, LoanStatus},
        pagination::PageRequest,
    },
};

use super::BookCopyStore;

const INSTANCE_SELECT: &str = r#"
    SELECT bi.id, bi.book_id, bi.imprint, bi.due_back, bi.borrower_id, bi.status,
           b.title AS book_title
    FROM book_instances bi
    LEFT JOIN books b ON b.id = bi.book_id
"#;

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let query = format!("{} WHERE bi.id = $1", INSTANCE_SELECT);
        let copy = sqlx::query_as::<_, BookInstance>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(copy)
    }

    /// Set the due-back date only, leaving status and borrower to concurrent returns
    pub async fn update_due_back(&self, id: Uuid, due_back: Option<NaiveDate>) -> AppResult<()> {
        let result = sqlx::query("UPDATE book_instances SET due_back = $2 WHERE id = $1")
            .bind(id)
            .bind(due_back)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book copy {} not found", id)));
        }
        Ok(())
    }

    /// Copies of a book, by due-back date
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let query = format!(
            "{} WHERE bi.book_id = $1 ORDER BY bi.due_back NULLS LAST, bi.id",
            INSTANCE_SELECT
        );
        let copies = sqlx::query_as::<_, BookInstance>(&query)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(copies)
    }

    /// One page of copies on loan, soonest due first. Restricted to a
    /// borrower when `borrower_id` is set.
    pub async fn list_on_loan(
        &self,
        borrower_id: Option<i32>,
        page: PageRequest,
    ) -> AppResult<Vec<BookInstance>> {
        let query = format!(
            r#"{}
            WHERE bi.status = $1 AND ($2::INTEGER IS NULL OR bi.borrower_id = $2)
            ORDER BY bi.due_back NULLS LAST, bi.id
            LIMIT $3 OFFSET $4"#,
            INSTANCE_SELECT
        );
        let copies = sqlx::query_as::<_, BookInstance>(&query)
            .bind(LoanStatus::OnLoan)
            .bind(borrower_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(copies)
    }

    pub async fn count_on_loan(&self, borrower_id: Option<i32>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM book_instances
            WHERE status = $1 AND ($2::INTEGER IS NULL OR borrower_id = $2)
            "#,
        )
        .bind(LoanStatus::OnLoan)
        .bind(borrower_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl BookCopyStore for BookInstancesRepository {
    async fn get_book_copy(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        self.find_by_id(id).await
    }

    async fn save_book_copy(&self, copy: &BookInstance) -> AppResult<()> {
        self.update_due_back(copy.id, copy.due_back).await
    }
}
