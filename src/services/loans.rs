//! Borrowed copies listings

use std::sync::Arc;

use crate::{
    clock::Clock,
    error::AppResult,
    models::{
        book_instance::BorrowedCopy,
        pagination::{PageRequest, PaginatedResponse},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    clock: Arc<dyn Clock>,
    page_size: i64,
}

impl LoansService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>, page_size: i64) -> Self {
        Self {
            repository,
            clock,
            page_size,
        }
    }

    /// Copies on loan to a user, soonest due first
    pub async fn borrowed_by(&self, user_id: i32, page: Option<i64>) -> AppResult<PaginatedResponse<BorrowedCopy>> {
        self.on_loan(Some(user_id), page).await
    }

    /// Every copy on loan, soonest due first
    pub async fn all_borrowed(&self, page: Option<i64>) -> AppResult<PaginatedResponse<BorrowedCopy>> {
        self.on_loan(None, page).await
    }

    async fn on_loan(&self, borrower_id: Option<i32>, page: Option<i64>) -> AppResult<PaginatedResponse<BorrowedCopy>> {
        let request = PageRequest::new(page, self.page_size)?;
        let total = self.repository.book_instances.count_on_loan(borrower_id).await?;
        request.ensure_in_range(total)?;

        let copies = self
            .repository
            .book_instances
            .list_on_loan(borrower_id, request)
            .await?;

        let today = self.clock.today();
        Ok(PaginatedResponse::new(copies, total, request).map(|c| BorrowedCopy::new(c, today)))
    }
}
