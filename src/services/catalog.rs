//! Catalog browsing and author management

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorDetails, CreateAuthor, UpdateAuthor},
        book::{display_genre, BookDetails, BookShort},
        book_instance::LoanStatus,
        pagination::{PageRequest, PaginatedResponse},
    },
    repository::Repository,
};

/// Catalog counters shown on the home page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogCounts {
    pub authors_count: i64,
    pub books_count: i64,
    pub instances_count: i64,
    pub available_instances_count: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    page_size: i64,
}

impl CatalogService {
    pub fn new(repository: Repository, page_size: i64) -> Self {
        Self { repository, page_size }
    }

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        Ok(CatalogCounts {
            authors_count: self.repository.authors.count().await?,
            books_count: self.repository.books.count().await?,
            instances_count: self.repository.book_instances.count().await?,
            available_instances_count: self
                .repository
                .book_instances
                .count_by_status(LoanStatus::Available)
                .await?,
        })
    }

    pub async fn list_books(&self, page: Option<i64>) -> AppResult<PaginatedResponse<BookShort>> {
        let request = PageRequest::new(page, self.page_size)?;
        let total = self.repository.books.count().await?;
        request.ensure_in_range(total)?;

        let books = self.repository.books.list(request).await?;
        Ok(PaginatedResponse::new(books, total, request))
    }

    /// Book with author, language, genres and copies
    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        let book = self.repository.books.get_by_id(id).await?;

        let author = match book.author_id {
            Some(author_id) => match self.repository.authors.get_by_id(author_id).await {
                Ok(author) => Some(author),
                Err(AppError::NotFound(_)) => None,
                Err(e) => return Err(e),
            },
            None => None,
        };
        let language = match book.language_id {
            Some(language_id) => self.repository.books.language(language_id).await?,
            None => None,
        };
        let genres = self.repository.books.genres(id).await?;
        let copies = self.repository.book_instances.list_for_book(id).await?;

        Ok(BookDetails {
            genre_display: display_genre(&genres),
            book,
            author,
            language,
            genres,
            copies,
        })
    }

    pub async fn list_authors(&self, page: Option<i64>) -> AppResult<PaginatedResponse<Author>> {
        let request = PageRequest::new(page, self.page_size)?;
        let total = self.repository.authors.count().await?;
        request.ensure_in_range(total)?;

        let authors = self.repository.authors.list(request).await?;
        Ok(PaginatedResponse::new(authors, total, request))
    }

    pub async fn get_author(&self, id: i32) -> AppResult<AuthorDetails> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.books.list_by_author(id).await?;

        Ok(AuthorDetails {
            display_name: author.display_name(),
            author,
            books,
        })
    }

    pub async fn create_author(&self, data: &CreateAuthor) -> AppResult<Author> {
        check_lifespan(data.date_of_birth, data.date_of_death)?;
        let author = self.repository.authors.create(data).await?;
        tracing::info!(author_id = author.id, "Author created: {}", author);
        Ok(author)
    }

    pub async fn update_author(&self, id: i32, data: &UpdateAuthor) -> AppResult<Author> {
        let current = self.repository.authors.get_by_id(id).await?;
        check_lifespan(
            data.date_of_birth.or(current.date_of_birth),
            data.date_of_death.or(current.date_of_death),
        )?;
        self.repository.authors.update(id, data).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await?;
        tracing::info!(author_id = id, "Author deleted");
        Ok(())
    }
}

fn check_lifespan(
    date_of_birth: Option<chrono::NaiveDate>,
    date_of_death: Option<chrono::NaiveDate>,
) -> AppResult<()> {
    match (date_of_birth, date_of_death) {
        (Some(birth), Some(death)) if death < birth => Err(AppError::Validation(
            "date_of_death must not precede date_of_birth".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_check_lifespan() {
        let birth = NaiveDate::from_ymd_opt(1924, 8, 29);
        let death = NaiveDate::from_ymd_opt(2016, 1, 18);

        assert!(check_lifespan(birth, death).is_ok());
        assert!(check_lifespan(birth, None).is_ok());
        assert!(check_lifespan(None, None).is_ok());
        assert!(check_lifespan(death, birth).is_err());
    }
}
