//! Page-number pagination for list endpoints

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

/// Page query parameter
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PageQuery {
    /// Page number, starting at 1 (default: 1)
    pub page: Option<i64>,
}

/// Validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

fn invalid_page(page: i64) -> AppError {
    AppError::NotFound(format!("Invalid page ({})", page))
}

impl PageRequest {
    /// Pages whose offset does not fit an `i64` are rejected like any other
    /// page past the end.
    pub fn new(page: Option<i64>, per_page: i64) -> AppResult<Self> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(invalid_page(page));
        }
        let per_page = per_page.max(1);
        if (page - 1).checked_mul(per_page).is_none() {
            return Err(invalid_page(page));
        }
        Ok(Self { page, per_page })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    /// The first page is always valid, even when empty
    pub fn ensure_in_range(&self, total: i64) -> AppResult<()> {
        if self.page > 1 && self.offset() >= total {
            return Err(invalid_page(self.page));
        }
        Ok(())
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Entries on this page
    pub items: Vec<T>,
    /// Total number of entries
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Entries per page
    pub per_page: i64,
    pub num_pages: i64,
    /// True when entries span more than one page
    pub is_paginated: bool,
}

impl<T> PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        let num_pages = if total == 0 {
            1
        } else {
            (total + request.per_page - 1) / request.per_page
        };
        Self {
            items,
            total,
            page: request.page,
            per_page: request.per_page,
            num_pages,
            is_paginated: num_pages > 1,
        }
    }

    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        U: for<'a> ToSchema<'a>,
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            num_pages: self.num_pages,
            is_paginated: self.is_paginated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::author::Author;

    fn author(id: i32) -> Author {
        Author {
            id,
            first_name: format!("John {}", id),
            last_name: format!("Doe {}", id),
            date_of_birth: None,
            date_of_death: None,
        }
    }

    #[test]
    fn test_page_request() {
        let req = PageRequest::new(None, 3).unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.offset(), 0);

        let req = PageRequest::new(Some(2), 3).unwrap();
        assert_eq!(req.offset(), 3);
        assert_eq!(req.limit(), 3);

        assert!(PageRequest::new(Some(0), 3).is_err());
    }

    #[test]
    fn test_ensure_in_range() {
        // 5 authors, 3 per page: pages 1 and 2 exist
        assert!(PageRequest::new(Some(1), 3).unwrap().ensure_in_range(5).is_ok());
        assert!(PageRequest::new(Some(2), 3).unwrap().ensure_in_range(5).is_ok());
        assert!(PageRequest::new(Some(3), 3).unwrap().ensure_in_range(5).is_err());
        assert!(PageRequest::new(Some(1), 3).unwrap().ensure_in_range(0).is_ok());
    }

    #[test]
    fn test_huge_page_is_not_found() {
        let err = PageRequest::new(Some(i64::MAX), 3).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // Largest page whose offset still fits
        let last = i64::MAX / 3 + 1;
        let req = PageRequest::new(Some(last), 3).unwrap();
        assert!(matches!(req.ensure_in_range(5), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_paginated_response() {
        let req = PageRequest::new(Some(2), 3).unwrap();
        let page = PaginatedResponse::new(vec![author(4), author(5)], 5, req);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.num_pages, 2);
        assert!(page.is_paginated);

        let req = PageRequest::new(None, 3).unwrap();
        let page = PaginatedResponse::new(vec![author(1)], 1, req);
        assert_eq!(page.num_pages, 1);
        assert!(!page.is_paginated);
    }
}
