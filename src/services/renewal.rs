//! Librarian renewal of a copy's due-back date

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    clock::Clock,
    error::AppError,
    models::{
        book_instance::BookInstance,
        renewal::{default_due_date, validate_due_date, DueDateError, RenewalField, RENEWAL_HELP_TEXT},
        user::Capability,
    },
    repository::{BookCopyStore, CapabilityChecker},
};

use super::auth::is_granted;

/// Failure of a renewal
#[derive(Error, Debug)]
pub enum RenewalError {
    #[error(transparent)]
    InvalidDate(#[from] DueDateError),

    #[error("Book copy {0} not found")]
    NotFound(Uuid),

    #[error("Capability {0} required")]
    Unauthorized(Capability),

    #[error("Failed to access book copy: {0}")]
    Persistence(String),
}

impl RenewalError {
    /// Convert for the HTTP layer, attributing date errors to `field`
    pub fn into_app_error(self, field: RenewalField) -> AppError {
        match self {
            RenewalError::InvalidDate(e) => e.on_field(field),
            RenewalError::NotFound(id) => AppError::NotFound(format!("Book copy {} not found", id)),
            RenewalError::Unauthorized(capability) => {
                AppError::Authorization(format!("Capability {} required", capability))
            }
            RenewalError::Persistence(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RenewalError> for AppError {
    fn from(e: RenewalError) -> Self {
        e.into_app_error(RenewalField::default())
    }
}

/// What a librarian sees before renewing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RenewalForm {
    pub copy: BookInstance,
    /// Proposed due-back date (today + 3 weeks)
    pub renewal_date: NaiveDate,
    pub help_text: String,
}

#[derive(Clone)]
pub struct RenewalService {
    copies: Arc<dyn BookCopyStore>,
    permissions: Arc<dyn CapabilityChecker>,
    clock: Arc<dyn Clock>,
}

impl RenewalService {
    pub fn new(
        copies: Arc<dyn BookCopyStore>,
        permissions: Arc<dyn CapabilityChecker>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            copies,
            permissions,
            clock,
        }
    }

    /// Date proposed when the caller gives none
    pub fn default_date(&self) -> NaiveDate {
        default_due_date(self.clock.today())
    }

    /// Load the copy and the default date for the renewal form
    pub async fn renewal_form(&self, copy_id: Uuid, acting_user: i32) -> Result<RenewalForm, RenewalError> {
        self.authorize(acting_user).await?;
        let copy = self.fetch(copy_id).await?;

        Ok(RenewalForm {
            copy,
            renewal_date: self.default_date(),
            help_text: RENEWAL_HELP_TEXT.to_string(),
        })
    }

    /// Set the due-back date of a copy.
    ///
    /// The capability check runs first and fails closed. Nothing is written
    /// unless the copy exists and the date is within the renewal window.
    pub async fn renew(
        &self,
        copy_id: Uuid,
        proposed_date: NaiveDate,
        acting_user: i32,
    ) -> Result<BookInstance, RenewalError> {
        self.authorize(acting_user).await?;

        let mut copy = self.fetch(copy_id).await?;
        let due_back = validate_due_date(proposed_date, self.clock.today())?;

        copy.due_back = Some(due_back.date());
        self.copies
            .save_book_copy(&copy)
            .await
            .map_err(|e| RenewalError::Persistence(e.to_string()))?;

        tracing::info!(
            copy_id = %copy_id,
            user_id = acting_user,
            due_back = %due_back.date(),
            "Book copy renewed"
        );

        Ok(copy)
    }

    /// Fail-closed check of the renewal capability
    pub async fn authorize(&self, acting_user: i32) -> Result<(), RenewalError> {
        let capability = Capability::MarkReturned;
        if is_granted(self.permissions.as_ref(), acting_user, capability).await {
            Ok(())
        } else {
            Err(RenewalError::Unauthorized(capability))
        }
    }

    async fn fetch(&self, copy_id: Uuid) -> Result<BookInstance, RenewalError> {
        self.copies
            .get_book_copy(copy_id)
            .await
            .map_err(|e| RenewalError::Persistence(e.to_string()))?
            .ok_or(RenewalError::NotFound(copy_id))
    }
}
