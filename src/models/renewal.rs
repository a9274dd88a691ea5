//! Due-back date rules for book renewals

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Latest accepted due-back date, in days from today (inclusive)
pub const RENEWAL_WINDOW_DAYS: u64 = 28;

/// Due-back date proposed when the librarian does not pick one
pub const DEFAULT_RENEWAL_DAYS: u64 = 21;

pub const RENEWAL_HELP_TEXT: &str =
    "Entrez une date entre aujourd'hui et dans 4 semaines (3 semaines par défaut)";

/// Rejection of a proposed due-back date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DueDateError {
    #[error("date invalide - date passée")]
    PastDate,

    #[error("date invalide - date dans plus de 4 semaines")]
    TooFarFuture,
}

/// A due-back date that passed [`validate_due_date`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ValidDueDate(NaiveDate);

impl ValidDueDate {
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

/// Accept `proposed` iff `today <= proposed <= today + 28 days`
pub fn validate_due_date(proposed: NaiveDate, today: NaiveDate) -> Result<ValidDueDate, DueDateError> {
    if proposed < today {
        return Err(DueDateError::PastDate);
    }

    // Near NaiveDate::MAX the window is clamped instead of overflowing
    let latest = today
        .checked_add_days(Days::new(RENEWAL_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX);
    if proposed > latest {
        return Err(DueDateError::TooFarFuture);
    }

    Ok(ValidDueDate(proposed))
}

/// today + 3 weeks
pub fn default_due_date(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(DEFAULT_RENEWAL_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// Form field a proposed date was submitted under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenewalField {
    /// Plain renewal form
    #[default]
    RenewalDate,
    /// Form bound to the copy record
    DueBack,
}

impl RenewalField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenewalField::RenewalDate => "renewal_date",
            RenewalField::DueBack => "due_back",
        }
    }
}

/// Renewal request body. At most one of the two fields may be set;
/// with neither, the default date is used.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RenewBookRequest {
    /// New due-back date (YYYY-MM-DD)
    pub renewal_date: Option<NaiveDate>,
    /// Same as `renewal_date`, for clients editing the copy record
    pub due_back: Option<NaiveDate>,
}

impl RenewBookRequest {
    /// Field and date the caller proposed, if any
    pub fn proposed(&self) -> AppResult<Option<(RenewalField, NaiveDate)>> {
        match (self.renewal_date, self.due_back) {
            (Some(_), Some(_)) => Err(AppError::BadRequest(
                "renewal_date and due_back are mutually exclusive".to_string(),
            )),
            (Some(date), None) => Ok(Some((RenewalField::RenewalDate, date))),
            (None, Some(date)) => Ok(Some((RenewalField::DueBack, date))),
            (None, None) => Ok(None),
        }
    }
}

impl DueDateError {
    /// Attach the offending field for the HTTP layer
    pub fn on_field(self, field: RenewalField) -> AppError {
        AppError::InvalidField {
            field: field.as_str().to_string(),
            message: self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
    }

    fn plus(days: u64) -> NaiveDate {
        today().checked_add_days(Days::new(days)).unwrap()
    }

    #[test]
    fn test_today_is_valid() {
        assert_eq!(validate_due_date(today(), today()).unwrap().date(), today());
    }

    #[test]
    fn test_past_date_rejected() {
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        assert_eq!(validate_due_date(yesterday, today()), Err(DueDateError::PastDate));
    }

    #[test]
    fn test_max_date_is_valid() {
        assert!(validate_due_date(plus(28), today()).is_ok());
    }

    #[test]
    fn test_too_far_in_future_rejected() {
        assert_eq!(validate_due_date(plus(29), today()), Err(DueDateError::TooFarFuture));
    }

    #[test]
    fn test_window_is_exactly_today_to_four_weeks() {
        let start = today().checked_sub_days(Days::new(10)).unwrap();
        for offset in 0..50u64 {
            let d = start.checked_add_days(Days::new(offset)).unwrap();
            let expected = d >= today() && d <= plus(28);
            assert_eq!(validate_due_date(d, today()).is_ok(), expected, "date {}", d);
        }
    }

    #[test]
    fn test_window_crosses_year_end() {
        let today = NaiveDate::from_ymd_opt(2023, 12, 20).unwrap();
        assert!(validate_due_date(NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(), today).is_ok());
        assert_eq!(
            validate_due_date(NaiveDate::from_ymd_opt(2024, 1, 18).unwrap(), today),
            Err(DueDateError::TooFarFuture)
        );
    }

    #[test]
    fn test_default_date_always_validates() {
        assert_eq!(default_due_date(today()), plus(21));
        assert!(validate_due_date(default_due_date(today()), today()).is_ok());
        assert!(validate_due_date(default_due_date(NaiveDate::MAX), NaiveDate::MAX).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(DueDateError::PastDate.to_string(), "date invalide - date passée");
        assert_eq!(
            DueDateError::TooFarFuture.to_string(),
            "date invalide - date dans plus de 4 semaines"
        );
    }

    #[test]
    fn test_proposed_field() {
        let req = RenewBookRequest { renewal_date: Some(today()), due_back: None };
        assert_eq!(req.proposed().unwrap(), Some((RenewalField::RenewalDate, today())));

        let req = RenewBookRequest { renewal_date: None, due_back: Some(today()) };
        assert_eq!(req.proposed().unwrap(), Some((RenewalField::DueBack, today())));

        assert_eq!(RenewBookRequest::default().proposed().unwrap(), None);

        let req = RenewBookRequest { renewal_date: Some(today()), due_back: Some(today()) };
        assert!(req.proposed().is_err());
    }

    #[test]
    fn test_on_field() {
        match DueDateError::PastDate.on_field(RenewalField::DueBack) {
            AppError::InvalidField { field, message } => {
                assert_eq!(field, "due_back");
                assert_eq!(message, "date invalide - date passée");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
