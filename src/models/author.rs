//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::BookShort;

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Name as shown in listings: "last, first"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}

/// Author with the books they wrote
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetails {
    #[serde(flatten)]
    pub author: Author,
    pub display_name: String,
    pub books: Vec<BookShort>,
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 100, message = "First name must be 1 to 100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name must be 1 to 100 characters"))]
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Update author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 100, message = "First name must be 1 to 100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Last name must be 1 to 100 characters"))]
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doe() -> Author {
        Author {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            date_of_birth: None,
            date_of_death: None,
        }
    }

    #[test]
    fn test_display_name_is_last_comma_first() {
        assert_eq!(doe().display_name(), "Doe, John");
        assert_eq!(doe().to_string(), "Doe, John");
    }

    #[test]
    fn test_create_author_name_length() {
        let ok = CreateAuthor {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        assert!(ok.validate().is_ok());

        let too_long = CreateAuthor {
            first_name: "x".repeat(101),
            last_name: "Doe".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        assert!(too_long.validate().is_err());

        let empty = CreateAuthor {
            first_name: "John".to_string(),
            last_name: String::new(),
            date_of_birth: None,
            date_of_death: None,
        };
        assert!(empty.validate().is_err());
    }
}
