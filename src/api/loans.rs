//! Loan endpoints: borrowed listings and librarian renewals

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{BookInstance, BorrowedCopy},
        pagination::{PageQuery, PaginatedResponse},
        renewal::{RenewBookRequest, RenewalField},
        user::Capability,
    },
    services::renewal::RenewalForm,
};

use super::AuthenticatedUser;

/// Copies on loan to the current user
#[utoipa::path(
    get,
    path = "/mybooks",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Copies borrowed by the current user", body = PaginatedResponse<BorrowedCopy>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_borrowed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<BorrowedCopy>>> {
    let copies = state.services.loans.borrowed_by(claims.user_id, query.page).await?;
    Ok(Json(copies))
}

/// Every copy on loan (librarians)
#[utoipa::path(
    get,
    path = "/borrowed",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "All borrowed copies", body = PaginatedResponse<BorrowedCopy>),
        (status = 403, description = "Missing mark-returned capability")
    )
)]
pub async fn all_borrowed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<BorrowedCopy>>> {
    state.services.auth.require(claims.user_id, Capability::MarkReturned).await?;

    let copies = state.services.loans.all_borrowed(query.page).await?;
    Ok(Json(copies))
}

/// Renewal form: the copy and the proposed due-back date
#[utoipa::path(
    get,
    path = "/copies/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book copy ID")
    ),
    responses(
        (status = 200, description = "Renewal form", body = RenewalForm),
        (status = 403, description = "Missing mark-returned capability"),
        (status = 404, description = "Book copy not found")
    )
)]
pub async fn renewal_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(copy_id): Path<Uuid>,
) -> AppResult<Json<RenewalForm>> {
    let form = state.services.renewal.renewal_form(copy_id, claims.user_id).await?;
    Ok(Json(form))
}

/// Renew a copy: set a new due-back date
#[utoipa::path(
    post,
    path = "/copies/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book copy ID")
    ),
    request_body = RenewBookRequest,
    responses(
        (status = 200, description = "Copy renewed", body = BookInstance),
        (status = 400, description = "Date in the past or more than 4 weeks ahead"),
        (status = 403, description = "Missing mark-returned capability"),
        (status = 404, description = "Book copy not found")
    )
)]
pub async fn renew_copy(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(copy_id): Path<Uuid>,
    body: Result<Json<RenewBookRequest>, JsonRejection>,
) -> AppResult<Json<BookInstance>> {
    let renewal = &state.services.renewal;
    // Denied callers get 403 whatever body they sent
    renewal.authorize(claims.user_id).await?;

    let (field, proposed_date) = proposed_renewal(body, renewal.default_date())?;

    let copy = renewal
        .renew(copy_id, proposed_date, claims.user_id)
        .await
        .map_err(|e| e.into_app_error(field))?;

    Ok(Json(copy))
}

/// Field and date to renew with, falling back to `default_date` for an empty body
fn proposed_renewal(
    body: Result<Json<RenewBookRequest>, JsonRejection>,
    default_date: NaiveDate,
) -> AppResult<(RenewalField, NaiveDate)> {
    let Json(request) = body.map_err(|rejection| match rejection {
        JsonRejection::JsonDataError(e) => AppError::InvalidField {
            field: RenewalField::default().as_str().to_string(),
            message: e.body_text(),
        },
        other => AppError::BadRequest(other.body_text()),
    })?;

    Ok(request
        .proposed()?
        .unwrap_or((RenewalField::default(), default_date)))
}
