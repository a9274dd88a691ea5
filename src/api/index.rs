//! Home page counters

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppResult, services::catalog::CatalogCounts};

pub const SESSION_COOKIE: &str = "sessionid";

#[derive(Serialize, ToSchema)]
pub struct IndexResponse {
    #[serde(flatten)]
    pub counts: CatalogCounts,
    /// Visits from this session before the current one
    pub visits_count: i64,
}

/// Session id from the cookie jar, or a fresh one
fn session_id(jar: &CookieJar) -> (Uuid, bool) {
    match jar
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
    {
        Some(id) => (id, false),
        None => (Uuid::new_v4(), true),
    }
}

/// Catalog counters and session visit count
#[utoipa::path(
    get,
    path = "/",
    tag = "catalog",
    responses(
        (status = 200, description = "Catalog counters", body = IndexResponse)
    )
)]
pub async fn index(
    State(state): State<crate::AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<IndexResponse>)> {
    let counts = state.services.catalog.counts().await?;

    let (session, is_new) = session_id(&jar);
    let visits_count = state.services.redis.record_visit(&session).await?;

    let jar = if is_new {
        jar.add(
            Cookie::build((SESSION_COOKIE, session.to_string()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        )
    } else {
        jar
    };

    Ok((jar, Json(IndexResponse { counts, visits_count })))
}
