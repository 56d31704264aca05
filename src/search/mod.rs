pub mod index;

use axum::{debug_handler, extract::{Query, State}, routing::get, Router};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{config::Config, error::SocialError, res::ApiResponse, AppResult, AppState};

pub use index::{search_by_email, search_by_name, Page};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search))
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    search_by: Option<String>,
    query: Option<String>,
    page: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn search(
    State(db_pool): State<SqlitePool>,
    State(config): State<Config>,
    Query(SearchQuery { search_by, query, page }): Query<SearchQuery>,
) -> AppResult<ApiResponse> {
    let query = query.unwrap_or_default();

    match search_by.as_deref().unwrap_or("name") {
        "name" => {
            let page = match page.as_deref().map(str::trim) {
                None | Some("") => 1,
                Some(raw) => raw.parse().map_err(|_| SocialError::InvalidPage)?,
            };
            let found = search_by_name(&db_pool, &query, page, config.search_page_size).await?;

            Ok(
                ApiResponse::ok(&found.items)?
                    .with_extra("total_pages", found.total_pages)
                    .with_extra("page", found.page)
                    .with_extra("total", found.total)
            )
        }
        "email" => ApiResponse::ok(search_by_email(&db_pool, &query).await?),
        _ => Err(SocialError::validation("Invalid value in 'search_by' param").into()),
    }
}
