//! Read-only lookups over profiles.

use serde::Serialize;
use sqlx::{SqliteExecutor, SqlitePool};

use crate::{
    error::{SocialError, SocialResult},
    profiles::{store::normalize_email, ProfileSummary},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
}

/// Profiles whose name contains `query` (case-insensitive), by name.
///
/// Pages are 1-based. An empty result still has one (empty) page; any page
/// outside `1..=total_pages` is `InvalidPage`.
pub async fn search_by_name(
    db_pool: &SqlitePool,
    query: &str,
    page: u32,
    page_size: u32,
) -> SocialResult<Page<ProfileSummary>> {
    if page_size == 0 {
        return Err(SocialError::validation("page size must be at least 1"));
    }

    let pattern = like_pattern(query);

    let (total,): (i64,) = sqlx::query_as(r"SELECT COUNT(*) FROM profiles WHERE name LIKE ? ESCAPE '\'")
        .bind(&pattern)
        .fetch_one(db_pool)
        .await?;
    let total = u64::try_from(total).unwrap_or_default();

    let total_pages = u32::try_from(total.div_ceil(u64::from(page_size)))
        .unwrap_or(u32::MAX)
        .max(1);
    if page == 0 || page > total_pages {
        return Err(SocialError::InvalidPage);
    }

    let offset = u64::from(page - 1) * u64::from(page_size);
    let items = sqlx::query_as::<_, ProfileSummary>(
        r"SELECT id,name FROM profiles WHERE name LIKE ? ESCAPE '\' ORDER BY name, rowid LIMIT ? OFFSET ?",
    )
    .bind(&pattern)
    .bind(i64::from(page_size))
    .bind(i64::try_from(offset).unwrap_or(i64::MAX))
    .fetch_all(db_pool)
    .await?;

    Ok(Page {
        items,
        page,
        total_pages,
        total,
    })
}

pub async fn search_by_email<'e, E>(executor: E, query: &str) -> SocialResult<ProfileSummary>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, ProfileSummary>("SELECT id,name FROM profiles WHERE email=?")
        .bind(normalize_email(query))
        .fetch_optional(executor)
        .await?
        .ok_or(SocialError::ProfileNotFound)
}

/// `%query%` with LIKE wildcards in `query` taken literally.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(like_pattern("ann"), "%ann%");
        assert_eq!(like_pattern("100%_a\\b"), r"%100\%\_a\\b%");
        assert_eq!(like_pattern(""), "%%");
    }
}
