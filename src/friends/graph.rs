//! The symmetric friend relation.
//!
//! A friendship is stored as two directed rows, always written together.

use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{error::SocialResult, profiles::Profile};

/// Makes `a` and `b` friends of each other in one transaction.
/// Acceptance goes through [`insert_mutual_edge`] inside its own transaction instead.
pub async fn add_mutual_edge(db_pool: &SqlitePool, a: Uuid, b: Uuid) -> SocialResult<()> {
    let mut tx = db_pool.begin().await?;
    insert_mutual_edge(&mut *tx, a, b).await?;
    tx.commit().await?;
    Ok(())
}

/// Writes both directions of the edge on `conn`, which the caller is
/// expected to hold inside a transaction. Existing rows are left alone.
pub async fn insert_mutual_edge(conn: &mut SqliteConnection, a: Uuid, b: Uuid) -> SocialResult<()> {
    let now = OffsetDateTime::now_utc();

    for (from, to) in [(a, b), (b, a)] {
        sqlx::query("INSERT OR IGNORE INTO friendships (profile_id,friend_id,created_at) VALUES (?,?,?)")
            .bind(from)
            .bind(to)
            .bind(now)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// Friends of `profile_id`, in the order the friendships were made.
pub async fn list_friends<'e, E>(executor: E, profile_id: Uuid) -> SocialResult<Vec<Profile>>
where
    E: SqliteExecutor<'e>,
{
    let friends = sqlx::query_as::<_, Profile>(
        "SELECT p.id,p.email,p.name,p.gender,p.created_at,p.updated_at
         FROM friendships f
         JOIN profiles p ON p.id = f.friend_id
         WHERE f.profile_id=?
         ORDER BY f.rowid",
    )
    .bind(profile_id)
    .fetch_all(executor)
    .await?;

    Ok(friends)
}
