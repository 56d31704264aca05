use sqlx::SqliteExecutor;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{is_unique_violation, SocialError, SocialResult};

use super::{FriendRequest, RequestStatus};

const REQUEST_COLUMNS: &str = "id,sender_id,receiver_id,status,created_at,updated_at";

/// A request addressed to someone, along with who sent it.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct IncomingRequest {
    #[sqlx(flatten)]
    pub request: FriendRequest,
    pub sender_name: String,
    pub sender_email: String,
}

/// The request for this exact ordered pair, whatever its status.
pub async fn find<'e, E>(executor: E, sender_id: Uuid, receiver_id: Uuid) -> SocialResult<Option<FriendRequest>>
where
    E: SqliteExecutor<'e>,
{
    let request = sqlx::query_as::<_, FriendRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM friend_requests WHERE sender_id=? AND receiver_id=?"
    ))
    .bind(sender_id)
    .bind(receiver_id)
    .fetch_optional(executor)
    .await?;

    Ok(request)
}

pub async fn find_pending<'e, E>(executor: E, sender_id: Uuid, receiver_id: Uuid) -> SocialResult<Option<FriendRequest>>
where
    E: SqliteExecutor<'e>,
{
    let request = sqlx::query_as::<_, FriendRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM friend_requests WHERE sender_id=? AND receiver_id=? AND status='pending'"
    ))
    .bind(sender_id)
    .bind(receiver_id)
    .fetch_optional(executor)
    .await?;

    Ok(request)
}

/// Requests sent to `receiver_id` in `status`, oldest first.
pub async fn find_by_receiver<'e, E>(
    executor: E,
    receiver_id: Uuid,
    status: RequestStatus,
) -> SocialResult<Vec<IncomingRequest>>
where
    E: SqliteExecutor<'e>,
{
    let requests = sqlx::query_as::<_, IncomingRequest>(
        "SELECT r.id,r.sender_id,r.receiver_id,r.status,r.created_at,r.updated_at,
                p.name AS sender_name, p.email AS sender_email
         FROM friend_requests r
         JOIN profiles p ON p.id = r.sender_id
         WHERE r.receiver_id=? AND r.status=?
         ORDER BY r.rowid",
    )
    .bind(receiver_id)
    .bind(status)
    .fetch_all(executor)
    .await?;

    Ok(requests)
}

/// Stores a new pending request. The `(sender_id, receiver_id)` unique index
/// serializes concurrent sends of one pair: the loser gets `DuplicateRequest`.
pub async fn create<'e, E>(executor: E, sender_id: Uuid, receiver_id: Uuid) -> SocialResult<FriendRequest>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc();
    let request = FriendRequest {
        id: Uuid::now_v7(),
        sender_id,
        receiver_id,
        status: RequestStatus::Pending,
        created_at: now,
        updated_at: now,
    };

    let inserted = sqlx::query(
        "INSERT INTO friend_requests (id,sender_id,receiver_id,status,created_at,updated_at) VALUES (?,?,?,?,?,?)",
    )
    .bind(request.id)
    .bind(request.sender_id)
    .bind(request.receiver_id)
    .bind(request.status)
    .bind(request.created_at)
    .bind(request.updated_at)
    .execute(executor)
    .await;

    match inserted {
        Ok(_) => Ok(request),
        Err(err) if is_unique_violation(&err) => Err(SocialError::DuplicateRequest),
        Err(err) => Err(err.into()),
    }
}

/// Persists `request.status` and `request.updated_at`, but only over a row
/// that is still pending. Returns whether the row changed.
pub async fn save<'e, E>(executor: E, request: &FriendRequest) -> SocialResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        "UPDATE friend_requests SET status=?, updated_at=? WHERE id=? AND status='pending'",
    )
    .bind(request.status)
    .bind(request.updated_at)
    .bind(request.id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}
