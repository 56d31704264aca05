use sqlx::SqlitePool;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::{
    error::{SocialError, SocialResult},
    profiles::{store as profiles, Profile},
};

use super::{graph, requests, Decision, FriendRequest, IncomingRequest, RequestStatus};

/// The only writer of request status and the only thing that adds friends.
///
/// Callers pass emails of already-authenticated users; every operation
/// resolves them against the profile store first.
#[derive(Clone)]
pub struct FriendRequestWorkflow {
    db_pool: SqlitePool,
}

impl FriendRequestWorkflow {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn send(&self, sender_email: &str, receiver_email: &str) -> SocialResult<FriendRequest> {
        let sender_email = profiles::normalize_email(sender_email);
        let receiver_email = profiles::normalize_email(receiver_email);

        if sender_email == receiver_email {
            return Err(SocialError::SelfRequest);
        }

        let sender = self.acting_profile(&sender_email).await?;
        let receiver = profiles::find_by_email(&self.db_pool, &receiver_email)
            .await?
            .ok_or(SocialError::UnknownReceiver)?;

        // any earlier request for the pair blocks a new one, even a rejected one
        if requests::find(&self.db_pool, sender.id, receiver.id).await?.is_some() {
            return Err(SocialError::DuplicateRequest);
        }

        let request = requests::create(&self.db_pool, sender.id, receiver.id).await?;
        info!(
            request_id = %request.id,
            sender = %sender.email,
            receiver = %receiver.email,
            "friend request sent"
        );
        Ok(request)
    }

    /// Applies the receiver's decision to the request `sender_email` sent them.
    ///
    /// Only a pending request moves. Anything already decided is returned
    /// unchanged, so repeating a call is harmless. Acceptance writes the new
    /// status and both friendship rows in one transaction.
    pub async fn resolve(
        &self,
        receiver_email: &str,
        sender_email: &str,
        decision: Decision,
    ) -> SocialResult<FriendRequest> {
        let receiver = self.acting_profile(receiver_email).await?;
        let sender = profiles::find_by_email(&self.db_pool, sender_email)
            .await?
            .ok_or(SocialError::UnknownSender)?;

        let request = requests::find(&self.db_pool, sender.id, receiver.id)
            .await?
            .ok_or(SocialError::NoSuchRequest)?;

        if !request.is_pending() {
            debug!(request_id = %request.id, status = %request.status, "request already decided");
            return Ok(request);
        }

        let decided = FriendRequest {
            status: decision.outcome(),
            updated_at: OffsetDateTime::now_utc(),
            ..request
        };

        let mut tx = self.db_pool.begin().await?;
        if !requests::save(&mut *tx, &decided).await? {
            // someone else decided it between our read and our write
            drop(tx);
            let current = requests::find(&self.db_pool, sender.id, receiver.id)
                .await?
                .ok_or(SocialError::NoSuchRequest)?;
            debug!(request_id = %current.id, status = %current.status, "request decided concurrently");
            return Ok(current);
        }

        if decided.status == RequestStatus::Accepted {
            graph::insert_mutual_edge(&mut *tx, sender.id, receiver.id).await?;
        }
        tx.commit().await?;

        info!(
            request_id = %decided.id,
            sender = %sender.email,
            receiver = %receiver.email,
            status = %decided.status,
            "friend request resolved"
        );
        Ok(decided)
    }

    /// Pending requests addressed to `receiver_email`, oldest first.
    pub async fn list_pending_for(&self, receiver_email: &str) -> SocialResult<Vec<IncomingRequest>> {
        let receiver = self.acting_profile(receiver_email).await?;
        requests::find_by_receiver(&self.db_pool, receiver.id, RequestStatus::Pending).await
    }

    pub async fn list_friends(&self, email: &str) -> SocialResult<Vec<Profile>> {
        let profile = self.acting_profile(email).await?;
        graph::list_friends(&self.db_pool, profile.id).await
    }

    async fn acting_profile(&self, email: &str) -> SocialResult<Profile> {
        profiles::find_by_email(&self.db_pool, email)
            .await?
            .ok_or(SocialError::ProfileNotFound)
    }
}
