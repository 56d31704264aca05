pub mod graph;
mod list;
pub mod requests;
mod respond;
mod send;
pub mod workflow;

use std::{fmt, str::FromStr};

use axum::{routing::{get, post}, Router};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{error::SocialError, AppState};

pub use requests::IncomingRequest;
pub use workflow::FriendRequestWorkflow;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/friend-requests", get(list::pending).post(send::send_request))
        .route("/friend-requests/respond", post(respond::respond))
        .route("/friends", get(list::friends))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a receiver can do with a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub fn outcome(self) -> RequestStatus {
        match self {
            Decision::Accept => RequestStatus::Accepted,
            Decision::Reject => RequestStatus::Rejected,
        }
    }
}

impl FromStr for Decision {
    type Err = SocialError;

    fn from_str(action: &str) -> Result<Self, Self::Err> {
        match action {
            "accepted" => Ok(Decision::Accept),
            "rejected" => Ok(Decision::Reject),
            _ => Err(SocialError::validation("Invalid action on friend request.")),
        }
    }
}

/// A directed proposal of friendship. At most one exists per
/// (sender, receiver) pair, and it leaves `Pending` at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct FriendRequest {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub status: RequestStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl FriendRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}
