use axum::{debug_handler, extract::State};
use serde::Serialize;

use crate::{identity::Identity, res::ApiResponse, AppResult, AppState};

use super::{FriendRequestWorkflow, RequestStatus};

#[derive(Debug, Serialize)]
struct PendingEntry<'a> {
    from: &'a str,
    status: RequestStatus,
}

#[debug_handler(state = AppState)]
pub(crate) async fn pending(
    State(workflow): State<FriendRequestWorkflow>,
    identity: Identity,
) -> AppResult<ApiResponse> {
    let incoming = workflow.list_pending_for(identity.email()).await?;

    let entries: Vec<_> = incoming
        .iter()
        .map(|incoming| PendingEntry {
            from: &incoming.sender_name,
            status: incoming.request.status,
        })
        .collect();

    ApiResponse::ok(entries)
}

#[debug_handler(state = AppState)]
pub(crate) async fn friends(
    State(workflow): State<FriendRequestWorkflow>,
    identity: Identity,
) -> AppResult<ApiResponse> {
    let friends = workflow.list_friends(identity.email()).await?;

    let emails: Vec<_> = friends.iter().map(|friend| friend.email.as_str()).collect();
    ApiResponse::ok(emails)
}
