use axum::{debug_handler, extract::State, Json};
use serde::Deserialize;

use crate::{error::SocialError, identity::Identity, res::ApiResponse, AppResult, AppState};

use super::FriendRequestWorkflow;

#[derive(Debug, Deserialize)]
pub(crate) struct SendRequestBody {
    action_to: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn send_request(
    State(workflow): State<FriendRequestWorkflow>,
    identity: Identity,
    Json(SendRequestBody { action_to }): Json<SendRequestBody>,
) -> AppResult<ApiResponse> {
    let Some(receiver) = action_to.filter(|email| !email.trim().is_empty()) else {
        return Err(SocialError::validation("The 'action_to' parameter is required.").into());
    };

    let request = workflow.send(identity.email(), &receiver).await?;

    Ok(
        ApiResponse::ok(&request)?
            .with_message("Friend request sent successfully")
    )
}
