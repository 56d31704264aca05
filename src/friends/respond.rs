use axum::{debug_handler, extract::State, Json};
use serde::Deserialize;

use crate::{error::SocialError, identity::Identity, res::ApiResponse, AppResult, AppState};

use super::{Decision, FriendRequestWorkflow};

#[derive(Debug, Deserialize)]
pub(crate) struct RespondBody {
    action_to: Option<String>,
    action: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn respond(
    State(workflow): State<FriendRequestWorkflow>,
    identity: Identity,
    Json(RespondBody { action_to, action }): Json<RespondBody>,
) -> AppResult<ApiResponse> {
    let decision: Decision = action.as_deref().unwrap_or_default().parse()?;

    let Some(sender) = action_to.filter(|email| !email.trim().is_empty()) else {
        return Err(SocialError::validation("The 'action_to' parameter is required.").into());
    };

    let request = workflow.resolve(identity.email(), &sender, decision).await?;

    Ok(
        ApiResponse::ok(&request)?
            .with_message(format!("Friend request {}", request.status))
    )
}
