use axum::http::StatusCode;
use thiserror::Error;

pub type SocialResult<T> = Result<T, SocialError>;

/// Every way a profile, friend request or search operation can fail.
///
/// All variants except `Store` are expected conditions the caller can
/// report back to the user as-is.
#[derive(Debug, Error)]
pub enum SocialError {
    #[error("email already exists")]
    DuplicateEmail,
    #[error("you cannot send a friend request to yourself")]
    SelfRequest,
    #[error("invalid receiver details for the friend request")]
    UnknownReceiver,
    #[error("invalid sender details for the friend request")]
    UnknownSender,
    #[error("friend request already sent")]
    DuplicateRequest,
    #[error("no friend request between these users found")]
    NoSuchRequest,
    #[error("invalid page number")]
    InvalidPage,
    #[error("this user does not exist")]
    ProfileNotFound,
    #[error("{0}")]
    Validation(String),
    #[error("missing authenticated identity")]
    Unauthenticated,
    #[error("store failure")]
    Store(#[from] sqlx::Error),
}

impl SocialError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Stable tag carried in every failed response.
    pub fn kind(&self) -> &'static str {
        use SocialError::*;
        match self {
            DuplicateEmail => "duplicate_email",
            SelfRequest => "self_request",
            UnknownReceiver => "unknown_receiver",
            UnknownSender => "unknown_sender",
            DuplicateRequest => "duplicate_request",
            NoSuchRequest => "no_such_request",
            InvalidPage => "invalid_page",
            ProfileNotFound => "profile_not_found",
            Validation(_) => "validation_error",
            Unauthenticated => "unauthenticated",
            Store(_) => "store_failure",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        use SocialError::*;
        match self {
            SelfRequest | InvalidPage | Validation(_) => StatusCode::BAD_REQUEST,
            DuplicateEmail | DuplicateRequest => StatusCode::CONFLICT,
            UnknownReceiver | UnknownSender | NoSuchRequest | ProfileNotFound => StatusCode::NOT_FOUND,
            Unauthenticated => StatusCode::UNAUTHORIZED,
            Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
