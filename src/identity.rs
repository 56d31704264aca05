use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{config::Config, error::SocialError, profiles::store::normalize_email, AppError};

/// The signed-in user's email, as vouched for by the authentication layer in
/// front of this service through the configured identity header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(pub String);

impl Identity {
    pub fn email(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    Config: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Config::from_ref(state);

        let email = parts
            .headers
            .get(config.identity_header.as_str())
            .and_then(|value| value.to_str().ok())
            .map(normalize_email)
            .filter(|email| !email.is_empty())
            .ok_or(SocialError::Unauthenticated)?;

        Ok(Identity(email))
    }
}
