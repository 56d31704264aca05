pub mod config;
pub mod db;
pub mod error;
pub mod friends;
pub mod identity;
pub mod profiles;
pub mod res;
pub mod search;

use axum::{extract::FromRef, http::StatusCode, response::{IntoResponse, Response}, routing::get, Router};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use config::Config;
use error::SocialError;
use friends::FriendRequestWorkflow;
use res::ApiResponse;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Config,
    pub workflow: FriendRequestWorkflow,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: Config) -> Self {
        let workflow = FriendRequestWorkflow::new(db_pool.clone());
        AppState {
            db_pool,
            config,
            workflow,
        }
    }
}

pub fn app(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/profiles", profiles::router())
        .merge(friends::router())
        .merge(search::router())
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health() -> &'static str {
    "ok"
}

pub type AppResult<T> = Result<T, AppError>;
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = self.0.downcast_ref::<SocialError>() {
            let status = err.status_code();
            if status.is_server_error() {
                tracing::error!(error = ?self.0, "request failed");
            }
            return ApiResponse::failure(status, err.kind(), err.to_string()).into_response();
        }

        tracing::error!(error = ?self.0, "request failed");
        ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, "internal", self.0.to_string())
            .into_response()
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(SocialError);
apperr_impl!(serde_json::Error);
