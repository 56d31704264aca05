use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::AppResult;

/// The JSON envelope every endpoint answers with:
/// `{"code", "message"?, "kind"?, "data", ...extra}`.
#[derive(Debug)]
pub struct ApiResponse {
    status: StatusCode,
    message: Option<String>,
    kind: Option<&'static str>,
    data: Value,
    extra: Map<String, Value>,
}

#[derive(Serialize)]
struct Body<'a> {
    code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    data: &'a Value,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

impl ApiResponse {
    pub fn ok<T: Serialize>(data: T) -> AppResult<ApiResponse> {
        Ok(ApiResponse {
            status: StatusCode::OK,
            message: None,
            kind: None,
            data: serde_json::to_value(data)?,
            extra: Map::new(),
        })
    }

    pub fn failure(status: StatusCode, kind: &'static str, message: impl Into<String>) -> ApiResponse {
        ApiResponse {
            status,
            message: Some(message.into()),
            kind: Some(kind),
            data: Value::String(String::new()),
            extra: Map::new(),
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_owned(), value.into());
        self
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let body = Body {
            code: self.status.as_u16(),
            message: self.message.as_deref(),
            kind: self.kind,
            data: &self.data,
            extra: &self.extra,
        };
        (self.status, Json(body)).into_response()
    }
}
