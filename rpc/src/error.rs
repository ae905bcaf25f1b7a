//! RPC error types and their HTTP rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use journal_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum RpcError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("server error: {0}")]
    Server(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl RpcError {
    pub fn status(&self) -> StatusCode {
        match self {
            RpcError::Service(e) => match e {
                ServiceError::Validation(_) | ServiceError::Config(_) => StatusCode::BAD_REQUEST,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
                ServiceError::Adapter { .. } | ServiceError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            RpcError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RpcError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            RpcError::Service(ServiceError::Adapter { source, .. }) => ErrorBody {
                error: self.to_string(),
                detail: Some(source.to_string()),
            },
            RpcError::Service(ServiceError::Store(e)) => ErrorBody {
                error: "store operation failed".into(),
                detail: Some(e.to_string()),
            },
            RpcError::InvalidRequest(detail) => ErrorBody {
                error: "invalid request".into(),
                detail: Some(detail.clone()),
            },
            other => ErrorBody {
                error: other.to_string(),
                detail: None,
            },
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %body.error, detail = ?body.detail, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %body.error, "request rejected");
        }
        (status, Json(body)).into_response()
    }
}
