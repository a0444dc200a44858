use std::sync::Arc;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::catalog::domain::CatalogService;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;

// AppState is shared by every request; the service is built once at start-up
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) catalog_service: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(config: Configuration, catalog_service: Arc<dyn CatalogService>) -> AppState {
        AppState {
            config,
            catalog_service,
        }
    }
}

// uniform error body, one entry per failure
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct ApiErrors {
    pub errors: Vec<String>,
}

impl ApiErrors {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }
}

pub(crate) type ServerError = (StatusCode, Json<ApiErrors>);

pub(crate) fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, Json(ApiErrors::new(vec![format!("{}", err)])))
}

// extractor rejections keep their status but use the error body of every other failure
pub(crate) fn json_rejection_to_server_error(rejection: JsonRejection) -> ServerError {
    (rejection.status(), Json(ApiErrors::new(vec![rejection.body_text()])))
}

pub(crate) fn query_rejection_to_server_error(rejection: QueryRejection) -> ServerError {
    (rejection.status(), Json(ApiErrors::new(vec![rejection.body_text()])))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::Access { .. } => StatusCode::FORBIDDEN,
            CommandError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CommandError::DuplicateKey { .. } => StatusCode::CONFLICT,
            CommandError::DuplicateIsbn { .. } => StatusCode::BAD_REQUEST,
            CommandError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            CommandError::NotFound { .. } => StatusCode::NOT_FOUND,
            CommandError::Runtime { retryable: true, .. } => StatusCode::SERVICE_UNAVAILABLE,
            CommandError::Runtime { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CommandError::Serialization { .. } => StatusCode::BAD_REQUEST,
            CommandError::Validation { .. } => StatusCode::BAD_REQUEST,
            CommandError::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!("request failed with {}: {:?}", status, err);
        }
        (status, Json(ApiErrors::new(err.messages())))
    }
}
