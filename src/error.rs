use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use thiserror::Error;

use crate::server::handlers::WebhookResponse;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Malformed webhook payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Chat delivery failed: {0}")]
    Delivery(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NotifierError>;

impl NotifierError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Payload(_) => StatusCode::BAD_REQUEST,
            Self::Delivery(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for NotifierError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        error!("Request failed ({status}): {self}");

        let body = WebhookResponse {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
