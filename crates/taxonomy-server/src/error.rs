//! Error response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ipms_types::ApiResponse;
use taxonomy_core::GatewayError;

/// Handler error: any `GatewayError`, rendered as a failed envelope.
#[derive(Debug)]
pub struct AppError(pub GatewayError);

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Reference request failed");
        } else {
            tracing::warn!(error = %self.0, "Reference request rejected");
        }

        let body: ApiResponse<()> = ApiResponse::error(self.0.to_string());
        (status, Json(body)).into_response()
    }
}
