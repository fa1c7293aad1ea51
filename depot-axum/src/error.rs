use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use depot_blob::BlobError;

/// Error wrapper translating core failures into bare HTTP statuses.
///
/// Error responses carry no body: a missing object maps to 404,
/// everything else to 500. Nothing is retried at this layer; each
/// request gets exactly one final status.
#[derive(Debug)]
pub struct DepotAxumError(pub anyhow::Error);

impl From<anyhow::Error> for DepotAxumError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl From<BlobError> for DepotAxumError {
    fn from(e: BlobError) -> Self {
        Self(anyhow::Error::new(e))
    }
}

impl From<axum::http::Error> for DepotAxumError {
    fn from(e: axum::http::Error) -> Self {
        Self(anyhow::Error::new(e))
    }
}

impl IntoResponse for DepotAxumError {
    fn into_response(self) -> Response {
        // A BlobError may be wrapped by anyhow contexts; look down the chain
        if let Some(blob) = self.0.chain().find_map(|e| e.downcast_ref::<BlobError>()) {
            if let BlobError::NotFound { id } = blob {
                tracing::debug!(%id, "object not found");
                return StatusCode::NOT_FOUND.into_response();
            }
        }

        tracing::error!(error = ?self.0, "request failed");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
