use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::header::{
    ACCEPT_RANGES, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, RANGE,
};
use axum::http::{HeaderMap, Response, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use depot_blob::{BlobId, DownloadReply};
use futures::TryStreamExt;
use serde::Serialize;

use crate::multipart::resolve_file;
use crate::{AppState, DepotAxumError};

#[derive(Serialize)]
struct UploadResponse {
    id: BlobId,
}

/// `POST /files` - commit a multipart file payload as a new object
pub async fn upload(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response<Body>, DepotAxumError> {
    let Some(file) = resolve_file(request, state.max_upload_bytes).await? else {
        tracing::debug!("upload carried no resolvable file payload");
        return Ok(StatusCode::BAD_REQUEST.into_response());
    };

    let receipt = state
        .uploads
        .commit(file.data, &file.filename, &file.content_type)
        .await?;

    Ok((StatusCode::CREATED, Json(UploadResponse { id: receipt.id })).into_response())
}

/// `GET /files/{id}` - stream an object, honoring an optional `Range` header
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response<Body>, DepotAxumError> {
    let range_header = headers.get(RANGE).and_then(|v| v.to_str().ok());

    match state.downloads.fetch(&id, range_header).await? {
        DownloadReply::NotFound => Ok(StatusCode::NOT_FOUND.into_response()),

        DownloadReply::NotSatisfiable { length } => Ok(Response::builder()
            .status(StatusCode::RANGE_NOT_SATISFIABLE)
            .header(CONTENT_RANGE, format!("bytes */{length}"))
            .body(Body::empty())?),

        DownloadReply::Full { info, stream } => {
            let stream = stream.inspect_err(log_aborted_stream);
            Ok(Response::builder()
                .status(StatusCode::OK)
                .header(CONTENT_TYPE, info.metadata.content_type)
                .header(CONTENT_LENGTH, info.length)
                .header(ACCEPT_RANGES, "bytes")
                .body(Body::from_stream(stream))?)
        }

        DownloadReply::Partial {
            info,
            window,
            stream,
        } => {
            let stream = stream.inspect_err(log_aborted_stream);
            Ok(Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(CONTENT_TYPE, info.metadata.content_type)
                .header(
                    CONTENT_RANGE,
                    format!("bytes {}-{}/{}", window.start, window.end, info.length),
                )
                // declared_len carries the start == end quirk; see ByteWindow
                .header(CONTENT_LENGTH, window.declared_len())
                .header(ACCEPT_RANGES, "bytes")
                .header(CACHE_CONTROL, "no-cache")
                .body(Body::from_stream(stream))?)
        }
    }
}

// Headers are already committed when a mid-stream store error surfaces;
// the connection is dropped and the failure only shows up here.
fn log_aborted_stream(err: &std::io::Error) {
    tracing::warn!(%err, "store stream failed mid-response, aborting connection");
}
