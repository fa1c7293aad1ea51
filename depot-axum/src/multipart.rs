use anyhow::{anyhow, Context};
use axum::body::to_bytes;
use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use bytes::Bytes;

/// A file payload resolved from a multipart request body
pub struct ResolvedUpload {
    pub data: Bytes,
    pub filename: String,
    pub content_type: String,
}

/// Resolve the first file field of a multipart request into memory.
///
/// Returns `Ok(None)` when the request is not multipart or carries no
/// file field (the caller answers 400); decode failures and bodies over
/// `max_bytes` are errors (the caller answers 500). A field counts as a
/// file when it has a filename or a non-text content type.
pub async fn resolve_file(
    request: Request,
    max_bytes: usize,
) -> anyhow::Result<Option<ResolvedUpload>> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.starts_with("multipart/form-data") {
        return Ok(None);
    }

    let boundary = content_type
        .split("boundary=")
        .nth(1)
        .ok_or_else(|| anyhow!("Missing boundary in multipart content-type"))?
        .to_string();

    let body_bytes = to_bytes(request.into_body(), max_bytes)
        .await
        .context("Failed to read request body")?;

    let mut multipart = multer::Multipart::new(
        futures::stream::once(async move { Ok::<Bytes, multer::Error>(body_bytes) }),
        boundary,
    );

    while let Some(field) = multipart.next_field().await? {
        let filename = field.file_name().map(|f| f.to_string());
        let field_content_type = field.content_type().map(|ct| ct.to_string());

        let is_file = filename.is_some()
            || field_content_type
                .as_ref()
                .map_or(false, |ct| !ct.starts_with("text/"));
        if !is_file {
            continue;
        }

        let data = field.bytes().await.context("Failed to read file field")?;
        return Ok(Some(ResolvedUpload {
            data,
            filename: filename.unwrap_or_else(|| "upload".to_string()),
            content_type: field_content_type
                .unwrap_or_else(|| "application/octet-stream".to_string()),
        }));
    }

    Ok(None)
}
