use axum::{
    extract::{Multipart, Path, State},
    http::HeaderMap,
};
use serde_json::json;

use crate::{
    backend::UploadFile,
    libs::{parse_multipart, FilePart},
    AdminError, AdminResult, AppState, Response, ResponseResult,
};

/// Upper bound for a single measurement document
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

fn content_type(file: &FilePart) -> Option<mime::Mime> {
    if let Some(ty) = file.content_type.as_deref().and_then(|c| c.parse().ok()) {
        return Some(ty);
    }
    let ext = file.filename().rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some(mime::APPLICATION_PDF),
        "png" => Some(mime::IMAGE_PNG),
        "jpg" | "jpeg" => Some(mime::IMAGE_JPEG),
        "gif" => Some(mime::IMAGE_GIF),
        "bmp" => Some(mime::IMAGE_BMP),
        _ => None,
    }
}

/// Only images and PDFs up to [`MAX_FILE_SIZE`] may be uploaded.
pub fn check_upload(file: FilePart) -> AdminResult<UploadFile> {
    let ty = content_type(&file)
        .filter(|ty| ty.type_() == mime::IMAGE || ty.essence_str() == mime::APPLICATION_PDF.essence_str())
        .ok_or_else(|| AdminError::validation("Only images and PDF files are allowed"))?;
    if file.bytes.len() > MAX_FILE_SIZE {
        return Err(AdminError::validation(format!(
            "File {} is too large. Maximum size is 5MB",
            file.filename()
        )));
    }
    Ok(UploadFile {
        name: file.filename().to_owned(),
        content_type: ty.essence_str().to_owned(),
        bytes: file.bytes,
    })
}

pub async fn upload_files(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let files = parse_multipart(multipart).await?;
    if files.is_empty() {
        return Err(AdminError::validation("Please select at least one file").into());
    }
    let uploads = files
        .into_iter()
        .map(check_upload)
        .collect::<AdminResult<Vec<_>>>()?;
    let files = state
        .backend
        .upload_measurement_files(session.token(), &id, uploads)
        .await?;
    tracing::info!(customer = %id, count = files.len(), "measurement files uploaded");
    Ok(Response::ok(json!({
        "message": "Files uploaded successfully",
        "files": files
    })))
}

pub async fn remove_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    state
        .backend
        .remove_measurement_file(session.token(), &id)
        .await?;
    Ok(Response::done("File removed successfully"))
}
