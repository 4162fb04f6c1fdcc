//! POST /generate: resume upload to structured JSON profile.
//!
//! upload → stage → extract → prompt → one upstream call → relay.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extract::{extract_blocking, file_extension, DocumentKind};
use crate::llm_client::prompts::build_resume_prompt;
use crate::state::AppState;
use crate::upload::{read_resume_upload, StagedFile};

/// POST /generate
///
/// The API key is checked before the body is read, so a misconfigured server
/// answers 500 whatever the request looks like.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let api_key = state.config.gemini_api_key.as_deref().ok_or_else(|| {
        AppError::MissingConfig("Server misconfigured: missing GEMINI_API_KEY".to_string())
    })?;

    let multipart = multipart.map_err(|rejection| {
        debug!("Rejected multipart request: {rejection}");
        AppError::BadRequest("Invalid multipart form".to_string())
    })?;

    let upload = read_resume_upload(multipart).await?;
    let ext = file_extension(&upload.filename);
    let extractor = DocumentKind::from_extension(&ext)
        .extractor()
        .ok_or_else(|| AppError::BadRequest("Unsupported file type. Use .pdf or .docx".to_string()))?;

    let staged = StagedFile::create(&state.config.staging_dir, &ext, &upload.data)?;
    drop(upload);

    let extracted = extract_blocking(extractor, staged.path())
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to extract text: {e}")));
    // The staged copy is not needed past extraction.
    drop(staged);
    let extracted = extracted?;

    if extracted.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Failed to extract text from file".to_string(),
        ));
    }
    debug!(chars = extracted.len(), "Extracted resume text");

    let prompt = build_resume_prompt(&extracted);
    let body = state.llm.generate_content(api_key, &prompt).await?;

    info!(bytes = body.len(), "Relaying generated profile");
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
