//! Multipart parsing and request-scoped staging of the uploaded resume.

use std::io::Write;
use std::path::Path;

use axum::extract::Multipart;
use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::errors::AppError;

/// Form field carrying the resume file.
pub const RESUME_FIELD: &str = "resume";

/// Largest accepted resume file.
pub const MAX_UPLOAD_BYTES: usize = 32 << 20;

/// Room for boundaries, part headers and small extra fields on top of the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 << 10;

/// Request bodies above this size are rejected before the handler sees them.
pub const MAX_BODY_BYTES: usize = MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES;

const STAGED_PREFIX: &str = "resume-";

/// The uploaded resume as received.
#[derive(Debug)]
pub struct Upload {
    pub filename: String,
    pub data: Bytes,
}

/// Reads the whole form and returns the first `resume` file part.
///
/// Parts without a file name, or with an empty one, do not count as the file.
/// Other fields are drained and ignored so a malformed tail is still reported.
/// A file above `MAX_UPLOAD_BYTES` is rejected like a malformed form.
pub async fn read_resume_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| invalid_form(&e))?
    {
        let filename = match field.name() {
            Some(RESUME_FIELD) => field
                .file_name()
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            _ => None,
        };
        let data = field.bytes().await.map_err(|e| invalid_form(&e))?;

        let Some(filename) = filename else { continue };
        if data.len() > MAX_UPLOAD_BYTES {
            debug!(bytes = data.len(), "Rejected oversized resume");
            return Err(AppError::BadRequest("Invalid multipart form".to_string()));
        }
        if upload.is_none() {
            upload = Some(Upload { filename, data });
        }
    }

    upload.ok_or_else(|| AppError::BadRequest(format!("Missing '{RESUME_FIELD}' file field")))
}

fn invalid_form(err: &axum::extract::multipart::MultipartError) -> AppError {
    debug!("Rejected multipart body: {err}");
    AppError::BadRequest("Invalid multipart form".to_string())
}

/// An upload written to the staging directory. The file is removed when this
/// value is dropped, whichever way the request ends.
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
}

impl StagedFile {
    /// Creates `resume-<random><ext>` in `dir` and writes `data` to it.
    pub fn create(dir: &Path, ext: &str, data: &[u8]) -> Result<Self, AppError> {
        let mut file = tempfile::Builder::new()
            .prefix(STAGED_PREFIX)
            .suffix(ext)
            .tempfile_in(dir)
            .map_err(|e| {
                warn!(dir = %dir.display(), "Failed to create temp file: {e}");
                AppError::Internal("Failed to create temp file".to_string())
            })?;

        file.write_all(data).and_then(|_| file.flush()).map_err(|e| {
            warn!(path = %file.path().display(), "Failed to write temp file: {e}");
            AppError::Internal("Failed to write temp file".to_string())
        })?;

        debug!(path = %file.path().display(), bytes = data.len(), "Staged upload");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
