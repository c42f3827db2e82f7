//! Axum route handlers for resume parsing.

use axum::{extract::Multipart, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extraction::document::{parse_resume, DocumentKind, ResumeInput};
use crate::extraction::facts::{extract, ResumeFacts};

#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

/// POST /api/v1/resume/parse
///
/// Extracts facts from pasted resume text. Empty text is allowed and yields sentinels.
pub async fn handle_parse_text(
    Json(request): Json<ParseTextRequest>,
) -> Result<Json<ResumeFacts>, AppError> {
    Ok(Json(extract(&request.text)))
}

/// POST /api/v1/resume/upload
///
/// Multipart upload with a `file` field. The filename extension picks the reader;
/// anything other than pdf, docx or txt is rejected here. Reader failures are not
/// errors: they come back as placeholder text inside `raw_text`.
pub async fn handle_upload(mut multipart: Multipart) -> Result<Json<ResumeFacts>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let kind = DocumentKind::from_filename(&file_name).ok_or_else(|| {
            AppError::UnsupportedFormat(format!(
                "'{file_name}' is not a supported resume file. Allowed: pdf, docx, txt"
            ))
        })?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let input = ResumeInput::NamedBinary {
            bytes: bytes.to_vec(),
            kind,
        };
        // pdf-extract is synchronous and can be slow on large files.
        let facts = tokio::task::spawn_blocking(move || parse_resume(input))
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

        return Ok(Json(facts));
    }

    Err(AppError::Validation(
        "multipart body must contain a 'file' field".to_string(),
    ))
}
