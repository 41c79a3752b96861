//! Axum route handlers for the Validation API.

use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::validation::models::{FormSubmission, ValidationVerdict};
use crate::validation::upload::extract_resume_text;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCvRequest {
    pub form_data: FormSubmission,
    pub resume_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/validation/validate
///
/// Validates a form submission against already-extracted resume text.
pub async fn handle_validate(
    State(state): State<AppState>,
    payload: Result<Json<ValidateCvRequest>, JsonRejection>,
) -> Result<Json<ValidationVerdict>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let validation_id = Uuid::new_v4();

    let verdict = state
        .engine
        .validate(&request.form_data, &request.resume_text)
        .instrument(info_span!("validate_cv", %validation_id))
        .await?;

    Ok(Json(verdict))
}

/// POST /api/v1/validation/upload
///
/// Multipart form with a `cv` PDF and a `formData` JSON field. The PDF's text
/// layer is extracted and run through the same pipeline as `/validate`.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ValidationVerdict>, AppError> {
    let mut pdf: Option<Bytes> = None;
    let mut form: Option<FormSubmission> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("cv") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(multipart_error)?;
                pdf = Some(bytes);
            }
            Some("formData") => {
                let text = field
                    .text()
                    .await
                    .map_err(multipart_error)?;
                let parsed = serde_json::from_str(&text)
                    .map_err(|e| AppError::Validation(format!("formData is not valid: {e}")))?;
                form = Some(parsed);
            }
            _ => {}
        }
    }

    let pdf = pdf.ok_or_else(|| AppError::Validation("cv file is required".to_string()))?;
    let form = form.ok_or_else(|| AppError::Validation("formData is required".to_string()))?;

    let validation_id = Uuid::new_v4();
    let max_bytes = state.config.validation.max_upload_bytes;

    // PDF parsing is CPU-bound and may panic on hostile input; keep it off the runtime.
    let resume_text = tokio::task::spawn_blocking(move || extract_resume_text(&pdf, max_bytes))
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("PDF extraction aborted: {e}")))??;

    let verdict = state
        .engine
        .validate(&form, &resume_text)
        .instrument(info_span!("validate_cv_upload", %validation_id))
        .await?;

    Ok(Json(verdict))
}

/// Body-limit rejections keep their 413; anything else is a malformed request.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}
