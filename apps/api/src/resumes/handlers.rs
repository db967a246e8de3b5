use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{analyze_resume, AnalysisOutcome};
use crate::errors::AppError;
use crate::extraction::{extract_from_pages, extract_resume, PdfTextItem, ResumeDocument, TextRun};
use crate::ingest::{UploadRecord, UploadedFile};
use crate::lint::{lint_resume, LintReport};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct ReflowRequest {
    pub pages: Vec<Vec<PdfTextItem>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: String,
    /// Structured form of `resume_text`; re-extracted when absent.
    #[serde(default)]
    pub document: Option<ResumeDocument>,
}

#[derive(Serialize)]
pub struct StructuredResponse {
    pub document: ResumeDocument,
    pub lint: LintReport,
}

impl StructuredResponse {
    fn new(document: ResumeDocument) -> Self {
        let lint = lint_resume(&document);
        StructuredResponse { document, lint }
    }
}

#[derive(Serialize)]
pub struct ReflowResponse {
    pub text: String,
    pub document: ResumeDocument,
    pub lint: LintReport,
}

#[derive(Serialize)]
pub struct CurrentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadRecord>,
    pub document: ResumeDocument,
    pub lint: LintReport,
}

/// POST /api/v1/resumes/extract
pub async fn handle_extract(Json(req): Json<ExtractRequest>) -> Json<StructuredResponse> {
    Json(StructuredResponse::new(extract_resume(&req.text)))
}

/// POST /api/v1/resumes/reflow
pub async fn handle_reflow(Json(req): Json<ReflowRequest>) -> Json<ReflowResponse> {
    let pages: Vec<Vec<TextRun>> = req
        .pages
        .into_iter()
        .map(|page| page.into_iter().map(TextRun::from).collect())
        .collect();
    let (text, document) = extract_from_pages(&pages);
    let lint = lint_resume(&document);
    Json(ReflowResponse {
        text,
        document,
        lint,
    })
}

/// POST /api/v1/resumes/lint
pub async fn handle_lint(Json(document): Json<ResumeDocument>) -> Json<LintReport> {
    Json(lint_resume(&document))
}

async fn read_upload(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or("resume").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        return Ok(UploadedFile {
            name,
            content_type,
            bytes,
        });
    }
    Err(AppError::Validation(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}

/// POST /api/v1/resumes/upload
///
/// Replaces the current resume. Both records are written; a concurrent
/// upload may interleave, and each record keeps the last write.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CurrentResponse>, AppError> {
    let file = read_upload(&mut multipart).await?;
    let kind = file.validate(state.config.max_upload_bytes)?;

    // pdf parsing is CPU-bound
    let (file, text) = tokio::task::spawn_blocking(move || {
        let text = file.extract_text(kind);
        (file, text)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in upload: {e}")))?;

    let document = extract_resume(&text);
    let upload = UploadRecord::new(&file, text);
    state.store.save_upload(&upload).await?;
    state.store.save(&document).await?;

    info!(
        "Stored upload {} ({} bytes, {:?}): {} jobs, {} education entries",
        upload.name,
        upload.size,
        kind,
        document.experience.len(),
        document.education.len()
    );

    let lint = lint_resume(&document);
    Ok(Json(CurrentResponse {
        upload: Some(upload),
        document,
        lint,
    }))
}

/// GET /api/v1/resumes/current
pub async fn handle_get_current(
    State(state): State<AppState>,
) -> Result<Json<CurrentResponse>, AppError> {
    let document = state
        .store
        .load()
        .await?
        .ok_or_else(|| AppError::NotFound("No resume has been uploaded".to_string()))?;
    let upload = state.store.load_upload().await?;
    let lint = lint_resume(&document);
    Ok(Json(CurrentResponse {
        upload,
        document,
        lint,
    }))
}

/// PUT /api/v1/resumes/current
pub async fn handle_put_current(
    State(state): State<AppState>,
    Json(document): Json<ResumeDocument>,
) -> Result<Json<StructuredResponse>, AppError> {
    state.store.save(&document).await?;
    Ok(Json(StructuredResponse::new(document)))
}

/// DELETE /api/v1/resumes/current
pub async fn handle_delete_current(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resumes/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisOutcome>, AppError> {
    if req.resume_text.trim().is_empty() {
        return Err(AppError::Validation("Resume text is required".to_string()));
    }
    let document = req
        .document
        .unwrap_or_else(|| extract_resume(&req.resume_text));
    let outcome = analyze_resume(state.llm.as_deref(), &document, &req.resume_text).await;
    Ok(Json(outcome))
}
