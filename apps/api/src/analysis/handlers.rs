//! Axum route handlers for the Analysis API.
//!
//! Handlers own the caller-side preconditions (non-empty fields); the
//! operations themselves never validate.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::operations::{
    default_model_label, AnalysisRequest, AnalysisResult, ResumeSubject,
};
use crate::analysis::types::{InterviewQuestions, JobMatch, ResumeAnalysis, SkillGap};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request bodies for the per-operation routes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResumeAnalysisBody {
    pub resume: ResumeSubject,
    #[serde(default = "default_model_label")]
    pub model_choice: String,
}

#[derive(Debug, Deserialize)]
pub struct JobMatchBody {
    pub resume_text: String,
    pub job_description: String,
    #[serde(default = "default_model_label")]
    pub model_choice: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillGapBody {
    pub resume_text: String,
    pub target_role: String,
    #[serde(default = "default_model_label")]
    pub model_choice: String,
}

#[derive(Debug, Deserialize)]
pub struct InterviewBody {
    #[serde(default)]
    pub resume_text: String,
    pub job_description: String,
    #[serde(default = "default_model_label")]
    pub model_choice: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Generic entry point: body tagged with `kind`, response tagged the same way.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    request.validate()?;
    let result = state.analyzer.run(request).await?;
    Ok(Json(result))
}

/// POST /api/v1/analyze/resume
pub async fn handle_resume_analysis(
    State(state): State<AppState>,
    Json(body): Json<ResumeAnalysisBody>,
) -> Result<Json<ResumeAnalysis>, AppError> {
    let request = AnalysisRequest::ResumeAnalysis {
        resume: body.resume,
        model_choice: body.model_choice,
    };
    match dispatch(&state, request).await? {
        AnalysisResult::ResumeAnalysis(result) => Ok(Json(result)),
        other => Err(mismatched(other)),
    }
}

/// POST /api/v1/analyze/job-match
pub async fn handle_job_match(
    State(state): State<AppState>,
    Json(body): Json<JobMatchBody>,
) -> Result<Json<JobMatch>, AppError> {
    let request = AnalysisRequest::JobMatch {
        resume_text: body.resume_text,
        job_description: body.job_description,
        model_choice: body.model_choice,
    };
    match dispatch(&state, request).await? {
        AnalysisResult::JobMatch(result) => Ok(Json(result)),
        other => Err(mismatched(other)),
    }
}

/// POST /api/v1/analyze/skill-gap
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    Json(body): Json<SkillGapBody>,
) -> Result<Json<SkillGap>, AppError> {
    let request = AnalysisRequest::SkillGap {
        resume_text: body.resume_text,
        target_role: body.target_role,
        model_choice: body.model_choice,
    };
    match dispatch(&state, request).await? {
        AnalysisResult::SkillGap(result) => Ok(Json(result)),
        other => Err(mismatched(other)),
    }
}

/// POST /api/v1/analyze/interview
///
/// The resume is optional here; a blank one is analysed as a general candidate.
pub async fn handle_interview(
    State(state): State<AppState>,
    Json(body): Json<InterviewBody>,
) -> Result<Json<InterviewQuestions>, AppError> {
    let request = AnalysisRequest::InterviewPrep {
        resume_text: body.resume_text,
        job_description: body.job_description,
        model_choice: body.model_choice,
    };
    match dispatch(&state, request).await? {
        AnalysisResult::InterviewPrep(result) => Ok(Json(result)),
        other => Err(mismatched(other)),
    }
}

async fn dispatch(state: &AppState, request: AnalysisRequest) -> Result<AnalysisResult, AppError> {
    request.validate()?;
    state.analyzer.run(request).await
}

fn mismatched(result: AnalysisResult) -> AppError {
    AppError::Internal(anyhow::anyhow!(
        "analysis dispatch returned an unexpected result: {result:?}"
    ))
}
