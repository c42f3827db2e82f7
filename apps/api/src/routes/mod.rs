pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::extraction::handlers as extraction;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume parsing
        .route("/api/v1/resume/parse", post(extraction::handle_parse_text))
        .route("/api/v1/resume/upload", post(extraction::handle_upload))
        // Analysis
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        .route(
            "/api/v1/analyze/resume",
            post(analysis::handle_resume_analysis),
        )
        .route("/api/v1/analyze/job-match", post(analysis::handle_job_match))
        .route("/api/v1/analyze/skill-gap", post(analysis::handle_skill_gap))
        .route("/api/v1/analyze/interview", post(analysis::handle_interview))
        .with_state(state)
}
