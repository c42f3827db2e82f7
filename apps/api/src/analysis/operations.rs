//! Analysis Operations: resume scoring, job matching, skill-gap analysis and
//! interview-question generation.
//!
//! Flow per operation: resolve_verified (probe) → render template → one
//! completion call → coerce into the result type, defaulting in full on any
//! parse failure. Only a failed main completion call is reported as an error.
//!
//! Input validation is the caller's job (see `AnalysisRequest::validate`).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::coerce::coerce;
use crate::analysis::prompts::{TemplateId, PROMPT_VERSION};
use crate::analysis::types::{InterviewQuestions, JobMatch, ResumeAnalysis, SkillGap};
use crate::errors::AppError;
use crate::extraction::facts::{extract, ResumeFacts};
use crate::llm_client::selector::resolve_verified;
use crate::llm_client::CompletionClient;

/// Stand-in resume for interview prep when the caller has none.
pub const GENERAL_CANDIDATE: &str = "General candidate";

pub const DEFAULT_MODEL_LABEL: &str = "Groq (Llama-3.1-8B - Fast)";

pub(crate) fn default_model_label() -> String {
    DEFAULT_MODEL_LABEL.to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Requests / results
// ────────────────────────────────────────────────────────────────────────────

/// Either facts already extracted upstream (e.g. from an upload) or raw text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResumeSubject {
    Facts(ResumeFacts),
    Text(String),
}

impl ResumeSubject {
    pub fn into_facts(self) -> ResumeFacts {
        match self {
            ResumeSubject::Facts(facts) => facts,
            ResumeSubject::Text(text) => extract(&text),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisRequest {
    ResumeAnalysis {
        resume: ResumeSubject,
        #[serde(default = "default_model_label")]
        model_choice: String,
    },
    JobMatch {
        resume_text: String,
        job_description: String,
        #[serde(default = "default_model_label")]
        model_choice: String,
    },
    SkillGap {
        resume_text: String,
        target_role: String,
        #[serde(default = "default_model_label")]
        model_choice: String,
    },
    InterviewPrep {
        #[serde(default)]
        resume_text: String,
        job_description: String,
        #[serde(default = "default_model_label")]
        model_choice: String,
    },
}

impl AnalysisRequest {
    /// Caller-side precondition: every required text field is non-blank.
    /// Interview prep is the one kind where the resume may be omitted.
    pub fn validate(&self) -> Result<(), AppError> {
        let required: Vec<(&str, &str)> = match self {
            AnalysisRequest::ResumeAnalysis { resume, .. } => match resume {
                ResumeSubject::Text(text) => vec![("resume", text.as_str())],
                ResumeSubject::Facts(_) => vec![],
            },
            AnalysisRequest::JobMatch {
                resume_text,
                job_description,
                ..
            } => vec![
                ("resume_text", resume_text.as_str()),
                ("job_description", job_description.as_str()),
            ],
            AnalysisRequest::SkillGap {
                resume_text,
                target_role,
                ..
            } => vec![
                ("resume_text", resume_text.as_str()),
                ("target_role", target_role.as_str()),
            ],
            AnalysisRequest::InterviewPrep {
                job_description, ..
            } => vec![("job_description", job_description.as_str())],
        };

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(AppError::Validation(format!("{name} cannot be empty"))),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisResult {
    ResumeAnalysis(ResumeAnalysis),
    JobMatch(JobMatch),
    SkillGap(SkillGap),
    InterviewPrep(InterviewQuestions),
}

// ────────────────────────────────────────────────────────────────────────────
// Analyzer
// ────────────────────────────────────────────────────────────────────────────

/// Stateless beyond its completion client; each call is independent.
#[derive(Clone)]
pub struct Analyzer {
    client: CompletionClient,
}

impl Analyzer {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    pub async fn analyze_resume(
        &self,
        resume: ResumeSubject,
        model_choice: &str,
    ) -> Result<ResumeAnalysis, AppError> {
        let facts = resume.into_facts();
        let resume_data =
            serde_json::to_string(&facts).map_err(|e| AppError::Internal(e.into()))?;

        self.execute(
            "Resume analysis",
            TemplateId::ResumeAnalysis,
            &[("resume_data", resume_data.as_str())],
            model_choice,
            ResumeAnalysis::fallback(),
        )
        .await
    }

    pub async fn job_match(
        &self,
        resume_text: &str,
        job_description: &str,
        model_choice: &str,
    ) -> Result<JobMatch, AppError> {
        self.execute(
            "Job matching",
            TemplateId::JobMatch,
            &[
                ("resume_text", resume_text),
                ("job_description", job_description),
            ],
            model_choice,
            JobMatch::fallback(),
        )
        .await
    }

    pub async fn skill_gap(
        &self,
        resume_text: &str,
        target_role: &str,
        model_choice: &str,
    ) -> Result<SkillGap, AppError> {
        self.execute(
            "Skill gap analysis",
            TemplateId::SkillGap,
            &[("resume_text", resume_text), ("target_role", target_role)],
            model_choice,
            SkillGap::fallback(),
        )
        .await
    }

    pub async fn interview_questions(
        &self,
        resume_text: &str,
        job_description: &str,
        model_choice: &str,
    ) -> Result<InterviewQuestions, AppError> {
        self.execute(
            "Interview question generation",
            TemplateId::InterviewQuestions,
            &[
                ("resume_text", resume_text),
                ("job_description", job_description),
            ],
            model_choice,
            InterviewQuestions::fallback(),
        )
        .await
    }

    /// Dispatches a tagged request to its operation.
    pub async fn run(&self, request: AnalysisRequest) -> Result<AnalysisResult, AppError> {
        match request {
            AnalysisRequest::ResumeAnalysis {
                resume,
                model_choice,
            } => self
                .analyze_resume(resume, &model_choice)
                .await
                .map(AnalysisResult::ResumeAnalysis),
            AnalysisRequest::JobMatch {
                resume_text,
                job_description,
                model_choice,
            } => self
                .job_match(&resume_text, &job_description, &model_choice)
                .await
                .map(AnalysisResult::JobMatch),
            AnalysisRequest::SkillGap {
                resume_text,
                target_role,
                model_choice,
            } => self
                .skill_gap(&resume_text, &target_role, &model_choice)
                .await
                .map(AnalysisResult::SkillGap),
            AnalysisRequest::InterviewPrep {
                resume_text,
                job_description,
                model_choice,
            } => {
                let resume_text = if resume_text.trim().is_empty() {
                    GENERAL_CANDIDATE
                } else {
                    resume_text.as_str()
                };
                self.interview_questions(resume_text, &job_description, &model_choice)
                    .await
                    .map(AnalysisResult::InterviewPrep)
            }
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        template: TemplateId,
        fields: &[(&str, &str)],
        model_choice: &str,
        default: T,
    ) -> Result<T, AppError> {
        let handle = resolve_verified(self.client.backend(), model_choice).await;
        info!(
            "{operation}: model={} verified={} prompt={PROMPT_VERSION}",
            handle.model,
            handle.is_verified()
        );

        let raw = self
            .client
            .complete(template, fields, &handle)
            .await
            .map_err(|e| AppError::Llm(format!("{operation} failed: {e}")))?;

        let coerced = coerce(&raw, default);
        if coerced.is_fallback() {
            warn!("{operation}: model output was not usable JSON, returning default result");
        }
        Ok(coerced.into_inner())
    }
}
