//! Model Selector: maps a user-facing model label to a concrete Groq model.
//!
//! `resolve` is pure and total. `resolve_verified` adds a liveness probe and
//! falls back to the lightweight model when the probe fails, so callers always
//! get *some* usable handle.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm_client::prompts::PROBE_PROMPT;
use crate::llm_client::CompletionBackend;

/// Lightweight model. Also the safe default and the probe fallback.
pub const FAST_MODEL: &str = "llama-3.1-8b-instant";
/// Heavyweight model.
pub const POWERFUL_MODEL: &str = "llama-3.1-70b-versatile";

const FAST_MARKERS: &[&str] = &["8b", "fast", "lite", "instant"];
const POWERFUL_MARKERS: &[&str] = &["70b", "powerful", "large", "versatile"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelChoice {
    #[default]
    Fast,
    Powerful,
}

impl ModelChoice {
    /// Markers match whole alphanumeric tokens of the label, so "elite" is not
    /// "lite". Fast markers win over powerful ones; anything unrecognised is `Fast`.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        let tokens: Vec<&str> = label
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();
        let has_any = |markers: &[&str]| tokens.iter().any(|t| markers.contains(t));

        if has_any(FAST_MARKERS) {
            ModelChoice::Fast
        } else if has_any(POWERFUL_MARKERS) {
            ModelChoice::Powerful
        } else {
            ModelChoice::Fast
        }
    }

    pub fn model_id(self) -> &'static str {
        match self {
            ModelChoice::Fast => FAST_MODEL,
            ModelChoice::Powerful => POWERFUL_MODEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleStatus {
    /// Not probed, or the probe failed and this is the fallback.
    Unverified,
    /// A liveness probe against this model succeeded.
    Verified,
}

/// A concrete model identifier plus whether it is known to be servable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelHandle {
    pub model: String,
    pub status: HandleStatus,
}

impl ModelHandle {
    fn unverified(model: &str) -> Self {
        Self {
            model: model.to_string(),
            status: HandleStatus::Unverified,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.status == HandleStatus::Verified
    }
}

pub fn resolve(label: &str) -> ModelHandle {
    ModelHandle::unverified(ModelChoice::from_label(label).model_id())
}

/// Resolves the label, then probes the model with a trivial completion.
///
/// Never fails: on any probe error the reason is logged and the lightweight
/// handle is returned. No retry.
pub async fn resolve_verified(backend: &dyn CompletionBackend, label: &str) -> ModelHandle {
    let handle = resolve(label);

    match backend.complete(&handle.model, PROBE_PROMPT).await {
        Ok(_) => {
            debug!("Model {} passed liveness probe", handle.model);
            ModelHandle {
                status: HandleStatus::Verified,
                ..handle
            }
        }
        Err(e) => {
            warn!(
                "Model {} unavailable, falling back to {}. Error: {}",
                handle.model, FAST_MODEL, e
            );
            ModelHandle::unverified(FAST_MODEL)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails every call for one model, succeeds for the rest.
    struct FlakyBackend {
        broken_model: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionBackend for FlakyBackend {
        async fn complete(&self, model: &str, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if model == self.broken_model {
                Err(LlmError::Api {
                    status: 404,
                    message: format!("model {model} does not exist"),
                })
            } else {
                Ok("test".to_string())
            }
        }
    }

    struct DeadBackend;

    #[async_trait]
    impl CompletionBackend for DeadBackend {
        async fn complete(&self, _model: &str, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    #[test]
    fn test_fast_and_powerful_labels_resolve_to_distinct_handles() {
        let fast = resolve("Groq (Llama-3.1-8B - Fast)");
        let powerful = resolve("Groq (Llama-3.1-70B - Powerful)");
        assert_eq!(fast.model, FAST_MODEL);
        assert_eq!(powerful.model, POWERFUL_MODEL);
        assert_ne!(fast, powerful);
    }

    #[test]
    fn test_unrecognized_label_defaults_to_fast() {
        assert_eq!(resolve("unrecognized label").model, FAST_MODEL);
        assert_eq!(resolve("").model, FAST_MODEL);
    }

    #[test]
    fn test_marker_matching_is_case_insensitive() {
        assert_eq!(ModelChoice::from_label("POWERFUL"), ModelChoice::Powerful);
        assert_eq!(ModelChoice::from_label("large model"), ModelChoice::Powerful);
        assert_eq!(ModelChoice::from_label("lite"), ModelChoice::Fast);
    }

    #[test]
    fn test_markers_match_whole_tokens_only() {
        assert_eq!(
            ModelChoice::from_label("Elite 70B Powerful"),
            ModelChoice::Powerful
        );
        assert_eq!(ModelChoice::from_label("satellite"), ModelChoice::Fast);
        assert_eq!(ModelChoice::from_label("llama-3.1-8b-instant"), ModelChoice::Fast);
        assert_eq!(
            ModelChoice::from_label("llama-3.1-70b-versatile"),
            ModelChoice::Powerful
        );
        assert_eq!(ModelChoice::from_label("Gemini Lite"), ModelChoice::Fast);
    }

    #[test]
    fn test_resolve_is_unverified() {
        assert!(!resolve("Fast").is_verified());
    }

    #[tokio::test]
    async fn test_resolve_verified_marks_handle_verified_on_probe_success() {
        let backend = FlakyBackend {
            broken_model: "none",
            calls: AtomicUsize::new(0),
        };
        let handle = resolve_verified(&backend, "Groq (Llama-3.1-70B - Powerful)").await;
        assert_eq!(handle.model, POWERFUL_MODEL);
        assert!(handle.is_verified());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolve_verified_falls_back_without_retry() {
        let backend = FlakyBackend {
            broken_model: POWERFUL_MODEL,
            calls: AtomicUsize::new(0),
        };
        let handle = resolve_verified(&backend, "Groq (Llama-3.1-70B - Powerful)").await;
        assert_eq!(handle.model, FAST_MODEL);
        assert!(!handle.is_verified());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolve_verified_always_returns_a_handle() {
        let handle = resolve_verified(&DeadBackend, "Groq (Llama-3.1-8B - Fast)").await;
        assert_eq!(handle.model, FAST_MODEL);
    }
}
