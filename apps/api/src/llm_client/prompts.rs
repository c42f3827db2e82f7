// Shared prompt constants for the LLM client itself.
// Per-operation templates live alongside the analysis operations.

/// Minimal completion used to check that a model is currently servable.
pub const PROBE_PROMPT: &str = "Say 'test'";
