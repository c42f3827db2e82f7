// LLM-assisted analysis: resume scoring, job matching, skill gaps, interview prep.
// All completion calls go through llm_client; nothing here talks HTTP to Groq.

pub mod coerce;
pub mod handlers;
pub mod operations;
pub mod prompts;
pub mod types;
