// Resume ingestion: raw text or uploaded documents → structured facts.
// No LLM calls here.

pub mod document;
pub mod facts;
pub mod handlers;
