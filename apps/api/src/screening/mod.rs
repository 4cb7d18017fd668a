// Résumé screening: JD structuring, skill extraction, weighted scoring,
// the batch pipeline that ties them together, and LLM follow-ups.
// Scoring never calls the LLM; only `coaching` goes through llm_client.

pub mod coaching;
pub mod extractor;
pub mod handlers;
pub mod jd_parser;
pub mod pipeline;
pub mod prompts;
pub mod scorer;
