// Candidate evaluation pipeline.
// Criteria extraction → scoring → ranking → outcome drafting.
// All inference goes through llm_client::Inference; every failure degrades to a value.

pub mod drafting;
pub mod handlers;
pub mod matching;
pub mod models;
pub mod prompts;
pub mod ranking;
pub mod repair;
pub mod rubric;
pub mod scoring;
