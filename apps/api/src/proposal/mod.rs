// Proposal generation: form validation, prompt building and the download endpoints.
// All text generation goes through llm_client::TextGenerator.

pub mod handlers;
pub mod models;
pub mod prompts;
