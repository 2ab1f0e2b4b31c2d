//! Agent implementations.

mod llm;

pub use llm::LlmAgent;
