// Skill assessment: static question bank, option table, scoring and
// recommendations. LLM calls go through llm_client only.

pub mod bank;
pub mod catalog;
pub mod handlers;
pub mod options;
pub mod prompts;
pub mod recommend;
pub mod scoring;
