// Resume upload, skill extraction, LLM analysis and interview practice.

pub mod analysis;
pub mod handlers;
pub mod interview;
pub mod parser;
pub mod prompts;
pub mod skills;
