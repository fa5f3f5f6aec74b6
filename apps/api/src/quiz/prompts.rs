// LLM prompt templates for quiz recommendations.

use crate::llm_client::GenerationParams;

pub const RECOMMENDATION_PARAMS: GenerationParams = GenerationParams::new(512, 0.3, 0.8);

/// Replace `{score}`, `{correct}`, `{total}` and `{performance}` before sending.
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = "\
Based on the following skill assessment performance, provide personalized recommendations for improvement in exactly 5 lines of plain text without any markdown formatting:

Overall Score: {score}% ({correct}/{total})

Performance by Skill:
{performance}

Please provide exactly 5 lines of plain text recommendations. Keep recommendations concise and actionable.";
