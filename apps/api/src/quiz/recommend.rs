//! LLM-backed quiz recommendations with canned fallbacks.

use tracing::warn;

use crate::llm_client::output::first_lines;
use crate::llm_client::prompts::PLAIN_TEXT_INSTRUCTION;
use crate::llm_client::{LlmError, TextGenerator};
use crate::quiz::prompts::{RECOMMENDATION_PARAMS, RECOMMENDATION_PROMPT_TEMPLATE};
use crate::quiz::scoring::{
    brief_recommendation, fallback_recommendation, performance_summary, Score, SkillScore,
};

const RECOMMENDATION_LINES: usize = 5;

pub fn build_prompt(score: &Score, breakdown: &[SkillScore]) -> String {
    let prompt = RECOMMENDATION_PROMPT_TEMPLATE
        .replace("{score}", &format!("{:.1}", score.percentage))
        .replace("{correct}", &score.correct.to_string())
        .replace("{total}", &score.total.to_string())
        .replace("{performance}", performance_summary(breakdown).trim_end());
    format!("{prompt}\n{PLAIN_TEXT_INSTRUCTION}")
}

/// Never fails: without a generator, or when the call errors, the tiered
/// canned text for `skill` is returned instead.
pub async fn recommend(
    generator: Option<&dyn TextGenerator>,
    skill: &str,
    score: &Score,
    breakdown: &[SkillScore],
) -> String {
    let Some(generator) = generator else {
        return fallback_recommendation(skill, score.percentage);
    };

    let prompt = build_prompt(score, breakdown);
    match generator.generate(&prompt, &RECOMMENDATION_PARAMS).await {
        Ok(text) => first_lines(text.trim(), RECOMMENDATION_LINES),
        Err(LlmError::EmptyContent) => brief_recommendation(skill, score.percentage),
        Err(e) => {
            warn!(
                "Recommendation generation via {} failed, using fallback: {e}",
                generator.provider()
            );
            fallback_recommendation(skill, score.percentage)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubGenerator;
    use crate::llm_client::LlmProvider;
    use crate::quiz::scoring::{score, skill_breakdown, AnswerRecord};

    fn answers() -> Vec<AnswerRecord> {
        vec![
            AnswerRecord {
                skill: Some("Python".into()),
                correct: true,
                ..Default::default()
            },
            AnswerRecord {
                skill: Some("Python".into()),
                correct: false,
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_build_prompt_fills_placeholders() {
        let a = answers();
        let prompt = build_prompt(&score(&a), &skill_breakdown(&a));
        assert!(prompt.contains("Overall Score: 50.0% (1/2)"));
        assert!(prompt.contains("Python: 1/2 (50.0%)"));
        assert!(!prompt.contains('{'));
    }

    #[tokio::test]
    async fn test_recommend_without_generator_uses_fallback() {
        let a = answers();
        let text = recommend(None, "Python", &score(&a), &skill_breakdown(&a)).await;
        assert_eq!(text, fallback_recommendation("Python", 50.0));
    }

    #[tokio::test]
    async fn test_recommend_keeps_five_lines() {
        let stub = StubGenerator::replying(LlmProvider::Google, "1\n2\n3\n4\n5\n6\n7");
        let a = answers();
        let text = recommend(Some(stub.as_ref()), "Python", &score(&a), &skill_breakdown(&a)).await;
        assert_eq!(text, "1\n2\n3\n4\n5");
    }

    #[tokio::test]
    async fn test_recommend_empty_content_uses_brief_text() {
        let stub = StubGenerator::replying(LlmProvider::Nvidia, "   ");
        let a = answers();
        let text = recommend(Some(stub.as_ref()), "Python", &score(&a), &skill_breakdown(&a)).await;
        assert_eq!(text, brief_recommendation("Python", 50.0));
    }

    #[tokio::test]
    async fn test_recommend_error_uses_fallback() {
        let stub = StubGenerator::failing(LlmProvider::Nvidia);
        let a = answers();
        let text = recommend(Some(stub.as_ref()), "Python", &score(&a), &skill_breakdown(&a)).await;
        assert_eq!(text, fallback_recommendation("Python", 50.0));
    }
}
