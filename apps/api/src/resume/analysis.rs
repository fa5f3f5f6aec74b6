//! LLM-backed resume analysis with canned fallbacks.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::llm_client::output::{first_lines, numbered_items, strip_json_fences};
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, PLAIN_TEXT_INSTRUCTION};
use crate::llm_client::{LlmError, TextGenerator};
use crate::resume::prompts::{
    ANALYSIS_PARAMS, ANALYSIS_PROMPT_TEMPLATE, ANSWER_PARAMS, ANSWER_PROMPT_TEMPLATE,
    FEEDBACK_PARAMS, FEEDBACK_PROMPT_TEMPLATE, QUESTIONS_PARAMS, QUESTIONS_PROMPT_TEMPLATE,
};

const MAX_RESUME_QUESTIONS: usize = 10;
const ANSWER_LINES: usize = 3;
const FEEDBACK_LINES: usize = 6;

pub const FALLBACK_QUESTIONS: [&str; 10] = [
    "What motivated you to pursue a career in technology?",
    "Can you describe a challenging project you worked on and how you overcame obstacles?",
    "What programming languages or technologies mentioned in your resume are you most proficient in?",
    "How do you stay updated with the latest trends in technology?",
    "Describe a situation where you had to work in a team to solve a technical problem.",
    "What is your approach to debugging complex issues in code?",
    "How do you prioritize tasks when working on multiple projects?",
    "What tools or methodologies do you use for version control and collaboration?",
    "Can you explain a technical concept from your resume in simple terms?",
    "What are your career goals in the technology field?",
];

pub const FALLBACK_ANSWER: &str =
    "I don't have enough information in the resume to provide a specific answer to that question.";

pub const FALLBACK_FEEDBACK: &str = "Based on your responses, I recommend focusing on clearly articulating your technical skills and experiences. Practice explaining complex concepts in simple terms and provide specific examples from your projects to demonstrate your capabilities.";

/// Returned instead of an LLM reply when the provider has no API key.
pub const API_UNAVAILABLE_MESSAGE: &str =
    "I'm unable to access the AI API at the moment. Please check your API key configuration.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionAnswer {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

pub fn fallback_questions() -> Vec<String> {
    FALLBACK_QUESTIONS.iter().map(|q| q.to_string()).collect()
}

/// Structured analysis when the model returns a JSON object, otherwise its
/// raw text under `"analysis"`. Generation errors propagate.
pub async fn analyze_resume(generator: &dyn TextGenerator, resume_text: &str) -> Result<Value, LlmError> {
    let prompt = format!(
        "{}\n\n{JSON_ONLY_INSTRUCTION}",
        ANALYSIS_PROMPT_TEMPLATE.replace("{resume}", resume_text)
    );
    let raw = generator.generate(&prompt, &ANALYSIS_PARAMS).await?;

    match serde_json::from_str::<Value>(strip_json_fences(&raw)) {
        Ok(value @ Value::Object(_)) => Ok(value),
        _ => Ok(json!({ "analysis": raw })),
    }
}

pub async fn generate_resume_questions(generator: &dyn TextGenerator, resume_text: &str) -> Vec<String> {
    let prompt = QUESTIONS_PROMPT_TEMPLATE.replace("{resume}", resume_text);
    match generator.generate(&prompt, &QUESTIONS_PARAMS).await {
        Ok(text) => {
            let questions = numbered_items(&text, MAX_RESUME_QUESTIONS);
            if questions.is_empty() {
                warn!("Model reply contained no numbered questions, using fallback");
                fallback_questions()
            } else {
                questions
            }
        }
        Err(e) => {
            warn!("Question generation via {} failed, using fallback: {e}", generator.provider());
            fallback_questions()
        }
    }
}

/// The resume is substituted last so braces inside it are left alone.
fn answer_prompt(resume_text: &str, question: &str) -> String {
    format!(
        "{}\n\n{PLAIN_TEXT_INSTRUCTION}",
        ANSWER_PROMPT_TEMPLATE
            .replace("{question}", question)
            .replace("{resume}", resume_text)
    )
}

pub async fn answer_question(generator: &dyn TextGenerator, resume_text: &str, question: &str) -> String {
    let prompt = answer_prompt(resume_text, question);
    match generator.generate(&prompt, &ANSWER_PARAMS).await {
        Ok(text) => first_lines(text.trim(), ANSWER_LINES),
        Err(e) => {
            warn!("Answer generation via {} failed: {e}", generator.provider());
            FALLBACK_ANSWER.to_string()
        }
    }
}

/// "Question i: ..\nAnswer i: .." for each pair, 1-based.
pub fn format_qa(pairs: &[QuestionAnswer]) -> String {
    pairs
        .iter()
        .enumerate()
        .map(|(i, qa)| format!("Question {n}: {}\nAnswer {n}: {}", qa.question, qa.answer, n = i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn feedback_prompt(resume_text: &str, pairs: &[QuestionAnswer]) -> String {
    format!(
        "{}\n{PLAIN_TEXT_INSTRUCTION}",
        FEEDBACK_PROMPT_TEMPLATE
            .replace("{qa}", &format_qa(pairs))
            .replace("{resume}", resume_text)
    )
}

pub async fn analyze_responses(
    generator: &dyn TextGenerator,
    resume_text: &str,
    pairs: &[QuestionAnswer],
) -> String {
    let prompt = feedback_prompt(resume_text, pairs);
    match generator.generate(&prompt, &FEEDBACK_PARAMS).await {
        Ok(text) => first_lines(text.trim(), FEEDBACK_LINES),
        Err(e) => {
            warn!("Feedback generation via {} failed: {e}", generator.provider());
            FALLBACK_FEEDBACK.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubGenerator;
    use crate::llm_client::LlmProvider;

    #[tokio::test]
    async fn test_analyze_resume_parses_fenced_json() {
        let stub = StubGenerator::replying(
            LlmProvider::Nvidia,
            "```json\n{\"skills\": [\"Rust\"], \"assessment\": \"solid\", \"questions\": []}\n```",
        );
        let value = analyze_resume(stub.as_ref(), "Rust developer").await.unwrap();
        assert_eq!(value["skills"][0], "Rust");
        assert_eq!(value["assessment"], "solid");
    }

    #[tokio::test]
    async fn test_analyze_resume_wraps_plain_text() {
        let stub = StubGenerator::replying(LlmProvider::Google, "The candidate knows Rust.");
        let value = analyze_resume(stub.as_ref(), "Rust developer").await.unwrap();
        assert_eq!(value, json!({ "analysis": "The candidate knows Rust." }));
    }

    #[tokio::test]
    async fn test_analyze_resume_propagates_errors() {
        let stub = StubGenerator::failing(LlmProvider::Google);
        assert!(analyze_resume(stub.as_ref(), "x").await.is_err());
    }

    #[tokio::test]
    async fn test_generate_questions_extracts_numbered_items() {
        let stub = StubGenerator::replying(
            LlmProvider::Nvidia,
            "Here you go:\n1. Why Rust?\n2. Describe ownership.\n3. What is Send?",
        );
        let questions = generate_resume_questions(stub.as_ref(), "cv").await;
        assert_eq!(questions, vec!["Why Rust?", "Describe ownership.", "What is Send?"]);
    }

    #[tokio::test]
    async fn test_generate_questions_falls_back() {
        let failing = StubGenerator::failing(LlmProvider::Nvidia);
        assert_eq!(generate_resume_questions(failing.as_ref(), "cv").await, fallback_questions());

        let unnumbered = StubGenerator::replying(LlmProvider::Nvidia, "no list here");
        assert_eq!(generate_resume_questions(unnumbered.as_ref(), "cv").await.len(), 10);
    }

    #[tokio::test]
    async fn test_answer_keeps_three_lines() {
        let stub = StubGenerator::replying(LlmProvider::Google, "a\nb\nc\nd");
        assert_eq!(answer_question(stub.as_ref(), "cv", "q").await, "a\nb\nc");

        let failing = StubGenerator::failing(LlmProvider::Google);
        assert_eq!(answer_question(failing.as_ref(), "cv", "q").await, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_analyze_responses_keeps_six_lines_or_falls_back() {
        let pairs = vec![QuestionAnswer {
            question: "Why Rust?".into(),
            answer: "Safety".into(),
        }];
        let stub = StubGenerator::replying(LlmProvider::Nvidia, "1\n2\n3\n4\n5\n6\n7\n8");
        assert_eq!(analyze_responses(stub.as_ref(), "cv", &pairs).await, "1\n2\n3\n4\n5\n6");

        let failing = StubGenerator::failing(LlmProvider::Nvidia);
        assert_eq!(analyze_responses(failing.as_ref(), "cv", &pairs).await, FALLBACK_FEEDBACK);
    }

    #[test]
    fn test_answer_prompt_leaves_resume_placeholders_alone() {
        let resume = "Templating work: rendered {question} and {qa} tokens";
        let prompt = answer_prompt(resume, "What did you build?");
        assert!(prompt.contains(resume));
        assert_eq!(prompt.matches("What did you build?").count(), 1);
    }

    #[test]
    fn test_feedback_prompt_leaves_resume_placeholders_alone() {
        let resume = "Wrote a {qa} formatter";
        let pairs = vec![QuestionAnswer { question: "Why?".into(), answer: "Because".into() }];
        let prompt = feedback_prompt(resume, &pairs);
        assert!(prompt.contains(resume));
        assert_eq!(prompt.matches("Question 1: Why?").count(), 1);
    }

    #[test]
    fn test_format_qa_numbers_from_one() {
        let pairs = vec![
            QuestionAnswer { question: "Q1".into(), answer: "A1".into() },
            QuestionAnswer { question: "Q2".into(), answer: "A2".into() },
        ];
        assert_eq!(
            format_qa(&pairs),
            "Question 1: Q1\nAnswer 1: A1\nQuestion 2: Q2\nAnswer 2: A2"
        );
    }
}
