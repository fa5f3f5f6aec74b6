//! Axum route handlers for the quiz API.

use axum::{extract::State, Json};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::LlmProvider;
use crate::quiz::bank::Question;
use crate::quiz::catalog::{better_question, is_placeholder};
use crate::quiz::options::options_for;
use crate::quiz::recommend::recommend;
use crate::quiz::scoring::{assessment_report, score, skill_breakdown, AnswerRecord, SkillScore};
use crate::state::AppState;

const DEFAULT_QUESTION_COUNT: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
}

fn default_count() -> usize {
    DEFAULT_QUESTION_COUNT
}

#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    #[serde(default)]
    pub skill: String,
    #[serde(default = "default_count")]
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct EnhancedQuestion {
    pub question_id: String,
    pub skill: String,
    pub question: String,
    pub options: [&'static str; 4],
    pub correct_answer: usize,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<EnhancedQuestion>,
    pub skill: String,
}

#[derive(Debug, Deserialize)]
pub struct AssessmentRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "default_count")]
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub questions: Vec<EnhancedQuestion>,
    pub skills: Vec<String>,
}

fn default_evaluate_skill() -> String {
    "this area".to_string()
}

fn default_evaluate_provider() -> String {
    LlmProvider::Google.to_string()
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    #[serde(default = "default_evaluate_skill")]
    pub skill: String,
    #[serde(default = "default_evaluate_provider")]
    pub api_provider: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub score: f64,
    pub correct_answers: usize,
    pub total_questions: usize,
    pub recommendation: String,
    pub skill_breakdown: Vec<SkillScore>,
}

#[derive(Debug, Deserialize)]
pub struct AssessmentReportRequest {
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    #[serde(default)]
    pub selected_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AssessmentReportResponse {
    pub score: f64,
    pub correct_answers: usize,
    pub total_questions: usize,
    pub skill_breakdown: Vec<SkillScore>,
    pub report: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Question enhancement
// ────────────────────────────────────────────────────────────────────────────

/// Replaces placeholders with curated questions and attaches options.
/// The first option is always the intended answer.
pub fn enhance_questions<R: Rng + ?Sized>(questions: Vec<Question>, rng: &mut R) -> Vec<EnhancedQuestion> {
    let mut used: Vec<String> = questions
        .iter()
        .filter(|q| !is_placeholder(&q.question))
        .map(|q| q.question.clone())
        .collect();

    questions
        .into_iter()
        .map(|q| {
            let text = if is_placeholder(&q.question) {
                let replacement = better_question(&q.skill, &used, rng);
                used.push(replacement.clone());
                replacement
            } else {
                q.question
            };
            EnhancedQuestion {
                options: options_for(&text, &q.skill),
                question_id: q.question_id,
                skill: q.skill,
                question: text,
                correct_answer: 0,
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    Json(SkillsResponse {
        skills: state.bank.skills().to_vec(),
    })
}

/// POST /api/questions
///
/// Random questions for one skill, each with four options.
pub async fn handle_get_questions(
    State(state): State<AppState>,
    Json(request): Json<QuestionsRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let mut rng = rand::thread_rng();
    let sample = state
        .bank
        .sample(&request.skill, request.count, &mut rng)
        .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))?;

    let questions = enhance_questions(sample, &mut rng);
    info!("Serving {} questions for {}", questions.len(), request.skill);

    Ok(Json(QuestionsResponse {
        questions,
        skill: request.skill,
    }))
}

/// POST /api/assessments
///
/// Mixed-skill assessment: pools the bank questions of every requested skill
/// and samples `count` of them.
pub async fn handle_create_assessment(
    State(state): State<AppState>,
    Json(request): Json<AssessmentRequest>,
) -> Result<Json<AssessmentResponse>, AppError> {
    if request.skills.is_empty() {
        return Err(AppError::Validation(
            "Please select at least one skill to test".to_string(),
        ));
    }

    let mut pool: Vec<Question> = Vec::new();
    for skill in &request.skills {
        let questions = state
            .bank
            .questions(skill)
            .ok_or_else(|| AppError::NotFound(format!("Skill not found: {skill}")))?;
        pool.extend_from_slice(questions);
    }

    let mut rng = rand::thread_rng();
    let take = request.count.min(pool.len());
    let sample: Vec<Question> = pool.choose_multiple(&mut rng, take).cloned().collect();
    let questions = enhance_questions(sample, &mut rng);

    Ok(Json(AssessmentResponse {
        questions,
        skills: request.skills,
    }))
}

/// POST /api/evaluate
///
/// Scores the answers and asks the selected provider for recommendations,
/// falling back to canned text when it is unavailable.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Json<EvaluateResponse> {
    let score = score(&request.answers);
    let breakdown = skill_breakdown(&request.answers);

    let generator = match request.api_provider.parse::<LlmProvider>() {
        Ok(provider) => state.llm.generator(provider),
        Err(e) => {
            warn!("{e}; using canned recommendations");
            None
        }
    };

    let recommendation = recommend(generator.as_deref(), &request.skill, &score, &breakdown).await;

    Json(EvaluateResponse {
        score: score.percentage,
        correct_answers: score.correct,
        total_questions: score.total,
        recommendation,
        skill_breakdown: breakdown,
    })
}

/// POST /api/assessment-report
///
/// Deterministic results text for the dashboard; no LLM involved.
pub async fn handle_assessment_report(
    Json(request): Json<AssessmentReportRequest>,
) -> Json<AssessmentReportResponse> {
    let score = score(&request.answers);
    let breakdown = skill_breakdown(&request.answers);
    let report = assessment_report(score.percentage, &breakdown, &request.selected_skills);

    Json(AssessmentReportResponse {
        score: score.percentage,
        correct_answers: score.correct,
        total_questions: score.total,
        skill_breakdown: breakdown,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(id: &str, skill: &str, text: &str) -> Question {
        Question {
            question_id: id.to_string(),
            skill: skill.to_string(),
            question: text.to_string(),
        }
    }

    #[test]
    fn test_enhance_keeps_real_questions() {
        let mut rng = StdRng::seed_from_u64(11);
        let out = enhance_questions(
            vec![question("sql-03", "SQL + DBMS", "What is the purpose of indexing in a database?")],
            &mut rng,
        );
        assert_eq!(out[0].question, "What is the purpose of indexing in a database?");
        assert_eq!(out[0].options[0], "To improve query performance by creating pointers to data");
        assert_eq!(out[0].correct_answer, 0);
        assert_eq!(out[0].question_id, "sql-03");
    }

    #[test]
    fn test_enhance_replaces_placeholders_without_repeats() {
        let mut rng = StdRng::seed_from_u64(5);
        let placeholders: Vec<Question> = (1..=10)
            .map(|n| {
                question(
                    &format!("java-{n}"),
                    "Java",
                    &format!("Q{n} for Java: Explain a key concept or solve a coding/logical scenario related to Java."),
                )
            })
            .collect();
        let out = enhance_questions(placeholders, &mut rng);

        let mut texts: Vec<&str> = out.iter().map(|q| q.question.as_str()).collect();
        assert!(texts.iter().all(|t| !t.contains("Explain a key concept")));
        texts.sort();
        texts.dedup();
        assert_eq!(texts.len(), 10);
    }

    #[test]
    fn test_enhance_unknown_skill_placeholder_keeps_generic_text() {
        let mut rng = StdRng::seed_from_u64(5);
        let out = enhance_questions(
            vec![question(
                "r-1",
                "Rust",
                "Q1 for Rust: Explain a key concept or solve a coding/logical scenario related to Rust.",
            )],
            &mut rng,
        );
        assert_eq!(
            out[0].question,
            "Explain a key concept or solve a coding/logical scenario related to Rust."
        );
        assert_eq!(out[0].options[0], "Option A - Correct approach");
    }
}
