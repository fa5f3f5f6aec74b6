//! Axum route handlers for resume upload, analysis and interview practice.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{LlmProvider, TextGenerator, UnknownProvider};
use crate::resume::analysis::{
    analyze_resume, analyze_responses, answer_question, fallback_questions,
    generate_resume_questions, QuestionAnswer, API_UNAVAILABLE_MESSAGE,
};
use crate::resume::interview::{personalized_questions, personalized_recommendations};
use crate::resume::parser::{extract_text, preview};
use crate::resume::skills::{extract_skills, ExtractedSkill};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub skills: Vec<ExtractedSkill>,
    pub resume_text: String,
    pub resume_preview: String,
}

fn default_resume_provider() -> String {
    LlmProvider::Nvidia.to_string()
}

#[derive(Debug, Deserialize)]
pub struct ResumeRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default = "default_resume_provider")]
    pub api_provider: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerQuestionRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub question: String,
    #[serde(default = "default_resume_provider")]
    pub api_provider: String,
}

#[derive(Debug, Deserialize)]
pub struct ResponsesRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub questions_and_answers: Vec<QuestionAnswer>,
    #[serde(default = "default_resume_provider")]
    pub api_provider: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
pub struct PersonalizedQuestionsRequest {
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PersonalizedRecommendationsRequest {
    #[serde(default)]
    pub answers: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn parse_provider(name: &str) -> Result<LlmProvider, AppError> {
    name.parse()
        .map_err(|e: UnknownProvider| AppError::Validation(e.to_string()))
}

fn require_resume_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("Resume text is required".to_string()));
    }
    Ok(())
}

/// Configured generator for `provider`, or `None` after logging that its
/// key is missing.
fn generator_or_warn(state: &AppState, provider: LlmProvider) -> Option<Arc<dyn TextGenerator>> {
    let generator = state.llm.generator(provider);
    if generator.is_none() {
        warn!("No API key configured for {provider}, serving canned reply");
    }
    generator
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/upload-resume
///
/// Multipart upload (field `resume`). Returns the extracted text and the
/// skills found in it.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }
        upload = Some((filename, field.bytes().await?));
        break;
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;

    let limit = state.config.max_upload_bytes;
    if data.len() > limit {
        return Err(AppError::PayloadTooLarge(format!(
            "Resume exceeds the {limit} byte upload limit"
        )));
    }

    info!("Parsing uploaded resume {filename} ({} bytes)", data.len());
    let resume_text = tokio::task::spawn_blocking(move || extract_text(&filename, &data))
        .await
        .map_err(|e| AppError::ResumeParse(format!("Resume parser failed: {e}")))??;

    let skills = extract_skills(&resume_text);
    info!("Extracted {} skills from resume", skills.len());

    Ok(Json(UploadResponse {
        message: "Resume uploaded successfully".to_string(),
        skills,
        resume_preview: preview(&resume_text),
        resume_text,
    }))
}

/// POST /api/analyze-resume
///
/// Returns the model's JSON analysis (`skills`, `assessment`, `questions`)
/// or `{ "analysis": text }` when the reply is not JSON.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<Value>, AppError> {
    require_resume_text(&request.resume_text)?;
    let provider = parse_provider(&request.api_provider)?;
    let generator = state
        .llm
        .generator(provider)
        .ok_or(AppError::MissingApiKey(provider))?;

    let analysis = analyze_resume(generator.as_ref(), &request.resume_text).await?;
    Ok(Json(analysis))
}

/// POST /api/generate-resume-questions
pub async fn handle_generate_resume_questions(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
    require_resume_text(&request.resume_text)?;
    let provider = parse_provider(&request.api_provider)?;

    let questions = match generator_or_warn(&state, provider) {
        Some(generator) => generate_resume_questions(generator.as_ref(), &request.resume_text).await,
        None => fallback_questions(),
    };
    Ok(Json(QuestionsResponse { questions }))
}

/// POST /api/answer-resume-question
pub async fn handle_answer_resume_question(
    State(state): State<AppState>,
    Json(request): Json<AnswerQuestionRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    if request.resume_text.trim().is_empty() || request.question.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing resume text or question".to_string(),
        ));
    }
    let provider = parse_provider(&request.api_provider)?;

    let answer = match generator_or_warn(&state, provider) {
        Some(generator) => {
            answer_question(generator.as_ref(), &request.resume_text, &request.question).await
        }
        None => API_UNAVAILABLE_MESSAGE.to_string(),
    };
    Ok(Json(AnswerResponse { answer }))
}

/// POST /api/analyze-resume-responses
///
/// Feedback on the candidate's interview answers.
pub async fn handle_analyze_resume_responses(
    State(state): State<AppState>,
    Json(request): Json<ResponsesRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    if request.resume_text.trim().is_empty() || request.questions_and_answers.is_empty() {
        return Err(AppError::Validation(
            "Missing resume text or questions and answers".to_string(),
        ));
    }
    let provider = parse_provider(&request.api_provider)?;

    let feedback = match generator_or_warn(&state, provider) {
        Some(generator) => {
            analyze_responses(
                generator.as_ref(),
                &request.resume_text,
                &request.questions_and_answers,
            )
            .await
        }
        None => API_UNAVAILABLE_MESSAGE.to_string(),
    };
    Ok(Json(FeedbackResponse { feedback }))
}

/// POST /api/personalized-questions
pub async fn handle_personalized_questions(
    Json(request): Json<PersonalizedQuestionsRequest>,
) -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        questions: personalized_questions(&request.skills),
    })
}

/// POST /api/personalized-recommendations
pub async fn handle_personalized_recommendations(
    Json(request): Json<PersonalizedRecommendationsRequest>,
) -> Json<RecommendationsResponse> {
    Json(RecommendationsResponse {
        recommendations: personalized_recommendations(&request.answers, &request.skills),
    })
}
