pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::quiz::handlers as quiz;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Room for multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let frontend_dir = state.config.frontend_dir.clone();
    let dashboard = ServeDir::new(&frontend_dir)
        .fallback(ServeFile::new(frontend_dir.join("index.html")));
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Skill assessment
        .route("/api/skills", get(quiz::handle_list_skills))
        .route("/api/questions", post(quiz::handle_get_questions))
        .route("/api/assessments", post(quiz::handle_create_assessment))
        .route("/api/evaluate", post(quiz::handle_evaluate))
        .route("/api/assessment-report", post(quiz::handle_assessment_report))
        // Resume analysis
        .route("/api/upload-resume", post(resume::handle_upload_resume))
        .route("/api/analyze-resume", post(resume::handle_analyze_resume))
        .route(
            "/api/generate-resume-questions",
            post(resume::handle_generate_resume_questions),
        )
        .route(
            "/api/answer-resume-question",
            post(resume::handle_answer_resume_question),
        )
        .route(
            "/api/analyze-resume-responses",
            post(resume::handle_analyze_resume_responses),
        )
        .route(
            "/api/personalized-questions",
            post(resume::handle_personalized_questions),
        )
        .route(
            "/api/personalized-recommendations",
            post(resume::handle_personalized_recommendations),
        )
        // Dashboard; unknown paths get index.html
        .fallback_service(dashboard)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
