use crate::dto::generate_dto::GenerateExamPayload;
use crate::error::Result;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::time::Instant;
use validator::Validate;

/// `POST /api/generate` — the pipeline entry point. Validation errors leave
/// before any network activity; analytics are recorded on a spawned task so
/// they never delay the exam reply.
pub async fn generate_exam(
    State(state): State<AppState>,
    Json(payload): Json<GenerateExamPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let started = Instant::now();
    let exam = state.generation_service.generate(&payload).await?;
    let gen_time_ms = started.elapsed().as_millis() as u64;

    let stats = state.stats_service.clone();
    let difficulty = payload.difficulty.as_str();
    let course = payload.course.clone();
    let question_count = exam.questions.len() as u64;
    tokio::spawn(async move {
        stats.record_exam(difficulty, &course, question_count, gen_time_ms);
    });

    Ok(Json(exam))
}
