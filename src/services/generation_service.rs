use crate::dto::generate_dto::GenerateExamPayload;
use crate::error::{Error, Result};
use crate::models::exam::{Difficulty, ExamDocument, Question};
use crate::services::{allocator, chunker, model_client::ModelClient, parser};
use futures::future::join_all;
use rand::Rng;
use std::time::Duration;

const MAX_ATTEMPTS: u32 = 3;

/// Orchestrates the whole exam-generation pipeline: chunk, allocate, fan out
/// parallel model calls with retry, parse and repair each reply, aggregate.
#[derive(Clone)]
pub struct GenerationService {
    model_client: ModelClient,
    max_chunk_size: usize,
    retry_base_delay: Duration,
}

impl GenerationService {
    pub fn new(
        model_client: ModelClient,
        max_chunk_size: usize,
        retry_base_delay: Duration,
    ) -> Self {
        Self {
            model_client,
            max_chunk_size,
            retry_base_delay,
        }
    }

    pub async fn generate(&self, payload: &GenerateExamPayload) -> Result<ExamDocument> {
        if payload.source_text.trim().is_empty() {
            return Err(Error::BadRequest("Temario requerido".to_string()));
        }

        let chunks = chunker::split_text(&payload.source_text, self.max_chunk_size);
        let quotas = allocator::allocate(payload.question_count, chunks.len());
        tracing::info!(
            chunks = chunks.len(),
            requested = payload.question_count,
            "Starting exam generation"
        );

        let chunk_futures = chunks.iter().zip(quotas.iter()).enumerate().map(
            |(index, (chunk, &quota))| {
                self.generate_chunk(chunk, index, chunks.len(), quota, payload)
            },
        );

        // join_all keeps results in chunk order regardless of completion order.
        let per_chunk = join_all(chunk_futures).await;

        assemble_exam(&payload.course, payload.difficulty, per_chunk)
    }

    /// Runs one chunk to a terminal state: questions on success, an empty
    /// list once the retry budget is spent. Only the aggregate decides
    /// whether that is fatal.
    async fn generate_chunk(
        &self,
        chunk: &str,
        index: usize,
        total_chunks: usize,
        quota: u32,
        payload: &GenerateExamPayload,
    ) -> Vec<Question> {
        if quota == 0 {
            return Vec::new();
        }

        let system_prompt = build_system_prompt(quota, payload.option_count);
        let user_prompt = build_user_prompt(
            quota,
            &payload.course,
            payload.difficulty,
            index,
            total_chunks,
            chunk,
        );

        for attempt in 1..=MAX_ATTEMPTS {
            if attempt > 1 {
                // Jittered linear backoff so parallel chunks do not retry in
                // lockstep against the same rate limit.
                let base = self.retry_base_delay.as_millis() as u64;
                let jitter = rand::thread_rng().gen_range(0..=base);
                tokio::time::sleep(Duration::from_millis(base * (attempt as u64 - 1) + jitter))
                    .await;
            }

            match self.attempt_chunk(&system_prompt, &user_prompt).await {
                Ok(questions) => {
                    if questions.len() as u32 != quota {
                        tracing::warn!(
                            chunk = index,
                            quota,
                            received = questions.len(),
                            "Model returned a different number of questions than requested"
                        );
                    }
                    return questions;
                }
                Err(err) => {
                    tracing::error!(chunk = index, attempt, error = %err, "Chunk attempt failed");
                }
            }
        }

        tracing::error!(chunk = index, "Chunk gave up after exhausting retries");
        Vec::new()
    }

    async fn attempt_chunk(&self, system_prompt: &str, user_prompt: &str) -> Result<Vec<Question>> {
        let raw = self.model_client.complete(system_prompt, user_prompt).await?;
        parser::parse_questions(&raw, &mut rand::thread_rng())
    }
}

/// Concatenates per-chunk question lists in chunk order and renumbers them
/// 1-based. Zero questions overall is the pipeline's single fatal condition.
pub fn assemble_exam(
    course: &str,
    difficulty: Difficulty,
    per_chunk: Vec<Vec<Question>>,
) -> Result<ExamDocument> {
    let mut questions: Vec<Question> = per_chunk.into_iter().flatten().collect();

    if questions.is_empty() {
        return Err(Error::NoQuestions);
    }

    for (position, question) in questions.iter_mut().enumerate() {
        question.id = position as u32 + 1;
    }

    Ok(ExamDocument {
        title: format!("Examen - {}", course),
        difficulty,
        questions,
    })
}

fn build_system_prompt(quota: u32, option_count: u32) -> String {
    format!(
        r#"Eres una inteligencia artificial que actúa como un profesor universitario experto en evaluación académica. Tu único objetivo es generar preguntas de opción múltiple perfectamente válidas para un examen oficial, a partir de un fragmento de temario que se te proporcionará.

Uso del temario (REGLA DE ORO):
- Usa EXCLUSIVAMENTE la información contenida en el fragmento de temario proporcionado.
- Todas las preguntas, opciones y explicaciones deben ser trazables directamente al texto.
- PROHIBICIÓN DE REFERENCIAS INTERNAS: no menciones identificadores de documentos, números de página ni referencias cruzadas del texto original. La pregunta debe ser 100% autodependiente.

Generación de examen:
- Genera exactamente {quota} preguntas.
- Cada pregunta tendrá exactamente {option_count} opciones.
- Solo una opción es correcta, indicada en el campo answerIndex.

Reglas críticas anti-sesgo de longitud:
- La opción correcta no debe ser distinguible por longitud, tecnicismo o complejidad.
- Todas las opciones deben ser visualmente simétricas y seguir la misma estructura gramatical.
- Todos los distractores deben ser plausibles y fallar por errores conceptuales sutiles.

Explicación:
- Cada pregunta incluye una explicación breve y académica que justifica solo la opción correcta, sin introducir información nueva.

Formato de salida:
- La salida debe ser un objeto JSON válido, sin ningún texto adicional, con la estructura exacta:
{{
  "questions": [
    {{
      "id": 1,
      "question": "Texto del enunciado claro y académico.",
      "choices": ["Opción A", "Opción B", "Opción C", "Opción D"],
      "answerIndex": 2,
      "explanation": "Frase breve y justificada únicamente con el temario."
    }}
  ]
}}"#
    )
}

fn build_user_prompt(
    quota: u32,
    course: &str,
    difficulty: Difficulty,
    chunk_index: usize,
    total_chunks: usize,
    chunk: &str,
) -> String {
    format!(
        "Genera {} preguntas para el curso {} nivel {}.\n\nFRAGMENTO DE TEMARIO ({}/{}):\n{}\n\nRECORDATORIO: Devuelve SOLO el JSON con la propiedad \"questions\".",
        quota,
        course,
        difficulty.prompt_descriptor(),
        chunk_index + 1,
        total_chunks,
        chunk,
    )
}
